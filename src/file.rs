//! Reading kernel sources and compiled binaries.
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Error, Status};

/// Read a whole text file, such as a kernel source.
pub fn read_text_file(path: impl AsRef<Path>) -> Result<String, Error> {
    let bytes = read_binary_file(path.as_ref())?;
    String::from_utf8(bytes).map_err(|err| {
        Error::with_message(
            Status::FILE_OPERATION_ERROR,
            format!("{} is not valid UTF-8: {}", path.as_ref().display(), err),
        )
    })
}

/// Read a whole file as opaque bytes.
pub fn read_binary_file(path: impl AsRef<Path>) -> Result<Vec<u8>, Error> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|err| unable_to("read", path, err))?;

    let mut buffer = Vec::new();
    // The size is a hint only, streams may not report one.
    if let Ok(meta) = file.metadata() {
        buffer.try_reserve_exact(meta.len() as usize)?;
    }

    file.read_to_end(&mut buffer)
        .map_err(|err| unable_to("read", path, err))?;
    Ok(buffer)
}

/// Write opaque bytes to a file, replacing any previous content.
pub fn write_binary_file(path: impl AsRef<Path>, data: &[u8]) -> Result<(), Error> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|err| unable_to("write", path, err))?;
    file.write_all(data)
        .map_err(|err| unable_to("write", path, err))?;
    Ok(())
}

fn unable_to(what: &str, path: &Path, err: std::io::Error) -> Error {
    Error::with_message(
        Status::FILE_OPERATION_ERROR,
        format!("Unable to {} {}: {}", what, path.display(), err),
    )
}
