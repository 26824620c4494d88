//! Building programs with diagnostics, and caching their binaries on disk.
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::device::DeviceInfo;
use crate::driver::Driver;
use crate::error::{Error, Status};
use crate::file;

/// Build a program for a device, printing the compiler log when that fails.
///
/// The returned error always carries the status of the failed build. Its message is the build log
/// when the log could be retrieved. Not being able to get the log is not an error of its own.
pub fn build_program<D: Driver>(
    driver: &D,
    program: &mut D::Program,
    device: &D::Device,
    options: Option<&str>,
) -> Result<(), Error> {
    let options = options.unwrap_or("");
    let err = match driver.build(program, device, options) {
        Ok(()) => return Ok(()),
        Err(err) => err,
    };

    let log = match driver.build_log(program, device) {
        Ok(log) => log,
        Err(log_err) => {
            log::debug!("Build log not available: {}", log_err);
            return Err(err);
        }
    };

    eprintln!("Build log (options: \"{}\"):\n{}", options, log);

    if log.is_empty() {
        Err(err)
    } else {
        Err(Error::with_message(err.status(), log))
    }
}

/// Create a program from source text and build it for a device.
pub fn build_from_source<D: Driver>(
    driver: &D,
    context: &D::Context,
    device: &D::Device,
    source: &str,
    options: Option<&str>,
) -> Result<D::Program, Error> {
    let mut program = driver.program_with_source(context, source)?;
    build_program(driver, &mut program, device, options)?;
    Ok(program)
}

/// The cache file of a program for one device: `<base>-<device name>.bin`.
pub fn binary_path(base: &Path, device_name: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push("-");
    name.push(device_name);
    name.push(".bin");
    PathBuf::from(name)
}

/// Write the binaries of a built program, one file for each of its devices.
///
/// The devices must be listed in the order the program was created with.
pub fn write_binaries<D: Driver>(
    driver: &D,
    program: &D::Program,
    devices: &[D::Device],
    base: &Path,
) -> Result<(), Error> {
    let binaries = driver.binaries(program)?;

    if binaries.len() != devices.len() {
        return Err(Error::with_message(
            Status::INVALID_VALUE,
            format!("Program has {} binaries for {} devices", binaries.len(), devices.len()),
        ));
    }

    for (device, binary) in devices.iter().zip(&binaries) {
        let name = driver.device_info(device, DeviceInfo::Name)?;
        let path = binary_path(base, &name);
        file::write_binary_file(&path, binary)?;
        log::debug!("Wrote {} bytes to {}", binary.len(), path.display());
    }

    Ok(())
}

/// Read one cached binary for each device.
pub fn read_binaries<D: Driver>(
    driver: &D,
    devices: &[D::Device],
    base: &Path,
) -> Result<Vec<Vec<u8>>, Error> {
    devices
        .iter()
        .map(|device| {
            let name = driver.device_info(device, DeviceInfo::Name)?;
            let path = binary_path(base, &name);
            file::read_binary_file(&path).map_err(|err| {
                log::debug!("{}", err);
                Error::with_message(
                    Status::FILE_OPERATION_ERROR,
                    format!("Not all binaries found, missing {}", path.display()),
                )
            })
        })
        .collect()
}

/// Create a program from the binary cache, compiling and caching the source first if necessary.
///
/// The returned program is always the one created from the cached binary, built for `device`.
pub fn load_or_build<D: Driver>(
    driver: &D,
    context: &D::Context,
    device: &D::Device,
    base: &Path,
    source: &Path,
    options: Option<&str>,
) -> Result<D::Program, Error> {
    let devices = core::slice::from_ref(device);

    let binaries = match read_binaries(driver, devices, base) {
        Ok(binaries) => binaries,
        Err(err) => {
            log::info!("{}, compiling {}", err, source.display());
            let text = file::read_text_file(source)?;
            let program = build_from_source(driver, context, device, &text, options)?;
            write_binaries(driver, &program, devices, base)?;
            drop(program);
            read_binaries(driver, devices, base)?
        }
    };

    let mut program = driver.program_with_binaries(context, devices, &binaries)?;
    build_program(driver, &mut program, device, None)?;
    Ok(program)
}
