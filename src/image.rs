//! Loading and storing 8-bit images in common file formats.
//!
//! Encoding and decoding is done by the `image` crate. This module only converts between its
//! types and a plain interleaved buffer that can be handed to the device as is.
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ::image::codecs::{bmp::BmpEncoder, jpeg::JpegEncoder, png::PngEncoder};
use ::image::{ColorType, ExtendedColorType, ImageEncoder};

use crate::error::{Error, Status};

/// The quality used for lossy JPEG output.
pub const JPEG_QUALITY: u8 = 80;

/// An image with 8 bits per channel, rows stored top to bottom without padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
    /// Interleaved channels per pixel, between 1 and 4.
    pub channels: u8,
    pub pixels: Vec<u8>,
}

/// The encodings chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Png,
    Bmp,
    Jpeg,
}

impl Image {
    /// Create a black image.
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        let len = width as usize * height as usize * usize::from(channels);
        Image {
            width,
            height,
            channels,
            pixels: vec![0; len],
        }
    }

    fn color_type(&self) -> Result<ExtendedColorType, Error> {
        Ok(match self.channels {
            1 => ExtendedColorType::L8,
            2 => ExtendedColorType::La8,
            3 => ExtendedColorType::Rgb8,
            4 => ExtendedColorType::Rgba8,
            other => {
                return Err(Error::with_message(
                    Status::INVALID_ARG_VALUE,
                    format!("Images with {} channels are not supported", other),
                ))
            }
        })
    }

    fn validate(&self) -> Result<ExtendedColorType, Error> {
        let color = self.color_type()?;
        let expected = self.width as usize * self.height as usize * usize::from(self.channels);

        if self.pixels.len() != expected {
            return Err(Error::with_message(
                Status::INVALID_ARG_VALUE,
                format!(
                    "{}x{}x{} image needs {} bytes, has {}",
                    self.width,
                    self.height,
                    self.channels,
                    expected,
                    self.pixels.len()
                ),
            ));
        }

        Ok(color)
    }

    /// Replicate gray into color channels, keeping alpha.
    fn widened(&self) -> (Cow<'_, [u8]>, ExtendedColorType) {
        match self.channels {
            1 => (
                self.pixels.iter().flat_map(|&l| [l, l, l]).collect(),
                ExtendedColorType::Rgb8,
            ),
            2 => (
                self.pixels
                    .chunks_exact(2)
                    .flat_map(|la| [la[0], la[0], la[0], la[1]])
                    .collect(),
                ExtendedColorType::Rgba8,
            ),
            4 => (Cow::Borrowed(&self.pixels[..]), ExtendedColorType::Rgba8),
            _ => (Cow::Borrowed(&self.pixels[..]), ExtendedColorType::Rgb8),
        }
    }

    /// Drop the alpha channel, if any.
    fn opaque(&self) -> (Cow<'_, [u8]>, ExtendedColorType) {
        match self.channels {
            2 => (
                self.pixels.chunks_exact(2).map(|la| la[0]).collect(),
                ExtendedColorType::L8,
            ),
            4 => (
                self.pixels
                    .chunks_exact(4)
                    .flat_map(|rgba| &rgba[..3])
                    .copied()
                    .collect(),
                ExtendedColorType::Rgb8,
            ),
            1 => (Cow::Borrowed(&self.pixels[..]), ExtendedColorType::L8),
            _ => (Cow::Borrowed(&self.pixels[..]), ExtendedColorType::Rgb8),
        }
    }
}

impl Format {
    /// Choose the encoding from the extension of a path, ignoring case.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => Ok(Format::Png),
            Some("bmp") => Ok(Format::Bmp),
            Some("jpg") | Some("jpeg") => Ok(Format::Jpeg),
            _ => Err(Error::with_message(
                Status::UNSUPPORTED_FORMAT,
                format!("Unknown file extension of {}", path.display()),
            )),
        }
    }
}

/// Decode an image file, narrowing any deeper sample type to 8 bits.
pub fn read(path: impl AsRef<Path>) -> Result<Image, Error> {
    let path = path.as_ref();
    let decoded = ::image::open(path).map_err(|err| {
        let err = Error::from(err);
        log::warn!("Could not read {}: {}", path.display(), err);
        err
    })?;

    let (width, height) = (decoded.width(), decoded.height());
    let channels = decoded.color().channel_count();

    let pixels = match decoded.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => decoded.into_bytes(),
        _ => match channels {
            1 => decoded.to_luma8().into_raw(),
            2 => decoded.to_luma_alpha8().into_raw(),
            3 => decoded.to_rgb8().into_raw(),
            _ => decoded.to_rgba8().into_raw(),
        },
    };

    Ok(Image {
        width,
        height,
        channels: channels.min(4),
        pixels,
    })
}

/// Encode an image to a file, in the format named by the file extension.
///
/// PNG stores every layout as is. BMP has no gray layouts, gray is stored as RGB and gray with
/// alpha as RGBA. JPEG drops the alpha channel.
///
/// Nothing is created on disk when the extension or the image is not supported.
pub fn write(path: impl AsRef<Path>, image: &Image) -> Result<(), Error> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let color = image.validate()?;

    let file = File::create(path).map_err(|err| {
        Error::with_message(
            Status::FILE_OPERATION_ERROR,
            format!("Unable to write {}: {}", path.display(), err),
        )
    })?;
    let mut writer = BufWriter::new(file);
    let (width, height) = (image.width, image.height);

    match format {
        Format::Png => {
            PngEncoder::new(&mut writer).write_image(&image.pixels, width, height, color)
        }
        Format::Bmp => {
            let (pixels, color) = image.widened();
            BmpEncoder::new(&mut writer).write_image(&pixels, width, height, color)
        }
        Format::Jpeg => {
            let (pixels, color) = image.opaque();
            JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
                .write_image(&pixels, width, height, color)
        }
    }?;

    writer.flush()?;
    Ok(())
}
