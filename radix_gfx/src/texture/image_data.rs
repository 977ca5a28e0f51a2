/// Decoded image pixels and the channel policy applied before upload

use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::error::{Error, Result};
use crate::graphics_device::PixelFormat;

/// What to do with images whose channel count has no upload format
///
/// Only 3 (RGB) and 4 (RGBA) channel images map to an upload format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelPolicy {
    /// Fail with `Error::UnsupportedFormat`
    #[default]
    Reject,
    /// Expand grayscale to RGB and grayscale+alpha to RGBA
    Expand,
}

/// Raw 8-bit pixels decoded from an image file
///
/// The channel count is the file's own (1 to 4); 16-bit and float
/// sources are narrowed to 8 bits per channel.
#[derive(Debug, Clone)]
pub struct ImageData {
    label: String,
    width: u32,
    height: u32,
    channels: u8,
    pixels: Vec<u8>,
}

impl ImageData {
    /// Read and decode an image file
    ///
    /// The format comes from the file's magic bytes, falling back to its
    /// extension (TGA has no signature).
    pub fn decode_file(path: &Path) -> Result<Self> {
        let label = path.display().to_string();
        let reader = ImageReader::open(path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| Error::io(path, &e))?;
        let img = reader.decode().map_err(|e| Error::ImageDecode {
            path: label.clone(),
            message: e.to_string(),
        })?;
        Ok(Self::from_dynamic(img, &label))
    }

    /// Decode an in-memory encoded image (PNG, JPEG, BMP)
    ///
    /// Detection is by signature only, so TGA data needs
    /// [`decode_file`](Self::decode_file) with a `.tga` path.
    pub fn decode_bytes(bytes: &[u8], label: &str) -> Result<Self> {
        let img = image::load_from_memory(bytes).map_err(|e| Error::ImageDecode {
            path: label.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::from_dynamic(img, label))
    }

    fn from_dynamic(img: DynamicImage, label: &str) -> Self {
        let (width, height) = (img.width(), img.height());
        let channels = img.color().channel_count();
        let pixels = match channels {
            1 => img.into_luma8().into_raw(),
            2 => img.into_luma_alpha8().into_raw(),
            3 => img.into_rgb8().into_raw(),
            _ => img.into_rgba8().into_raw(),
        };
        Self {
            label: label.to_string(),
            width,
            height,
            channels: channels.min(4),
            pixels,
        }
    }

    /// Wrap already decoded pixels
    ///
    /// `pixels` must hold `width * height * channels` bytes.
    pub fn from_raw(label: &str, width: u32, height: u32, channels: u8, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * channels as usize;
        if !(1..=4).contains(&channels) || pixels.len() != expected {
            return Err(Error::UnsupportedFormat(format!(
                "'{}': {} bytes for {}x{} with {} channels",
                label, pixels.len(), width, height, channels
            )));
        }
        Ok(Self { label: label.to_string(), width, height, channels, pixels })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Upload format and tightly packed pixels under `policy`
    ///
    /// Consumes the image: the buffer is handed to the upload and dropped
    /// right after it.
    pub fn into_upload(self, policy: ChannelPolicy) -> Result<(PixelFormat, Vec<u8>)> {
        if let Some(format) = PixelFormat::from_channels(self.channels) {
            return Ok((format, self.pixels));
        }

        match policy {
            ChannelPolicy::Reject => Err(Error::UnsupportedFormat(format!(
                "'{}' has {} channel(s), only RGB and RGBA can be uploaded",
                self.label, self.channels
            ))),
            ChannelPolicy::Expand => match self.channels {
                1 => Ok((
                    PixelFormat::Rgb8,
                    self.pixels.iter().flat_map(|&g| [g, g, g]).collect(),
                )),
                2 => Ok((
                    PixelFormat::Rgba8,
                    self.pixels.chunks_exact(2).flat_map(|la| [la[0], la[0], la[0], la[1]]).collect(),
                )),
                n => Err(Error::UnsupportedFormat(format!(
                    "'{}' has {} channel(s)", self.label, n
                ))),
            },
        }
    }
}

#[cfg(test)]
#[path = "image_data_tests.rs"]
mod tests;
