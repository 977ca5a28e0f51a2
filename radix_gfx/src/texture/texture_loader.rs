/// Texture loader
///
/// Turns an image file into a GPU texture object: decode, create, upload
/// with a generated mipmap chain, wrap = repeat on both axes, then sweep
/// the API error queue. Decoding runs before any GPU object exists, so a
/// bad file never leaves an empty texture behind.

use std::path::Path;

use crate::error::Result;
use crate::graphics_device::{
    GraphicsDevice, MipmapMode, PixelFormat, TextureHandle, TextureUpload, WrapMode,
    full_mip_chain_len,
};
use crate::texture::{ChannelPolicy, ImageData};

const SOURCE: &str = "radix::TextureLoader";

/// Upper bound on error codes drained in one sweep
///
/// A lost context reports the same error forever; the sweep stops here.
pub const MAX_DRAINED_ERRORS: usize = 32;

/// A loaded GPU texture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub handle: TextureHandle,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub mip_levels: u32,
    pub label: String,
}

pub struct TextureLoader;

impl TextureLoader {
    /// Decode `path` and upload it as a new texture
    pub fn load(device: &mut dyn GraphicsDevice, path: &Path, policy: ChannelPolicy) -> Result<Texture> {
        let image = ImageData::decode_file(path).map_err(|e| {
            crate::engine_error!(SOURCE, "{}", e);
            e
        })?;
        Self::load_image(device, image, policy)
    }

    /// Upload already decoded pixels as a new texture
    pub fn load_image(device: &mut dyn GraphicsDevice, image: ImageData, policy: ChannelPolicy) -> Result<Texture> {
        let label = image.label().to_string();
        let (width, height) = (image.width(), image.height());

        let (format, pixels) = image.into_upload(policy).map_err(|e| {
            crate::engine_error!(SOURCE, "{}", e);
            e
        })?;

        let handle = device.create_texture()
            .map_err(|e| crate::engine_err!(SOURCE, "Failed to create texture for '{}': {}", label, e))?;

        let upload = TextureUpload {
            width,
            height,
            format,
            data: &pixels,
            mipmap: MipmapMode::Generate,
        };
        if let Err(e) = device.upload_texture(handle, &upload) {
            device.delete_texture(handle);
            crate::engine_bail!(SOURCE, "Failed to upload '{}': {}", label, e);
        }
        device.set_texture_wrap(handle, WrapMode::Repeat, WrapMode::Repeat);
        drop(pixels);

        drain_api_errors(device, &label);

        let mip_levels = full_mip_chain_len(width, height);
        crate::engine_debug!(SOURCE, "Loaded '{}' as {} ({}x{} {:?}, {} levels)",
            label, handle, width, height, format, mip_levels);

        Ok(Texture { handle, width, height, format, mip_levels, label })
    }
}

/// Pop and log pending API error codes, returns how many were drained
///
/// Purely diagnostic: never fails. Stops after [`MAX_DRAINED_ERRORS`].
pub fn drain_api_errors(device: &mut dyn GraphicsDevice, context: &str) -> usize {
    let mut drained = 0;
    while drained < MAX_DRAINED_ERRORS {
        let Some(error) = device.poll_error() else {
            return drained;
        };
        crate::engine_warn!(SOURCE, "API error after '{}': {}", context, error);
        drained += 1;
    }
    if device.poll_error().is_some() {
        crate::engine_warn!(SOURCE, "Error sweep after '{}' stopped at {} codes", context, MAX_DRAINED_ERRORS);
    }
    drained
}

#[cfg(test)]
#[path = "texture_loader_tests.rs"]
mod tests;
