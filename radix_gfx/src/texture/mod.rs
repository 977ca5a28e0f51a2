//! Texture subsystem
//!
//! Decodes image files into pixel buffers and turns them into GPU texture
//! objects with a full mipmap chain and repeat wrapping.

mod image_data;
mod texture_loader;

pub use image_data::{ImageData, ChannelPolicy};
pub use texture_loader::{Texture, TextureLoader, drain_api_errors, MAX_DRAINED_ERRORS};
