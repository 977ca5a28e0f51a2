/// Texture handle, texture units, pixel formats and upload descriptor

use std::fmt;

/// Opaque handle to a GPU texture object
///
/// The value is the backend's object name. Zero is reserved for the
/// default/null texture and is never returned by `create_texture`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl fmt::Display for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "texture#{}", self.0)
    }
}

/// Numbered texture slot sampled during a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureUnit(pub u32);

impl TextureUnit {
    /// Unit holding the base (albedo) map
    pub const BASE: TextureUnit = TextureUnit(0);
    /// Unit holding the companion normal map
    pub const NORMAL_MAP: TextureUnit = TextureUnit(1);

    /// Value written into a sampler uniform to select this unit
    pub fn sampler_value(&self) -> i32 {
        self.0 as i32
    }
}

/// Upload pixel format, chosen from the decoded channel count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 3 channels, 8 bits each
    Rgb8,
    /// 4 channels, 8 bits each
    Rgba8,
}

impl PixelFormat {
    /// Format matching a channel count, `None` when the count has no upload format
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(PixelFormat::Rgb8),
            4 => Some(PixelFormat::Rgba8),
            _ => None,
        }
    }

    /// Bytes per pixel
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Texture coordinate wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    /// Tile the texture
    Repeat,
    /// Clamp to the edge texel
    ClampToEdge,
    /// Tile with mirroring
    MirroredRepeat,
}

/// Mipmap handling at upload time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MipmapMode {
    /// Level 0 only
    None,
    /// Generate the full chain down to 1x1
    Generate,
}

/// Number of levels in a full mipmap chain for the given size
pub fn full_mip_chain_len(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Pixel data uploaded into a texture object
#[derive(Debug, Clone)]
pub struct TextureUpload<'a> {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Layout of `data`
    pub format: PixelFormat,
    /// Tightly packed rows, `width * height * bytes_per_pixel` bytes
    pub data: &'a [u8],
    /// Mipmap generation
    pub mipmap: MipmapMode,
}

impl TextureUpload<'_> {
    /// Expected byte length of `data`
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }
}
