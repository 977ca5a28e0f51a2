/// Conversions between radix device types and OpenGL enums
///
/// Pure functions, usable without a context.

use radix_gfx::radix::device::{PixelFormat, ShaderStage, TextureUnit, WrapMode};
use radix_gfx::radix::shader::ShaderSource;

/// Source bytes as the `&str` glow hands to `glShaderSource`
///
/// Bytes are passed unchanged; a source that is not valid UTF-8 is refused
/// with a compile-log style message instead of being rewritten.
pub fn shader_text(source: &ShaderSource) -> Result<&str, String> {
    std::str::from_utf8(source.as_bytes()).map_err(|e| {
        format!("'{}' is not valid UTF-8 (byte {}), source not submitted",
            source.label(), e.valid_up_to())
    })
}

/// Internal format and client format for a pixel layout
pub fn pixel_format_to_gl(format: PixelFormat) -> (i32, u32) {
    match format {
        PixelFormat::Rgb8 => (glow::RGB8 as i32, glow::RGB),
        PixelFormat::Rgba8 => (glow::RGBA8 as i32, glow::RGBA),
    }
}

pub fn wrap_mode_to_gl(mode: WrapMode) -> i32 {
    (match mode {
        WrapMode::Repeat => glow::REPEAT,
        WrapMode::ClampToEdge => glow::CLAMP_TO_EDGE,
        WrapMode::MirroredRepeat => glow::MIRRORED_REPEAT,
    }) as i32
}

pub fn shader_stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
    }
}

/// `GL_TEXTUREn` for a texture unit
pub fn texture_unit_to_gl(unit: TextureUnit) -> u32 {
    glow::TEXTURE0 + unit.0
}

/// Symbolic name of a `glGetError` code
pub fn gl_error_name(code: u32) -> &'static str {
    match code {
        glow::NO_ERROR => "GL_NO_ERROR",
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
        glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::CONTEXT_LOST => "GL_CONTEXT_LOST",
        _ => "GL_UNKNOWN_ERROR",
    }
}

#[cfg(test)]
#[path = "gl_format_tests.rs"]
mod tests;
