/// GraphicsDevice trait - immediate-mode graphics API boundary
///
/// Models a handle-based API with global bind state: one current program,
/// one texture binding per texture unit. Backends wrap a real API
/// (see `radix_gfx_renderer_gl`); tests use `MockGraphicsDevice`.

use std::fmt;

use crate::error::Result;
use crate::graphics_device::{
    TextureHandle, TextureUnit, TextureUpload, WrapMode,
    ShaderHandle, ProgramHandle, ShaderStage, Location,
};
use crate::shader::ShaderSource;

/// One pending error code reported by the graphics API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    /// Raw error code
    pub code: u32,
    /// Symbolic name (e.g. "GL_INVALID_ENUM")
    pub name: &'static str,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X})", self.name, self.code)
    }
}

/// Graphics device trait
///
/// The graphics context is thread-affine: implementations are driven from
/// the thread that owns the context, so the trait carries no `Send` bound.
/// Shared as `Arc<Mutex<dyn GraphicsDevice>>` between the loaders and the
/// resource manager.
pub trait GraphicsDevice {
    // ===== TEXTURES =====

    /// Create an empty texture object
    fn create_texture(&mut self) -> Result<TextureHandle>;

    /// Upload level 0 (and the mipmap chain when requested)
    fn upload_texture(&mut self, texture: TextureHandle, upload: &TextureUpload<'_>) -> Result<()>;

    /// Set wrap modes for the S and T axes
    fn set_texture_wrap(&mut self, texture: TextureHandle, wrap_s: WrapMode, wrap_t: WrapMode);

    /// Bind a texture (or the null texture) to a texture unit
    fn bind_texture(&mut self, unit: TextureUnit, texture: Option<TextureHandle>);

    /// Read back one mip level as tightly packed RGBA8
    fn read_texture_rgba(&mut self, texture: TextureHandle, level: u32) -> Result<Vec<u8>>;

    /// Destroy a texture object
    fn delete_texture(&mut self, texture: TextureHandle);

    // ===== SHADERS AND PROGRAMS =====

    /// Create a shader object of the given stage
    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle>;

    /// Submit source and compile; returns the compile status
    fn compile_shader(&mut self, shader: ShaderHandle, source: &ShaderSource) -> bool;

    /// Compiler log of a shader object (empty when the compiler said nothing)
    fn shader_info_log(&self, shader: ShaderHandle) -> String;

    /// Destroy a shader object
    fn delete_shader(&mut self, shader: ShaderHandle);

    /// Create an empty program object
    fn create_program(&mut self) -> Result<ProgramHandle>;

    /// Attach a shader object to a program
    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle);

    /// Link a program; returns the link status
    fn link_program(&mut self, program: ProgramHandle) -> bool;

    /// Linker log of a program (empty when the linker said nothing)
    fn program_info_log(&self, program: ProgramHandle) -> String;

    /// Make a program current, or revert to the default path with `None`
    fn use_program(&mut self, program: Option<ProgramHandle>);

    /// Destroy a program object
    fn delete_program(&mut self, program: ProgramHandle);

    // ===== PROGRAM INPUTS =====

    /// Location of a uniform, `Location::NOT_FOUND` when absent
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Location;

    /// Location of a vertex attribute, `Location::NOT_FOUND` when absent
    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Location;

    /// Set an integer uniform of the current program
    fn set_uniform_i32(&mut self, location: Location, value: i32);

    // ===== DIAGNOSTICS =====

    /// Pop one pending API error code, `None` when the queue is empty
    fn poll_error(&mut self) -> Option<ApiError>;
}
