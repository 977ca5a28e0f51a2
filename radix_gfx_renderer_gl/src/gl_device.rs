/// OpenGL implementation of GraphicsDevice
///
/// Wraps a ready `glow::Context`; creating the context and making it
/// current is the caller's job. Every call must come from the thread the
/// context is current on.

use std::num::NonZeroU32;

use glow::HasContext;
use rustc_hash::FxHashMap;

use radix_gfx::radix::{Error, Result, GraphicsDevice};
use radix_gfx::radix::device::{
    ApiError, Location, MipmapMode, ProgramHandle, ShaderHandle, ShaderStage,
    TextureHandle, TextureUnit, TextureUpload, WrapMode, full_mip_chain_len,
};
use radix_gfx::radix::shader::ShaderSource;
use radix_gfx::{engine_debug, engine_err};

use crate::debug;
use crate::gl_format::{
    gl_error_name, pixel_format_to_gl, shader_stage_to_gl, shader_text, texture_unit_to_gl,
    wrap_mode_to_gl,
};

const SOURCE: &str = "radix::GlGraphicsDevice";

/// Level 0 size and level count of an uploaded texture
#[derive(Debug, Clone, Copy)]
struct TextureInfo {
    width: u32,
    height: u32,
    mip_levels: u32,
}

/// OpenGL graphics device
pub struct GlGraphicsDevice {
    gl: glow::Context,
    /// Uploaded textures, needed to size readbacks
    textures: FxHashMap<u32, TextureInfo>,
    /// Texture bound to unit 0 through `bind_texture`, restored after edits
    base_binding: Option<glow::NativeTexture>,
    /// Shaders whose source never reached the driver, with the reason
    rejected_shaders: FxHashMap<u32, String>,
}

fn native_texture(handle: TextureHandle) -> Option<glow::NativeTexture> {
    NonZeroU32::new(handle.0).map(glow::NativeTexture)
}

fn native_shader(handle: ShaderHandle) -> Option<glow::NativeShader> {
    NonZeroU32::new(handle.0).map(glow::NativeShader)
}

fn native_program(handle: ProgramHandle) -> Option<glow::NativeProgram> {
    NonZeroU32::new(handle.0).map(glow::NativeProgram)
}

impl GlGraphicsDevice {
    /// Wrap a context that is current on the calling thread
    pub fn new(gl: glow::Context) -> Self {
        unsafe {
            // RGB rows are not 4-byte aligned
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
        }
        engine_debug!(SOURCE, "OpenGL device ready");
        Self {
            gl,
            textures: FxHashMap::default(),
            base_binding: None,
            rejected_shaders: FxHashMap::default(),
        }
    }

    /// Underlying context, for draw calls issued outside the resource layer
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Bind `texture` on unit 0 for a parameter or data call
    fn bind_for_edit(&self, texture: glow::NativeTexture) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        }
    }

    /// Put back whatever `bind_texture` left on unit 0
    fn restore_base_binding(&self) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0);
            self.gl.bind_texture(glow::TEXTURE_2D, self.base_binding);
        }
    }
}

impl GraphicsDevice for GlGraphicsDevice {
    // ===== TEXTURES =====

    fn create_texture(&mut self) -> Result<TextureHandle> {
        let texture = unsafe { self.gl.create_texture() }
            .map_err(|e| engine_err!(SOURCE, "glGenTextures failed: {}", e))?;
        Ok(TextureHandle(texture.0.get()))
    }

    fn upload_texture(&mut self, texture: TextureHandle, upload: &TextureUpload<'_>) -> Result<()> {
        let native = native_texture(texture)
            .ok_or_else(|| Error::InvalidResource(format!("cannot upload to {}", texture)))?;
        if upload.data.len() != upload.expected_len() {
            return Err(Error::BackendError(format!(
                "upload of {}x{} {:?} needs {} bytes, got {}",
                upload.width, upload.height, upload.format, upload.expected_len(), upload.data.len()
            )));
        }

        let (internal_format, format) = pixel_format_to_gl(upload.format);
        let mip_levels = match upload.mipmap {
            MipmapMode::None => 1,
            MipmapMode::Generate => full_mip_chain_len(upload.width, upload.height),
        };

        self.bind_for_edit(native);
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format,
                upload.width as i32,
                upload.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                Some(upload.data),
            );
            match upload.mipmap {
                MipmapMode::Generate => {
                    self.gl.generate_mipmap(glow::TEXTURE_2D);
                    self.gl.tex_parameter_i32(
                        glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR_MIPMAP_LINEAR as i32);
                }
                MipmapMode::None => {
                    self.gl.tex_parameter_i32(
                        glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
                }
            }
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        }
        self.restore_base_binding();

        self.textures.insert(texture.0, TextureInfo {
            width: upload.width,
            height: upload.height,
            mip_levels,
        });
        Ok(())
    }

    fn set_texture_wrap(&mut self, texture: TextureHandle, wrap_s: WrapMode, wrap_t: WrapMode) {
        let Some(native) = native_texture(texture) else {
            return;
        };
        self.bind_for_edit(native);
        unsafe {
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap_mode_to_gl(wrap_s));
            self.gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap_mode_to_gl(wrap_t));
        }
        self.restore_base_binding();
    }

    fn bind_texture(&mut self, unit: TextureUnit, texture: Option<TextureHandle>) {
        let native = texture.and_then(native_texture);
        unsafe {
            self.gl.active_texture(texture_unit_to_gl(unit));
            self.gl.bind_texture(glow::TEXTURE_2D, native);
        }
        if unit == TextureUnit::BASE {
            self.base_binding = native;
        }
    }

    fn read_texture_rgba(&mut self, texture: TextureHandle, level: u32) -> Result<Vec<u8>> {
        let native = native_texture(texture)
            .ok_or_else(|| Error::InvalidResource(format!("cannot read {}", texture)))?;
        let info = *self.textures.get(&texture.0)
            .ok_or_else(|| Error::InvalidResource(format!("{} has no uploaded data", texture)))?;
        if level >= info.mip_levels {
            return Err(Error::InvalidResource(format!(
                "{} has {} levels, level {} requested", texture, info.mip_levels, level
            )));
        }

        let width = (info.width >> level).max(1) as usize;
        let height = (info.height >> level).max(1) as usize;
        let mut pixels = vec![0u8; width * height * 4];

        self.bind_for_edit(native);
        unsafe {
            self.gl.get_tex_image(
                glow::TEXTURE_2D,
                level as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(&mut pixels),
            );
        }
        self.restore_base_binding();
        Ok(pixels)
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        let Some(native) = native_texture(texture) else {
            return;
        };
        unsafe { self.gl.delete_texture(native) };
        self.textures.remove(&texture.0);
        if self.base_binding == Some(native) {
            self.base_binding = None;
        }
    }

    // ===== SHADERS AND PROGRAMS =====

    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle> {
        let shader = unsafe { self.gl.create_shader(shader_stage_to_gl(stage)) }
            .map_err(|e| engine_err!(SOURCE, "glCreateShader({}) failed: {}", stage, e))?;
        Ok(ShaderHandle(shader.0.get()))
    }

    fn compile_shader(&mut self, shader: ShaderHandle, source: &ShaderSource) -> bool {
        let Some(native) = native_shader(shader) else {
            return false;
        };
        // glShaderSource takes the bytes as text; invalid UTF-8 fails the compile
        let text = match shader_text(source) {
            Ok(text) => text,
            Err(reason) => {
                self.rejected_shaders.insert(shader.0, reason);
                return false;
            }
        };
        self.rejected_shaders.remove(&shader.0);
        unsafe {
            self.gl.shader_source(native, text);
            self.gl.compile_shader(native);
            self.gl.get_shader_compile_status(native)
        }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        if let Some(reason) = self.rejected_shaders.get(&shader.0) {
            return reason.clone();
        }
        native_shader(shader)
            .map(|native| unsafe { self.gl.get_shader_info_log(native) })
            .unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        if let Some(native) = native_shader(shader) {
            unsafe { self.gl.delete_shader(native) };
        }
        self.rejected_shaders.remove(&shader.0);
    }

    fn create_program(&mut self) -> Result<ProgramHandle> {
        let program = unsafe { self.gl.create_program() }
            .map_err(|e| engine_err!(SOURCE, "glCreateProgram failed: {}", e))?;
        Ok(ProgramHandle(program.0.get()))
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        if let (Some(program), Some(shader)) = (native_program(program), native_shader(shader)) {
            unsafe { self.gl.attach_shader(program, shader) };
        }
    }

    fn link_program(&mut self, program: ProgramHandle) -> bool {
        let Some(native) = native_program(program) else {
            return false;
        };
        unsafe {
            self.gl.link_program(native);
            self.gl.get_program_link_status(native)
        }
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        native_program(program)
            .map(|native| unsafe { self.gl.get_program_info_log(native) })
            .unwrap_or_default()
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        let native = program.and_then(native_program);
        unsafe { self.gl.use_program(native) };
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        if let Some(native) = native_program(program) {
            unsafe { self.gl.delete_program(native) };
        }
    }

    // ===== PROGRAM INPUTS =====

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Location {
        let location = native_program(program)
            .and_then(|native| unsafe { self.gl.get_uniform_location(native, name) });
        Location::from_option(location.map(|l| l.0))
    }

    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Location {
        let location = native_program(program)
            .and_then(|native| unsafe { self.gl.get_attrib_location(native, name) });
        Location::from_option(location)
    }

    fn set_uniform_i32(&mut self, location: Location, value: i32) {
        let Some(index) = location.index() else {
            return;
        };
        let location = glow::NativeUniformLocation(index);
        unsafe { self.gl.uniform_1_i32(Some(&location), value) };
    }

    // ===== DIAGNOSTICS =====

    fn poll_error(&mut self) -> Option<ApiError> {
        let code = unsafe { self.gl.get_error() };
        if code == glow::NO_ERROR {
            return None;
        }
        debug::record_error(code);
        Some(ApiError { code, name: gl_error_name(code) })
    }
}
