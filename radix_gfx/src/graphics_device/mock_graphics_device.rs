/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Emulates an immediate-mode API closely enough to test the resource layer:
/// object names start at 1 (0 is the null object), texture bindings are kept
/// per unit, one program is current at a time, and errors queue up until
/// polled.
///
/// Compiler emulation:
/// - a source compiles when it contains `void main`
/// - a `#error` line fails the compile and its text lands in the log
/// - a `#warning` line is reported in the log but does not fail the compile
///
/// The linker fails when a stage is missing or did not compile. Uniforms and
/// attributes are discovered from `uniform` / `attribute` / `in` declarations
/// and numbered in order of first appearance.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::error::{Error, Result};
use crate::graphics_device::{
    ApiError, GraphicsDevice, Location, MipmapMode, PixelFormat, ProgramHandle,
    ShaderHandle, ShaderStage, TextureHandle, TextureUnit, TextureUpload, WrapMode,
    full_mip_chain_len,
};
use crate::shader::ShaderSource;

pub const INVALID_ENUM: ApiError = ApiError { code: 0x0500, name: "GL_INVALID_ENUM" };
pub const INVALID_VALUE: ApiError = ApiError { code: 0x0501, name: "GL_INVALID_VALUE" };
pub const INVALID_OPERATION: ApiError = ApiError { code: 0x0502, name: "GL_INVALID_OPERATION" };
pub const OUT_OF_MEMORY: ApiError = ApiError { code: 0x0505, name: "GL_OUT_OF_MEMORY" };

// ============================================================================
// Mock objects
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct MockTexture {
    pub width: u32,
    pub height: u32,
    /// `None` until data is uploaded
    pub format: Option<PixelFormat>,
    /// Level 0 pixels as uploaded
    pub pixels: Vec<u8>,
    pub mip_levels: u32,
    pub wrap_s: Option<WrapMode>,
    pub wrap_t: Option<WrapMode>,
}

#[derive(Debug, Clone)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub source: String,
    pub compiled: bool,
    pub log: String,
}

#[derive(Debug, Clone, Default)]
pub struct MockProgram {
    pub attached: Vec<ShaderHandle>,
    pub linked: bool,
    pub log: String,
    pub uniforms: Vec<String>,
    pub attributes: Vec<String>,
}

// ============================================================================
// Mock device
// ============================================================================

#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    next_name: u32,
    pub textures: HashMap<u32, MockTexture>,
    pub shaders: HashMap<u32, MockShader>,
    pub programs: HashMap<u32, MockProgram>,
    pub bound_textures: BTreeMap<TextureUnit, TextureHandle>,
    pub current_program: Option<ProgramHandle>,
    /// (program, location) -> value
    pub uniform_values: HashMap<(u32, i32), i32>,
    pub pending_errors: VecDeque<ApiError>,
    /// Error returned by every poll once set (emulates a lost context)
    pub sticky_error: Option<ApiError>,
    /// Number of uniform/attribute location queries served
    pub location_queries: Cell<u32>,
    /// Make `create_texture` fail
    pub fail_texture_creation: bool,
    /// Make `create_program` fail
    pub fail_program_creation: bool,
    /// Every call, in order
    pub commands: Vec<String>,
}

impl MockGraphicsDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_object_name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    pub fn push_error(&mut self, error: ApiError) {
        self.pending_errors.push_back(error);
    }

    pub fn bound_texture(&self, unit: TextureUnit) -> Option<TextureHandle> {
        self.bound_textures.get(&unit).copied()
    }

    pub fn texture(&self, handle: TextureHandle) -> Option<&MockTexture> {
        self.textures.get(&handle.0)
    }

    pub fn program(&self, handle: ProgramHandle) -> Option<&MockProgram> {
        self.programs.get(&handle.0)
    }

    /// Value last written to `name` in `program`, if any
    pub fn uniform_value(&self, program: ProgramHandle, name: &str) -> Option<i32> {
        let index = self.programs.get(&program.0)?.uniforms.iter().position(|u| u == name)?;
        self.uniform_values.get(&(program.0, index as i32)).copied()
    }

    pub fn count_commands(&self, prefix: &str) -> usize {
        self.commands.iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn compile_source(text: &str) -> (bool, String) {
        let mut log = Vec::new();
        let mut ok = true;

        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix("#error") {
                ok = false;
                log.push(format!("ERROR: 0:{}: '#error' :{}", index + 1, rest));
            } else if let Some(rest) = trimmed.strip_prefix("#warning") {
                log.push(format!("WARNING: 0:{}:{}", index + 1, rest));
            }
        }

        if !text.contains("void main") {
            ok = false;
            log.push("ERROR: 0:1: 'main' : function not found".to_string());
        }

        (ok, log.join("\n"))
    }

    /// Names declared with `keyword` (e.g. "uniform sampler2D tex;" -> "tex")
    fn declared_names(text: &str, keywords: &[&str]) -> Vec<String> {
        let mut names = Vec::new();
        for line in text.lines() {
            let statement = line.trim().trim_end_matches(';');
            let tokens: Vec<&str> = statement.split_whitespace().collect();
            if tokens.len() >= 3 && keywords.contains(&tokens[0]) {
                let last = tokens[tokens.len() - 1];
                let name = last.split('[').next().unwrap_or(last);
                names.push(name.to_string());
            }
        }
        names
    }

    fn downsample(rgba: &[u8], width: u32, height: u32) -> (Vec<u8>, u32, u32) {
        let new_w = (width / 2).max(1);
        let new_h = (height / 2).max(1);
        let mut out = Vec::with_capacity((new_w * new_h * 4) as usize);
        for y in 0..new_h {
            for x in 0..new_w {
                for c in 0..4 {
                    let mut sum = 0u32;
                    for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                        let sx = (x * 2 + dx).min(width - 1);
                        let sy = (y * 2 + dy).min(height - 1);
                        sum += rgba[((sy * width + sx) * 4 + c) as usize] as u32;
                    }
                    out.push((sum / 4) as u8);
                }
            }
        }
        (out, new_w, new_h)
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_texture(&mut self) -> Result<TextureHandle> {
        if self.fail_texture_creation {
            return Err(Error::BackendError("mock: texture creation disabled".to_string()));
        }
        let name = self.next_object_name();
        self.textures.insert(name, MockTexture::default());
        self.commands.push(format!("create_texture {}", name));
        Ok(TextureHandle(name))
    }

    fn upload_texture(&mut self, texture: TextureHandle, upload: &TextureUpload<'_>) -> Result<()> {
        self.commands.push(format!("upload_texture {}", texture.0));
        if upload.data.len() != upload.expected_len() {
            return Err(Error::BackendError(format!(
                "mock: upload size mismatch ({} != {})",
                upload.data.len(),
                upload.expected_len()
            )));
        }
        let tex = self.textures.get_mut(&texture.0)
            .ok_or_else(|| Error::InvalidResource(format!("mock: no texture {}", texture.0)))?;
        tex.width = upload.width;
        tex.height = upload.height;
        tex.format = Some(upload.format);
        tex.pixels = upload.data.to_vec();
        tex.mip_levels = match upload.mipmap {
            MipmapMode::None => 1,
            MipmapMode::Generate => full_mip_chain_len(upload.width, upload.height),
        };
        Ok(())
    }

    fn set_texture_wrap(&mut self, texture: TextureHandle, wrap_s: WrapMode, wrap_t: WrapMode) {
        self.commands.push(format!("set_texture_wrap {}", texture.0));
        match self.textures.get_mut(&texture.0) {
            Some(tex) => {
                tex.wrap_s = Some(wrap_s);
                tex.wrap_t = Some(wrap_t);
            }
            None => self.push_error(INVALID_OPERATION),
        }
    }

    fn bind_texture(&mut self, unit: TextureUnit, texture: Option<TextureHandle>) {
        self.commands.push(format!("bind_texture {} {:?}", unit.0, texture.map(|t| t.0)));
        match texture {
            Some(handle) if self.textures.contains_key(&handle.0) => {
                self.bound_textures.insert(unit, handle);
            }
            Some(_) => self.push_error(INVALID_VALUE),
            None => {
                self.bound_textures.remove(&unit);
            }
        }
    }

    fn read_texture_rgba(&mut self, texture: TextureHandle, level: u32) -> Result<Vec<u8>> {
        let tex = self.textures.get(&texture.0)
            .ok_or_else(|| Error::InvalidResource(format!("mock: no texture {}", texture.0)))?;
        let format = tex.format
            .ok_or_else(|| Error::InvalidResource(format!("mock: texture {} has no data", texture.0)))?;
        if level >= tex.mip_levels {
            return Err(Error::InvalidResource(format!(
                "mock: level {} out of range ({} levels)", level, tex.mip_levels
            )));
        }

        let mut rgba = match format {
            PixelFormat::Rgba8 => tex.pixels.clone(),
            PixelFormat::Rgb8 => tex.pixels
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 255])
                .collect(),
        };
        let (mut w, mut h) = (tex.width, tex.height);
        for _ in 0..level {
            let (next, nw, nh) = Self::downsample(&rgba, w, h);
            rgba = next;
            w = nw;
            h = nh;
        }
        Ok(rgba)
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.commands.push(format!("delete_texture {}", texture.0));
        self.textures.remove(&texture.0);
        self.bound_textures.retain(|_, bound| *bound != texture);
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Result<ShaderHandle> {
        let name = self.next_object_name();
        self.shaders.insert(name, MockShader {
            stage,
            source: String::new(),
            compiled: false,
            log: String::new(),
        });
        self.commands.push(format!("create_shader {} {}", name, stage));
        Ok(ShaderHandle(name))
    }

    fn compile_shader(&mut self, shader: ShaderHandle, source: &ShaderSource) -> bool {
        self.commands.push(format!("compile_shader {}", shader.0));
        let text = source.text().into_owned();
        let (ok, log) = Self::compile_source(&text);
        match self.shaders.get_mut(&shader.0) {
            Some(s) => {
                s.source = text;
                s.compiled = ok;
                s.log = log;
                ok
            }
            None => {
                self.push_error(INVALID_VALUE);
                false
            }
        }
    }

    fn shader_info_log(&self, shader: ShaderHandle) -> String {
        self.shaders.get(&shader.0).map(|s| s.log.clone()).unwrap_or_default()
    }

    fn delete_shader(&mut self, shader: ShaderHandle) {
        self.commands.push(format!("delete_shader {}", shader.0));
        // Attached shaders stay alive until their program goes away
        let attached = self.programs.values().any(|p| p.attached.contains(&shader));
        if !attached {
            self.shaders.remove(&shader.0);
        }
    }

    fn create_program(&mut self) -> Result<ProgramHandle> {
        if self.fail_program_creation {
            return Err(Error::BackendError("mock: program creation disabled".to_string()));
        }
        let name = self.next_object_name();
        self.programs.insert(name, MockProgram::default());
        self.commands.push(format!("create_program {}", name));
        Ok(ProgramHandle(name))
    }

    fn attach_shader(&mut self, program: ProgramHandle, shader: ShaderHandle) {
        self.commands.push(format!("attach_shader {} {}", program.0, shader.0));
        match self.programs.get_mut(&program.0) {
            Some(p) => p.attached.push(shader),
            None => self.push_error(INVALID_VALUE),
        }
    }

    fn link_program(&mut self, program: ProgramHandle) -> bool {
        self.commands.push(format!("link_program {}", program.0));
        let Some(attached) = self.programs.get(&program.0).map(|p| p.attached.clone()) else {
            self.push_error(INVALID_VALUE);
            return false;
        };

        let mut problems = Vec::new();
        let mut uniforms: Vec<String> = Vec::new();
        let mut attributes: Vec<String> = Vec::new();
        for stage in [ShaderStage::Vertex, ShaderStage::Fragment] {
            let shader = attached.iter()
                .filter_map(|h| self.shaders.get(&h.0))
                .find(|s| s.stage == stage);
            match shader {
                None => problems.push(format!("error: no {} shader attached", stage)),
                Some(s) if !s.compiled => {
                    problems.push(format!("error: {} shader failed to compile", stage))
                }
                Some(s) => {
                    for name in Self::declared_names(&s.source, &["uniform"]) {
                        if !uniforms.contains(&name) {
                            uniforms.push(name);
                        }
                    }
                    if stage == ShaderStage::Vertex {
                        for name in Self::declared_names(&s.source, &["attribute", "in"]) {
                            if !attributes.contains(&name) {
                                attributes.push(name);
                            }
                        }
                    }
                }
            }
        }

        let linked = problems.is_empty();
        if let Some(p) = self.programs.get_mut(&program.0) {
            p.linked = linked;
            p.log = problems.join("\n");
            if linked {
                p.uniforms = uniforms;
                p.attributes = attributes;
            }
        }
        linked
    }

    fn program_info_log(&self, program: ProgramHandle) -> String {
        self.programs.get(&program.0).map(|p| p.log.clone()).unwrap_or_default()
    }

    fn use_program(&mut self, program: Option<ProgramHandle>) {
        self.commands.push(format!("use_program {:?}", program.map(|p| p.0)));
        match program {
            Some(handle) if self.programs.contains_key(&handle.0) => {
                self.current_program = Some(handle);
            }
            Some(_) => self.push_error(INVALID_VALUE),
            None => self.current_program = None,
        }
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.commands.push(format!("delete_program {}", program.0));
        if let Some(p) = self.programs.remove(&program.0) {
            for shader in p.attached {
                self.shaders.remove(&shader.0);
            }
        }
        if self.current_program == Some(program) {
            self.current_program = None;
        }
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Location {
        self.location_queries.set(self.location_queries.get() + 1);
        let index = self.programs.get(&program.0)
            .filter(|p| p.linked)
            .and_then(|p| p.uniforms.iter().position(|u| u == name));
        Location::from_option(index.map(|i| i as u32))
    }

    fn attribute_location(&self, program: ProgramHandle, name: &str) -> Location {
        self.location_queries.set(self.location_queries.get() + 1);
        let index = self.programs.get(&program.0)
            .filter(|p| p.linked)
            .and_then(|p| p.attributes.iter().position(|a| a == name));
        Location::from_option(index.map(|i| i as u32))
    }

    fn set_uniform_i32(&mut self, location: Location, value: i32) {
        self.commands.push(format!("set_uniform_i32 {} {}", location.0, value));
        let Some(program) = self.current_program else {
            self.push_error(INVALID_OPERATION);
            return;
        };
        // Writes to -1 are silently ignored, as the real API does
        if location.is_found() {
            self.uniform_values.insert((program.0, location.0), value);
        }
    }

    fn poll_error(&mut self) -> Option<ApiError> {
        if let Some(error) = self.sticky_error {
            return Some(error);
        }
        self.pending_errors.pop_front()
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
