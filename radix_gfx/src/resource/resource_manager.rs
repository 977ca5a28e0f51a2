/// Resource set manager
///
/// Owns every texture and program declared in a [`ResourceConfig`],
/// loads them once at startup, and performs the draw-time bind/enable
/// operations. Textures and programs live in slot maps; logical ids map
/// to slot keys.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, Location, LocationKind, TextureUnit};
use crate::shader::{Program, ShaderCompiler, ShaderDiagnostics};
use crate::texture::{Texture, TextureLoader};
use super::config::ResourceConfig;
use super::ids::{ProgramId, TextureId};

const SOURCE: &str = "radix::ResourceManager";

// ===== SLOT MAP KEYS =====

new_key_type! {
    /// Slot of a loaded texture
    pub struct TextureKey;
    /// Slot of a compiled program
    pub struct ProgramKey;
}

// ===== LOAD REPORT =====

/// One resource that did not load cleanly
#[derive(Debug, Clone)]
pub enum LoadFailure {
    /// Texture could not be read, decoded or uploaded; the id stays unbound
    Texture { id: TextureId, error: Error },
    /// Program object could not be created or a source file could not be read
    Program { id: ProgramId, error: Error },
    /// Program exists but did not link; it is kept (unusable for drawing)
    ProgramNotLinked { id: ProgramId, diagnostics: ShaderDiagnostics },
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadFailure::Texture { id, error } => write!(f, "texture '{}': {}", id, error),
            LoadFailure::Program { id, error } => write!(f, "program '{}': {}", id, error),
            LoadFailure::ProgramNotLinked { id, .. } => write!(f, "program '{}': not linked", id),
        }
    }
}

/// Outcome of a load phase
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub textures_loaded: usize,
    pub programs_linked: usize,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// True when every declared resource loaded (and linked)
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: LoadReport) {
        self.textures_loaded += other.textures_loaded;
        self.programs_linked += other.programs_linked;
        self.failures.extend(other.failures);
    }
}

// ===== RESOURCE MANAGER =====

pub struct ResourceManager {
    graphics_device: Arc<Mutex<dyn GraphicsDevice>>,
    config: ResourceConfig,
    textures: SlotMap<TextureKey, Texture>,
    programs: SlotMap<ProgramKey, Program>,
    texture_keys: FxHashMap<TextureId, TextureKey>,
    program_keys: FxHashMap<ProgramId, ProgramKey>,
    textures_loaded: bool,
    shaders_compiled: bool,
    released: bool,
}

fn lock_device<'a>(
    device: &'a Mutex<dyn GraphicsDevice + 'static>,
) -> Result<MutexGuard<'a, dyn GraphicsDevice + 'static>> {
    device.lock()
        .map_err(|_| crate::engine_err!(SOURCE, "Graphics device mutex poisoned"))
}

impl ResourceManager {
    /// Create an empty manager for `config`
    ///
    /// Nothing is loaded until [`load_all`](Self::load_all).
    ///
    /// # Errors
    ///
    /// `InvalidResource` when the configuration declares an id twice or
    /// associates a normal map with an undeclared texture.
    pub fn new(graphics_device: Arc<Mutex<dyn GraphicsDevice>>, config: ResourceConfig) -> Result<Self> {
        config.validate().map_err(|e| {
            crate::engine_error!(SOURCE, "Rejected resource configuration: {}", e);
            e
        })?;

        Ok(Self {
            graphics_device,
            config,
            textures: SlotMap::with_key(),
            programs: SlotMap::with_key(),
            texture_keys: FxHashMap::default(),
            program_keys: FxHashMap::default(),
            textures_loaded: false,
            shaders_compiled: false,
            released: false,
        })
    }

    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    // ===== LOAD PHASE =====

    /// Load every texture, then compile every program
    ///
    /// One bad resource never stops the others; failures are logged and
    /// listed in the report.
    ///
    /// # Errors
    ///
    /// `InitializationFailed` when any part was already loaded.
    pub fn load_all(&mut self) -> Result<LoadReport> {
        if self.released || self.textures_loaded || self.shaders_compiled {
            return Err(Self::already_loaded("load_all"));
        }

        let mut report = self.load_textures()?;
        report.merge(self.compile_shaders()?);

        if report.is_complete() {
            crate::engine_info!(SOURCE, "Loaded {} textures and {} programs",
                report.textures_loaded, report.programs_linked);
        } else {
            crate::engine_warn!(SOURCE, "Loaded {} textures and {} programs, {} failure(s)",
                report.textures_loaded, report.programs_linked, report.failures.len());
        }
        Ok(report)
    }

    /// Load every configured texture
    pub fn load_textures(&mut self) -> Result<LoadReport> {
        if self.released || self.textures_loaded {
            return Err(Self::already_loaded("load_textures"));
        }

        let mut device = lock_device(&self.graphics_device)?;
        self.textures_loaded = true;
        let mut report = LoadReport::default();
        for entry in &self.config.textures {
            let path = self.config.resolve(&entry.path);
            match TextureLoader::load(&mut *device, &path, self.config.channel_policy) {
                Ok(texture) => {
                    let key = self.textures.insert(texture);
                    self.texture_keys.insert(entry.id, key);
                    report.textures_loaded += 1;
                }
                Err(error) => {
                    crate::engine_warn!(SOURCE, "Texture '{}' not loaded: {}", entry.id, error);
                    report.failures.push(LoadFailure::Texture { id: entry.id, error });
                }
            }
        }
        Ok(report)
    }

    /// Compile every configured program
    pub fn compile_shaders(&mut self) -> Result<LoadReport> {
        if self.released || self.shaders_compiled {
            return Err(Self::already_loaded("compile_shaders"));
        }

        let mut device = lock_device(&self.graphics_device)?;
        self.shaders_compiled = true;
        let mut report = LoadReport::default();
        for entry in &self.config.programs {
            let vertex = self.config.resolve(&entry.vertex);
            let fragment = self.config.resolve(&entry.fragment);
            match ShaderCompiler::compile_files(&mut *device, &vertex, &fragment, entry.id.name()) {
                Ok(program) => {
                    if program.is_linked() {
                        report.programs_linked += 1;
                    } else {
                        report.failures.push(LoadFailure::ProgramNotLinked {
                            id: entry.id,
                            diagnostics: program.diagnostics().clone(),
                        });
                    }
                    let key = self.programs.insert(program);
                    self.program_keys.insert(entry.id, key);
                }
                Err(error) => {
                    crate::engine_warn!(SOURCE, "Program '{}' not created: {}", entry.id, error);
                    report.failures.push(LoadFailure::Program { id: entry.id, error });
                }
            }
        }
        Ok(report)
    }

    fn already_loaded(operation: &str) -> Error {
        let message = format!("{}: resources are loaded once per manager", operation);
        crate::engine_error!(SOURCE, "{}", message);
        Error::InitializationFailed(message)
    }

    // ===== DRAW TIME =====

    /// Bind `id` to unit 0, and its normal map (if any) to unit 1
    ///
    /// Unit 1 is left untouched for textures without a normal map.
    pub fn bind_texture(&self, id: TextureId) -> Result<()> {
        let texture = self.texture(id)
            .ok_or_else(|| Error::InvalidResource(format!("texture '{}' is not loaded", id)))?;

        let normal_map = match self.config.normal_maps.get(id) {
            Some(map_id) => {
                let map = self.texture(map_id);
                if map.is_none() {
                    crate::engine_warn!(SOURCE, "Normal map '{}' of '{}' is not loaded", map_id, id);
                }
                map
            }
            None => None,
        };

        let mut device = lock_device(&self.graphics_device)?;
        device.bind_texture(TextureUnit::BASE, Some(texture.handle));
        if let Some(map) = normal_map {
            device.bind_texture(TextureUnit::NORMAL_MAP, Some(map.handle));
        }
        Ok(())
    }

    /// Make `id` the current program and point its samplers at units 0 and 1
    ///
    /// A sampler uniform the program does not declare is skipped.
    pub fn enable_program(&mut self, id: ProgramId) -> Result<()> {
        let key = self.program_key(id)?;
        let program = &mut self.programs[key];
        if !program.is_linked() {
            crate::engine_warn!(SOURCE, "Enabling program '{}' which failed to link", id);
        }

        let mut device = lock_device(&self.graphics_device)?;
        device.use_program(Some(program.handle()));

        let samplers = [
            (&self.config.sampler_uniforms.base, TextureUnit::BASE),
            (&self.config.sampler_uniforms.normal_map, TextureUnit::NORMAL_MAP),
        ];
        for (name, unit) in samplers {
            let location = program.uniform_location(&*device, name);
            if location.is_found() {
                device.set_uniform_i32(location, unit.sampler_value());
            }
        }
        Ok(())
    }

    /// Revert to no active program
    pub fn disable_program(&self) -> Result<()> {
        lock_device(&self.graphics_device)?.use_program(None);
        Ok(())
    }

    /// Cached uniform location of `name` in program `id`
    pub fn uniform_location(&mut self, id: ProgramId, name: &str) -> Result<Location> {
        self.location(id, name, LocationKind::Uniform)
    }

    /// Cached attribute location of `name` in program `id`
    pub fn attribute_location(&mut self, id: ProgramId, name: &str) -> Result<Location> {
        self.location(id, name, LocationKind::Attribute)
    }

    fn location(&mut self, id: ProgramId, name: &str, kind: LocationKind) -> Result<Location> {
        let key = self.program_key(id)?;
        let device = lock_device(&self.graphics_device)?;
        Ok(self.programs[key].location_of(&*device, name, kind))
    }

    // ===== ACCESSORS =====

    pub fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.texture_keys.get(&id).and_then(|key| self.textures.get(*key))
    }

    pub fn program(&self, id: ProgramId) -> Option<&Program> {
        self.program_keys.get(&id).and_then(|key| self.programs.get(*key))
    }

    fn program_key(&self, id: ProgramId) -> Result<ProgramKey> {
        self.program_keys.get(&id).copied()
            .ok_or_else(|| Error::InvalidResource(format!("program '{}' is not loaded", id)))
    }

    /// True once both textures and programs went through their load phase,
    /// until [`release_all`](Self::release_all)
    pub fn is_loaded(&self) -> bool {
        !self.released && self.textures_loaded && self.shaders_compiled
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    // ===== SHUTDOWN =====

    /// Delete every GPU texture and program
    ///
    /// Call before the graphics context goes away. Ids no longer resolve
    /// afterwards, and the manager cannot load again.
    pub fn release_all(&mut self) -> Result<()> {
        let mut device = lock_device(&self.graphics_device)?;
        device.use_program(None);
        for (_, texture) in self.textures.drain() {
            device.delete_texture(texture.handle);
        }
        for (_, program) in self.programs.drain() {
            device.delete_program(program.handle());
        }
        self.texture_keys.clear();
        self.program_keys.clear();
        self.released = true;

        crate::engine_info!(SOURCE, "Released all GPU resources");
        Ok(())
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
