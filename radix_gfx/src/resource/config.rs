//! Resource configuration
//!
//! Declares which textures and shader pairs the resource manager loads,
//! which base textures carry a normal map, and which sampler uniforms
//! receive the texture units.

use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{Error, Result};
use crate::texture::ChannelPolicy;
use super::ids::{catalog, ProgramId, TextureId};

/// One texture to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureEntry {
    pub id: TextureId,
    pub path: PathBuf,
}

/// One vertex+fragment pair to compile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramEntry {
    pub id: ProgramId,
    pub vertex: PathBuf,
    pub fragment: PathBuf,
}

/// Base texture -> companion normal map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalMapTable {
    maps: FxHashMap<TextureId, TextureId>,
}

impl NormalMapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// wall, tiles and acid with their normal maps
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.insert(catalog::WALL, catalog::WALL_NMAP);
        table.insert(catalog::TILES, catalog::TILES_NMAP);
        table.insert(catalog::ACID, catalog::ACID_NMAP);
        table
    }

    /// Associate `normal_map` with `base`, returns the previous association
    pub fn insert(&mut self, base: TextureId, normal_map: TextureId) -> Option<TextureId> {
        self.maps.insert(base, normal_map)
    }

    /// Normal map of `base`, if it has one
    pub fn get(&self, base: TextureId) -> Option<TextureId> {
        self.maps.get(&base).copied()
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextureId, TextureId)> + '_ {
        self.maps.iter().map(|(base, map)| (*base, *map))
    }
}

/// Sampler uniform names set by `enable_program`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerUniforms {
    /// Receives texture unit 0
    pub base: String,
    /// Receives texture unit 1
    pub normal_map: String,
}

impl Default for SamplerUniforms {
    fn default() -> Self {
        Self {
            base: "tex".to_string(),
            normal_map: "nmap".to_string(),
        }
    }
}

/// Everything the resource manager loads at startup
#[derive(Debug, Clone, Default)]
pub struct ResourceConfig {
    /// Relative paths are resolved against this directory
    pub asset_root: Option<PathBuf>,
    pub textures: Vec<TextureEntry>,
    pub programs: Vec<ProgramEntry>,
    pub normal_maps: NormalMapTable,
    pub sampler_uniforms: SamplerUniforms,
    pub channel_policy: ChannelPolicy,
}

impl ResourceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.asset_root = Some(root.into());
        self
    }

    pub fn with_texture(mut self, id: TextureId, path: impl Into<PathBuf>) -> Self {
        self.textures.push(TextureEntry { id, path: path.into() });
        self
    }

    pub fn with_program(
        mut self,
        id: ProgramId,
        vertex: impl Into<PathBuf>,
        fragment: impl Into<PathBuf>,
    ) -> Self {
        self.programs.push(ProgramEntry {
            id,
            vertex: vertex.into(),
            fragment: fragment.into(),
        });
        self
    }

    pub fn with_normal_map(mut self, base: TextureId, normal_map: TextureId) -> Self {
        self.normal_maps.insert(base, normal_map);
        self
    }

    pub fn with_normal_maps(mut self, table: NormalMapTable) -> Self {
        self.normal_maps = table;
        self
    }

    pub fn with_channel_policy(mut self, policy: ChannelPolicy) -> Self {
        self.channel_policy = policy;
        self
    }

    /// `path` joined to the asset root when relative
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.asset_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Reject duplicate ids and normal-map associations to undeclared textures
    pub fn validate(&self) -> Result<()> {
        let mut texture_ids = FxHashSet::default();
        for entry in &self.textures {
            if !texture_ids.insert(entry.id) {
                return Err(Error::InvalidResource(format!("texture '{}' declared twice", entry.id)));
            }
        }

        let mut program_ids = FxHashSet::default();
        for entry in &self.programs {
            if !program_ids.insert(entry.id) {
                return Err(Error::InvalidResource(format!("program '{}' declared twice", entry.id)));
            }
        }

        for (base, map) in self.normal_maps.iter() {
            for id in [base, map] {
                if !texture_ids.contains(&id) {
                    return Err(Error::InvalidResource(format!(
                        "normal map association '{}' -> '{}' names undeclared texture '{}'",
                        base, map, id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
