/// Logical resource identifiers
///
/// Client code names textures and programs by stable ids instead of raw
/// GPU handles. Ids are plain `&'static str` names so they can be declared
/// as constants.

use std::fmt;

/// Logical identifier of a texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(&'static str);

impl TextureId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TextureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Logical identifier of a shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramId(&'static str);

impl ProgramId {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Standard texture identifiers
pub mod catalog {
    use super::TextureId;

    pub const WALL: TextureId = TextureId::new("wall");
    pub const WALL_NMAP: TextureId = TextureId::new("wall-normal-map");
    pub const TILES: TextureId = TextureId::new("tiles");
    pub const TILES_NMAP: TextureId = TextureId::new("tiles-normal-map");
    pub const ACID: TextureId = TextureId::new("acid");
    pub const ACID_NMAP: TextureId = TextureId::new("acid-normal-map");
}
