/// Shader and program handles, shader stages and input locations

use std::fmt;

/// Shader stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Handle to a transient compiled shader object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderHandle(pub u32);

/// Handle to a linked program object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

impl fmt::Display for ProgramHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "program#{}", self.0)
    }
}

/// Location of a named uniform or attribute within one program
///
/// Lookups never fail with an error: a name the program does not
/// declare (or that the linker optimized away) resolves to `NOT_FOUND`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location(pub i32);

impl Location {
    /// Sentinel for "no such input"
    pub const NOT_FOUND: Location = Location(-1);

    /// Build from a backend lookup result
    pub fn from_option(value: Option<u32>) -> Self {
        match value {
            Some(v) => Location(v as i32),
            None => Location::NOT_FOUND,
        }
    }

    /// True when the name resolved
    pub fn is_found(&self) -> bool {
        self.0 >= 0
    }

    /// Location as an unsigned index, `None` for the sentinel
    pub fn index(&self) -> Option<u32> {
        if self.is_found() {
            Some(self.0 as u32)
        } else {
            None
        }
    }
}

/// Namespace a location lookup targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationKind {
    /// `uniform` declarations
    Uniform,
    /// Vertex attributes
    Attribute,
}
