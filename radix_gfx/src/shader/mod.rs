//! Shader subsystem
//!
//! Reads shader source files, compiles vertex+fragment pairs into linked
//! programs, and caches per-program uniform/attribute locations.

mod source;
mod compiler;
mod program;
mod location_cache;

pub use source::{ShaderSource, read_shader_source};
pub use compiler::ShaderCompiler;
pub use program::{Program, ShaderDiagnostics};
pub use location_cache::LocationCache;
