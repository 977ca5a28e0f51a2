//! Resource set management
//!
//! Logical ids, the load configuration and the manager that owns every
//! texture and program for the lifetime of the graphics context.

mod ids;
mod config;
mod resource_manager;

pub use ids::{TextureId, ProgramId, catalog};
pub use config::{ResourceConfig, TextureEntry, ProgramEntry, NormalMapTable, SamplerUniforms};
pub use resource_manager::{ResourceManager, LoadReport, LoadFailure, TextureKey, ProgramKey};
