/// Graphics device module - the immediate-mode graphics API boundary

// Module declarations
pub mod graphics_device;
pub mod texture;
pub mod shader;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use texture::*;
pub use shader::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
