/*!
# Radix Graphics

GPU resource layer of the Radix renderer.

This crate loads image files into texture objects, compiles vertex+fragment
shader pairs into programs, and binds texture sets and sampler uniforms at
draw time. It is written against the [`GraphicsDevice`](radix::GraphicsDevice)
trait, an immediate-mode, handle-based graphics API boundary; the OpenGL
implementation lives in `radix_gfx_renderer_gl`.

## Architecture

- **ShaderSource / ShaderCompiler**: read shader files and build linked programs
- **LocationCache**: per-program uniform and attribute locations, queried once
- **ImageData / TextureLoader**: decode images and upload them with mipmaps
- **ResourceManager**: owns every texture and program declared in a `ResourceConfig`
- **Engine**: global logging sink shared by all of the above
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod graphics_device;
pub mod shader;
pub mod texture;
pub mod resource;

#[cfg(test)]
mod test_utils;

// Main radix namespace module
pub mod radix {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging hub
    pub use crate::engine::Engine;

    // Graphics API boundary
    pub use crate::graphics_device::GraphicsDevice;

    // Logging sub-module (types only, macros live at the crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger, format_entry};
    }

    // Device sub-module with handles, formats and the trait
    pub mod device {
        pub use crate::graphics_device::*;
    }

    // Shader sub-module
    pub mod shader {
        pub use crate::shader::*;
    }

    // Texture sub-module
    pub mod texture {
        pub use crate::texture::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }
}
