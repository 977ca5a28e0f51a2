/*!
# Radix Graphics - OpenGL Backend

OpenGL implementation of the `radix_gfx` graphics device, built on `glow`.

The caller creates the window and GL context (glutin, SDL, ...) and hands
the loaded `glow::Context` to [`GlGraphicsDevice::new`].

```no_run
use std::sync::{Arc, Mutex};
use radix_gfx::radix::GraphicsDevice;
use radix_gfx::radix::resource::{ResourceConfig, ResourceManager};
use radix_gfx_renderer_gl::GlGraphicsDevice;

# fn context() -> glow::Context { unimplemented!() }
let device: Arc<Mutex<dyn GraphicsDevice>> =
    Arc::new(Mutex::new(GlGraphicsDevice::new(context())));
let mut resources = ResourceManager::new(device, ResourceConfig::new())?;
resources.load_all()?;
# Ok::<(), radix_gfx::radix::Error>(())
```
*/

mod gl_device;
mod gl_format;
mod debug;

pub use gl_device::GlGraphicsDevice;
pub use gl_format::{
    gl_error_name, pixel_format_to_gl, shader_stage_to_gl, shader_text, texture_unit_to_gl,
    wrap_mode_to_gl,
};

// Re-export debug utilities
pub use debug::{GlErrorStats, get_error_stats, reset_error_stats, print_error_stats_report};
