/// Shader program compiler
///
/// Builds a program from a vertex+fragment source pair. Compile and link
/// problems are soft failures: they are logged and recorded in the
/// program's diagnostics, and the caller still gets a program handle.
/// Only object creation failures are reported as `Err`.

use std::path::Path;

use crate::error::Result;
use crate::graphics_device::{GraphicsDevice, ShaderHandle, ShaderStage};
use crate::shader::{Program, ShaderDiagnostics, ShaderSource, read_shader_source};

const SOURCE: &str = "radix::ShaderCompiler";

pub struct ShaderCompiler;

impl ShaderCompiler {
    /// Compile and link a vertex+fragment pair
    ///
    /// The two transient shader objects are released once linked.
    pub fn compile(
        device: &mut dyn GraphicsDevice,
        vertex: &ShaderSource,
        fragment: &ShaderSource,
        label: &str,
    ) -> Result<Program> {
        let program = device.create_program()
            .map_err(|e| crate::engine_err!(SOURCE, "Failed to create program '{}': {}", label, e))?;

        let vert = match device.create_shader(ShaderStage::Vertex) {
            Ok(shader) => shader,
            Err(e) => {
                device.delete_program(program);
                crate::engine_bail!(SOURCE, "Failed to create vertex shader for '{}': {}", label, e);
            }
        };
        let frag = match device.create_shader(ShaderStage::Fragment) {
            Ok(shader) => shader,
            Err(e) => {
                device.delete_shader(vert);
                device.delete_program(program);
                crate::engine_bail!(SOURCE, "Failed to create fragment shader for '{}': {}", label, e);
            }
        };

        let (vert_ok, vertex_log) = Self::compile_stage(device, vert, vertex, ShaderStage::Vertex, label);
        let (frag_ok, fragment_log) = Self::compile_stage(device, frag, fragment, ShaderStage::Fragment, label);

        device.attach_shader(program, vert);
        device.attach_shader(program, frag);
        let linked = device.link_program(program);
        let link_log = device.program_info_log(program).trim_end().to_string();

        if !linked {
            crate::engine_error!(SOURCE, "Program '{}' failed to link:\n{}", label, link_log);
        } else if !link_log.is_empty() {
            crate::engine_warn!(SOURCE, "Program '{}' link log:\n{}", label, link_log);
        }

        device.delete_shader(vert);
        device.delete_shader(frag);

        if linked && vert_ok && frag_ok {
            crate::engine_debug!(SOURCE, "Program '{}' linked as {}", label, program);
        }

        Ok(Program::new(
            program,
            label.to_string(),
            linked,
            ShaderDiagnostics { vertex_log, fragment_log, link_log },
        ))
    }

    /// Read both files, then [`compile`](Self::compile)
    pub fn compile_files(
        device: &mut dyn GraphicsDevice,
        vertex_path: &Path,
        fragment_path: &Path,
        label: &str,
    ) -> Result<Program> {
        let vertex = read_shader_source(vertex_path)?;
        let fragment = read_shader_source(fragment_path)?;
        Self::compile(device, &vertex, &fragment, label)
    }

    fn compile_stage(
        device: &mut dyn GraphicsDevice,
        shader: ShaderHandle,
        source: &ShaderSource,
        stage: ShaderStage,
        label: &str,
    ) -> (bool, String) {
        let ok = device.compile_shader(shader, source);
        let log = device.shader_info_log(shader).trim_end().to_string();

        if !ok {
            crate::engine_error!(SOURCE, "{} shader '{}' of '{}' failed to compile:\n{}",
                stage, source.label(), label, log);
        } else if !log.is_empty() {
            crate::engine_warn!(SOURCE, "{} shader '{}' of '{}':\n{}",
                stage, source.label(), label, log);
        }
        (ok, log)
    }
}

#[cfg(test)]
#[path = "compiler_tests.rs"]
mod tests;
