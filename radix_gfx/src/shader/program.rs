/// Linked shader program and its compile/link diagnostics

use std::fmt;

use crate::graphics_device::{GraphicsDevice, Location, LocationKind, ProgramHandle};
use crate::shader::LocationCache;

/// Logs captured while building a program
///
/// Any of them may be non-empty even when the program linked (warnings).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderDiagnostics {
    pub vertex_log: String,
    pub fragment_log: String,
    pub link_log: String,
}

impl ShaderDiagnostics {
    /// True when neither the compiler nor the linker said anything
    pub fn is_empty(&self) -> bool {
        self.vertex_log.is_empty() && self.fragment_log.is_empty() && self.link_log.is_empty()
    }
}

impl fmt::Display for ShaderDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sections = [
            ("vertex", &self.vertex_log),
            ("fragment", &self.fragment_log),
            ("link", &self.link_log),
        ];
        let mut first = true;
        for (name, log) in sections {
            if log.is_empty() {
                continue;
            }
            if !first {
                writeln!(f)?;
            }
            write!(f, "[{}] {}", name, log)?;
            first = false;
        }
        Ok(())
    }
}

/// A program object created by [`ShaderCompiler`](crate::shader::ShaderCompiler)
///
/// A program that failed to compile or link keeps its handle (it is simply
/// unusable for drawing); check [`is_linked`](Program::is_linked).
#[derive(Debug)]
pub struct Program {
    handle: ProgramHandle,
    label: String,
    linked: bool,
    diagnostics: ShaderDiagnostics,
    locations: LocationCache,
}

impl Program {
    pub(crate) fn new(
        handle: ProgramHandle,
        label: String,
        linked: bool,
        diagnostics: ShaderDiagnostics,
    ) -> Self {
        Self {
            handle,
            label,
            linked,
            diagnostics,
            locations: LocationCache::new(),
        }
    }

    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn diagnostics(&self) -> &ShaderDiagnostics {
        &self.diagnostics
    }

    pub fn location_cache(&self) -> &LocationCache {
        &self.locations
    }

    /// Location of `name` in the given namespace, queried once then cached
    ///
    /// Returns `Location::NOT_FOUND` for names the program does not declare.
    pub fn location_of(
        &mut self,
        device: &dyn GraphicsDevice,
        name: &str,
        kind: LocationKind,
    ) -> Location {
        let handle = self.handle;
        self.locations.get_or_query(kind, name, |name| match kind {
            LocationKind::Uniform => device.uniform_location(handle, name),
            LocationKind::Attribute => device.attribute_location(handle, name),
        })
    }

    pub fn uniform_location(&mut self, device: &dyn GraphicsDevice, name: &str) -> Location {
        self.location_of(device, name, LocationKind::Uniform)
    }

    pub fn attribute_location(&mut self, device: &dyn GraphicsDevice, name: &str) -> Location {
        self.location_of(device, name, LocationKind::Attribute)
    }
}
