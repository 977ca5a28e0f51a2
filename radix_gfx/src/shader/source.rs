/// Shader source reader
///
/// Loads a shader file into an owned, NUL-terminated buffer. Bytes are kept
/// verbatim: no encoding validation happens here, the backend decides how
/// to hand the text to its compiler.

use std::borrow::Cow;
use std::ffi::CStr;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Owned shader source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    label: String,
    /// File bytes followed by a single NUL terminator
    bytes: Vec<u8>,
}

impl ShaderSource {
    /// Wrap raw bytes, appending the terminator
    pub fn from_bytes(label: impl Into<String>, mut bytes: Vec<u8>) -> Self {
        bytes.push(0);
        Self {
            label: label.into(),
            bytes,
        }
    }

    /// Wrap source text
    pub fn from_text(label: impl Into<String>, text: &str) -> Self {
        Self::from_bytes(label, text.as_bytes().to_vec())
    }

    /// Read a whole file (see [`read_shader_source`])
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        read_shader_source(path)
    }

    /// Where the source came from (file path or caller-provided label)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Source bytes without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    /// Source bytes including the trailing NUL
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    /// C string view for APIs that take `const char*`
    ///
    /// Stops at the first NUL, so a file with an embedded NUL is seen truncated.
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.bytes).unwrap_or_default()
    }

    /// Text view; invalid UTF-8 sequences are replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Length in bytes, terminator excluded
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Read the full contents of a shader file
///
/// # Errors
///
/// `Error::Io` when the file does not exist or cannot be read.
pub fn read_shader_source(path: impl AsRef<Path>) -> Result<ShaderSource> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        crate::engine_error!("radix::ShaderSource", "Failed to read shader '{}': {}", path.display(), e);
        Error::io(path, &e)
    })?;

    crate::engine_trace!("radix::ShaderSource", "Read {} bytes from '{}'", bytes.len(), path.display());
    Ok(ShaderSource::from_bytes(path.display().to_string(), bytes))
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
