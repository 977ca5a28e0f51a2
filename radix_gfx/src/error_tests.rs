//! Unit tests for error.rs
//!
//! Tests all Error variants and their implementations (Display, Debug, Clone, std::error::Error).

use crate::error::{Error, Result};
use std::path::Path;

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_io_error_display() {
    let err = Error::Io {
        path: "shaders/wall.vert".to_string(),
        message: "No such file or directory".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("I/O error"));
    assert!(display.contains("shaders/wall.vert"));
    assert!(display.contains("No such file or directory"));
}

#[test]
fn test_io_error_from_std() {
    let std_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err = Error::io(Path::new("textures/acid.png"), &std_err);
    match err {
        Error::Io { path, message } => {
            assert_eq!(path, "textures/acid.png");
            assert_eq!(message, "missing");
        }
        other => panic!("expected Io, got {:?}", other),
    }
}

#[test]
fn test_image_decode_display() {
    let err = Error::ImageDecode {
        path: "tiles.png".to_string(),
        message: "bad signature".to_string(),
    };
    let display = format!("{}", err);
    assert!(display.contains("Image decode failed"));
    assert!(display.contains("tiles.png"));
    assert!(display.contains("bad signature"));
}

#[test]
fn test_unsupported_format_display() {
    let err = Error::UnsupportedFormat("1 channel".to_string());
    assert_eq!(format!("{}", err), "Unsupported format: 1 channel");
}

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("glCreateProgram returned 0".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("glCreateProgram returned 0"));
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("Texture 'wall' not found".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("Texture 'wall' not found"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("resources already loaded".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("resources already loaded"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::BackendError("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let err1 = Error::BackendError("test".to_string());
    assert!(format!("{:?}", err1).contains("BackendError"));

    let err2 = Error::UnsupportedFormat("fmt".to_string());
    assert!(format!("{:?}", err2).contains("UnsupportedFormat"));

    let err3 = Error::InvalidResource("resource".to_string());
    assert!(format!("{:?}", err3).contains("InvalidResource"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::Io {
        path: "a".to_string(),
        message: "b".to_string(),
    };
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// RESULT TYPE
// ============================================================================

#[test]
fn test_result_question_mark_propagation() {
    fn inner() -> Result<u32> {
        Err(Error::InvalidResource("nope".to_string()))
    }
    fn outer() -> Result<u32> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(Error::InvalidResource(_))));
}
