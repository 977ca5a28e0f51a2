/// OpenGL error statistics - counts every code reported by `glGetError`
///
/// Counts are process-wide (one GL driver per process) and can be printed
/// as a colored report at shutdown.

use colored::*;
use rustc_hash::FxHashMap;
use std::sync::{Mutex, OnceLock};

use crate::gl_format::gl_error_name;

/// Global error counts, keyed by GL error code
static ERROR_COUNTS: OnceLock<Mutex<FxHashMap<u32, u32>>> = OnceLock::new();

fn counts() -> &'static Mutex<FxHashMap<u32, u32>> {
    ERROR_COUNTS.get_or_init(|| Mutex::new(FxHashMap::default()))
}

/// Snapshot of the error counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlErrorStats {
    /// (code, name, count), sorted by code
    pub errors: Vec<(u32, &'static str, u32)>,
}

impl GlErrorStats {
    pub fn total(&self) -> u32 {
        self.errors.iter().map(|(_, _, count)| count).sum()
    }

    pub fn count(&self, code: u32) -> u32 {
        self.errors.iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, _, count)| *count)
            .unwrap_or(0)
    }
}

/// Count one reported error code
pub(crate) fn record_error(code: u32) {
    if let Ok(mut counts) = counts().lock() {
        *counts.entry(code).or_insert(0) += 1;
    }
}

/// Current error statistics
pub fn get_error_stats() -> GlErrorStats {
    let mut errors: Vec<(u32, &'static str, u32)> = match counts().lock() {
        Ok(counts) => counts.iter()
            .map(|(code, count)| (*code, gl_error_name(*code), *count))
            .collect(),
        Err(_) => Vec::new(),
    };
    errors.sort_by_key(|(code, _, _)| *code);
    GlErrorStats { errors }
}

/// Clear all counters
pub fn reset_error_stats() {
    if let Ok(mut counts) = counts().lock() {
        counts.clear();
    }
}

/// Print the error statistics report
pub fn print_error_stats_report() {
    let stats = get_error_stats();

    if stats.total() == 0 {
        println!("\n{}", "✓ No OpenGL errors".green().bold());
        return;
    }

    println!("\n{}", "=== OpenGL Error Report ===".bright_blue().bold());
    for (code, name, count) in &stats.errors {
        println!("  {} (0x{:04X}) {}", name.red().bold(), code, count);
    }
    println!("  {} {}", "Total:".white().bold(), stats.total());
    println!("{}\n", "===========================".bright_blue().bold());
}

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
