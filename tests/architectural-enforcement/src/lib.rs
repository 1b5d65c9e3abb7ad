//! Architectural Enforcement Integration Tests
//!
//! This package contains integration tests that enforce architectural principles:
//! - No blocking I/O inside async code
//! - No sleep() calls in production code (the render loop ticks on an interval)
//! - `gem3d-core` stays headless: no terminal or UI crates
//!
//! The helpers below are shared source scanners. They are line based and
//! deliberately simple; they only need to be right for code written in this
//! workspace's style.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root (two levels above this package)
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Production source directories scanned by the checks
pub const PRODUCTION_DIRS: &[&str] = &["core/src", "tui/src"];

/// A Rust source file, loaded
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn lines(&self) -> Vec<&str> {
        self.content.lines().collect()
    }
}

/// Every `.rs` file under `dir` (relative to the workspace root)
pub fn rust_sources(dir: &str) -> Vec<SourceFile> {
    let root = workspace_root().join(dir);
    assert!(root.exists(), "missing source directory: {}", root.display());

    walkdir::WalkDir::new(&root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .filter_map(|e| {
            let content = fs::read_to_string(e.path()).ok()?;
            Some(SourceFile {
                path: e.path().to_path_buf(),
                content,
            })
        })
        .collect()
}

/// Strip a trailing `//` comment
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Kind of the function a line sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnKind {
    Sync,
    Async,
}

fn fn_signature(line: &str) -> Option<FnKind> {
    let line = line.trim();
    let is_fn = line.starts_with("fn ") || line.contains(" fn ");
    if !is_fn {
        return None;
    }
    Some(if line.contains("async fn ") {
        FnKind::Async
    } else {
        FnKind::Sync
    })
}

/// Nearest function signature above `current_idx`, stopping at module/impl boundaries
pub fn enclosing_fn(lines: &[&str], current_idx: usize) -> Option<FnKind> {
    for i in (0..current_idx).rev() {
        let line = lines[i].trim();

        if let Some(kind) = fn_signature(line) {
            return Some(kind);
        }

        // Stop at module boundaries
        if line.starts_with("mod ") || (line.starts_with("impl") && line.contains('{')) {
            return None;
        }
    }
    None
}

/// Whether `current_idx` is inside a `#[cfg(test)]` module or a test function
pub fn is_in_test_code(lines: &[&str], current_idx: usize) -> bool {
    if lines[..current_idx]
        .iter()
        .any(|l| l.trim().starts_with("#[cfg(test)]"))
    {
        return true;
    }

    // Scan back to the enclosing function, then look at its attributes
    let Some(fn_idx) = (0..current_idx)
        .rev()
        .find(|&i| fn_signature(lines[i]).is_some())
    else {
        return false;
    };

    for i in (0..fn_idx).rev() {
        let line = lines[i].trim();
        if line.starts_with("#[test]") || line.starts_with("#[tokio::test") {
            return true;
        }
        if !line.starts_with("#[") && !line.starts_with("///") {
            break;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enclosing_fn_kinds() {
        let code = [
            "pub async fn fetch() {",
            "    let x = 1;",
            "}",
            "pub fn load() -> Result<()> {",
            "    let y = 2;",
            "}",
        ];
        assert_eq!(enclosing_fn(&code, 1), Some(FnKind::Async));
        assert_eq!(enclosing_fn(&code, 4), Some(FnKind::Sync));
        assert_eq!(enclosing_fn(&code, 0), None);
    }

    #[test]
    fn test_test_code_detection() {
        let code = [
            "fn helper() {}",
            "#[tokio::test]",
            "async fn test_x() {",
            "    work().await;",
            "}",
        ];
        assert!(!is_in_test_code(&code, 0));
        assert!(is_in_test_code(&code, 3));

        let module = ["#[cfg(test)]", "mod tests {", "    fn f() { g(); }", "}"];
        assert!(is_in_test_code(&module, 2));
    }

    #[test]
    fn test_code_part_strips_comments() {
        assert_eq!(code_part("let a = 1; // std::fs"), "let a = 1; ");
    }

    #[test]
    fn test_workspace_root_has_members() {
        let root = workspace_root();
        assert!(root.join("core").join("Cargo.toml").exists());
        assert!(root.join("tui").join("Cargo.toml").exists());
    }
}
