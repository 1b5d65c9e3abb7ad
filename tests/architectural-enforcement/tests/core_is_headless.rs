//! Integration Test: Headless Core
//!
//! **Policy**: `gem3d-core` knows nothing about terminals. Rendering and
//! input belong to the surfaces; the core only exposes state and text.

use std::fs;

use architectural_enforcement::{code_part, rust_sources, workspace_root};

const UI_CRATES: &[&str] = &["ratatui", "crossterm", "tui-", "termion"];

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("core").join("Cargo.toml"))
        .expect("core/Cargo.toml readable");

    let offenders: Vec<&str> = manifest
        .lines()
        .map(|l| l.split('#').next().unwrap_or(l).trim())
        .filter(|l| UI_CRATES.iter().any(|c| l.starts_with(c)))
        .collect();

    assert!(
        offenders.is_empty(),
        "core depends on UI crates: {offenders:?}"
    );
}

#[test]
fn test_core_sources_do_not_use_ui_crates() {
    let mut violations = Vec::new();

    for file in rust_sources("core/src") {
        for (idx, line) in file.content.lines().enumerate() {
            let code = code_part(line);
            if code.contains("ratatui::") || code.contains("crossterm::") {
                violations.push(format!("{}:{}", file.path.display(), idx + 1));
            }
        }
    }

    assert!(violations.is_empty(), "UI imports in core: {violations:?}");
}
