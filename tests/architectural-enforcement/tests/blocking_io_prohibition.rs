//! Integration Test: Blocking I/O Prohibition
//!
//! **Policy**: async code in `core` and `tui` MUST NOT use blocking I/O.
//! **Required**: `reqwest` async client, `tokio` primitives.
//! **Acceptable**: plain (non-async) functions such as config loading and
//! log-file setup, called from the sync `main` before the runtime starts,
//! and test code.

use architectural_enforcement::{
    code_part, enclosing_fn, is_in_test_code, rust_sources, FnKind, PRODUCTION_DIRS,
};

/// Test that async production code does not use blocking I/O
#[test]
fn test_no_blocking_io_in_async_code() {
    let violations = find_blocking_io_violations();

    if !violations.is_empty() {
        eprintln!("\nBlocking I/O calls found in async production code:\n");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        eprintln!("\nForbidden inside async fn:");
        eprintln!("  - std::fs::*, std::net::*");
        eprintln!("  - std::process::Command");
        eprintln!("  - reqwest::blocking::*");
        eprintln!("  - std::thread::sleep");

        panic!(
            "\nFound {} blocking I/O violation(s) in production code.",
            violations.len()
        );
    }
}

/// Test that the blocking reqwest client is never imported anywhere
#[test]
fn test_no_blocking_http_client() {
    let offenders: Vec<String> = PRODUCTION_DIRS
        .iter()
        .flat_map(|dir| rust_sources(dir))
        .filter(|file| {
            file.content
                .lines()
                .any(|l| code_part(l).contains("reqwest::blocking"))
        })
        .map(|file| file.path.display().to_string())
        .collect();

    assert!(offenders.is_empty(), "reqwest::blocking used in: {offenders:?}");
}

/// Test that the binary does its startup file I/O before the runtime starts
///
/// Config loading and log-file setup are sync helpers, so the line scan
/// above cannot see them being called from async code. Check the call sites.
#[test]
fn test_startup_io_runs_outside_async_code() {
    let main = rust_sources("tui/src")
        .into_iter()
        .find(|f| f.path.ends_with("main.rs"))
        .expect("tui/src/main.rs exists");
    let lines = main.lines();

    let mut checked = 0;
    for (idx, line) in lines.iter().enumerate() {
        let code = code_part(line);
        if code.trim_start().starts_with("fn ") {
            continue;
        }
        if code.contains("load_config(") || code.contains("init_logging(") {
            checked += 1;
            assert_eq!(
                enclosing_fn(&lines, idx),
                Some(FnKind::Sync),
                "startup I/O called from async code at main.rs:{}",
                idx + 1
            );
        }
    }

    assert!(checked >= 2, "expected config and logging setup in main.rs");
    assert!(
        !main.content.contains("#[tokio::main]"),
        "main must stay sync so startup I/O happens before the runtime"
    );
}

const BLOCKING_PATTERNS: &[(&str, &str)] = &[
    ("std::fs::", "Blocking file I/O"),
    ("std::net::", "Blocking network I/O"),
    ("std::process::Command", "Blocking process I/O"),
    ("thread::sleep", "Blocking sleep"),
];

fn find_blocking_io_violations() -> Vec<String> {
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        for file in rust_sources(dir) {
            let lines = file.lines();
            for (idx, line) in lines.iter().enumerate() {
                let code = code_part(line);

                let Some(&(_, what)) = BLOCKING_PATTERNS.iter().find(|(p, _)| code.contains(p))
                else {
                    continue;
                };

                if is_in_test_code(&lines, idx) {
                    continue;
                }
                if enclosing_fn(&lines, idx) != Some(FnKind::Async) {
                    continue;
                }

                violations.push(format!(
                    "{}:{} - {what}: {}",
                    file.path.display(),
                    idx + 1,
                    line.trim()
                ));
            }
        }
    }

    violations
}
