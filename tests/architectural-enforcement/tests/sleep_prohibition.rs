//! Integration Test: Sleep Prohibition
//!
//! **Policy**: production code MUST NOT call sleep methods. The TUI paces
//! frames with `tokio::time::interval`; the fetcher waits on I/O only.
//! **Exceptions**: test code.

use architectural_enforcement::{code_part, is_in_test_code, rust_sources, PRODUCTION_DIRS};

#[test]
fn test_no_sleep_in_production_code() {
    let mut violations = Vec::new();

    for dir in PRODUCTION_DIRS {
        for file in rust_sources(dir) {
            let lines = file.lines();
            for (idx, line) in lines.iter().enumerate() {
                let code = code_part(line);
                if !(code.contains("::sleep(") || code.contains(".sleep(")) {
                    continue;
                }
                if is_in_test_code(&lines, idx) {
                    continue;
                }
                violations.push(format!(
                    "{}:{} - {}",
                    file.path.display(),
                    idx + 1,
                    line.trim()
                ));
            }
        }
    }

    if !violations.is_empty() {
        eprintln!("\nSleep calls found in production code:\n");
        for violation in &violations {
            eprintln!("  {violation}");
        }
        eprintln!("\nUse tokio::time::interval for periodic work.");
        panic!("\nFound {} sleep violation(s).", violations.len());
    }
}

#[test]
fn test_render_loop_uses_interval() {
    let app = rust_sources("tui/src")
        .into_iter()
        .find(|f| f.path.ends_with("app.rs"))
        .expect("tui/src/app.rs exists");

    assert!(
        app.content.contains("tokio::time::interval"),
        "the render loop should be paced by an interval"
    );
}
