//! Hygiene: enforces coding standards at test time
//!
//! Scans the crate's production sources for patterns that crash the WASM
//! module, drop errors on the floor, or bypass the logging facade. Each
//! pattern has a budget. Budgets only go down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    hint: &'static str,
}

// Panics: these abort the WASM module.
const UNWRAP: Budget = Budget { pattern: ".unwrap()", max: 0, hint: "propagate with ? or match" };
const EXPECT: Budget = Budget { pattern: ".expect(", max: 0, hint: "propagate with ? or match" };
const PANIC: Budget = Budget { pattern: "panic!(", max: 0, hint: "return an error" };
const UNREACHABLE: Budget = Budget { pattern: "unreachable!(", max: 0, hint: "make the match exhaustive" };
const TODO: Budget = Budget { pattern: "todo!(", max: 0, hint: "finish the stub" };
const UNIMPLEMENTED: Budget = Budget { pattern: "unimplemented!(", max: 0, hint: "finish the stub" };

// Silent loss: discards errors without inspecting.
const SILENT_DISCARD: Budget = Budget { pattern: "let _ =", max: 0, hint: "log or return the error" };
const DOT_OK: Budget = Budget { pattern: ".ok()", max: 0, hint: "log or return the error" };

// Style / structure.
const ALLOW_DEAD_CODE: Budget = Budget { pattern: "#[allow(dead_code)]", max: 0, hint: "delete the dead code" };
const PRINTLN: Budget = Budget { pattern: "println!(", max: 0, hint: "use leptos::logging" };

// Rendering: the app is mounted client-side; nothing renders it on a server.
const HYDRATE_BODY: Budget = Budget { pattern: "hydrate_body(", max: 0, hint: "mount with mount_to_body" };
const HYDRATION_SCRIPTS: Budget = Budget { pattern: "HydrationScripts", max: 0, hint: "index.html is the shell" };

struct SourceFile {
    path: String,
    content: String,
}

/// Collect production `.rs` files from `src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") || path_str.ends_with("test_support.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn count_in_source(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn check(budget: &Budget) {
    let files = source_files();
    assert!(!files.is_empty(), "no sources found under src/; run from the crate root");
    let hits = count_in_source(&files, budget.pattern);
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits
        .iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(
        count <= budget.max,
        "`{}` budget exceeded: found {count}, max {} ({}).\n{listing}",
        budget.pattern,
        budget.max,
        budget.hint
    );
}

#[test]
fn unwrap_budget() {
    check(&UNWRAP);
}

#[test]
fn expect_budget() {
    check(&EXPECT);
}

#[test]
fn panic_budget() {
    check(&PANIC);
}

#[test]
fn unreachable_budget() {
    check(&UNREACHABLE);
}

#[test]
fn todo_budget() {
    check(&TODO);
}

#[test]
fn unimplemented_budget() {
    check(&UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    check(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&DOT_OK);
}

#[test]
fn allow_dead_code_budget() {
    check(&ALLOW_DEAD_CODE);
}

#[test]
fn println_budget() {
    check(&PRINTLN);
}

#[test]
fn hydrate_body_budget() {
    check(&HYDRATE_BODY);
}

#[test]
fn hydration_scripts_budget() {
    check(&HYDRATION_SCRIPTS);
}

#[test]
fn manifest_builds_client_side_rendering_only() {
    let manifest = fs::read_to_string("Cargo.toml").unwrap_or_default();
    assert!(manifest.contains("\"leptos/csr\""), "csr feature must enable leptos/csr");
    for stale in ["leptos/ssr", "leptos/hydrate", "wasm-bindgen-futures"] {
        assert!(!manifest.contains(stale), "Cargo.toml still mentions {stale}");
    }
    let page = fs::read_to_string("index.html").unwrap_or_default();
    assert!(page.contains(r#"data-cargo-features="csr""#), "index.html must build the csr feature");
}
