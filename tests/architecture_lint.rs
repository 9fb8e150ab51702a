//! Architecture enforcement tests.
//!
//! The codec in `src/core` must stay free of I/O, and command handlers must
//! change documents only through the live store. These tests scan the
//! source tree so violations are caught in CI.

use std::fs;
use std::path::Path;

/// Codec modules that must not perform I/O.
const PURE_MODULES: &[&str] = &[
    "src/core/frontmatter.rs",
    "src/core/scan.rs",
    "src/core/types.rs",
];

/// Patterns that indicate I/O or async in a pure module.
const IO_PATTERNS: &[&str] = &["std::fs", "tokio", "std::io", "crate::document", "async fn"];

#[test]
fn codec_modules_do_not_perform_io() {
    let mut violations = Vec::new();

    for module in PURE_MODULES {
        let content = fs::read_to_string(module)
            .unwrap_or_else(|_| panic!("Failed to read {}", module));
        for pattern in IO_PATTERNS {
            if content.contains(pattern) {
                violations.push(format!("{}: uses `{}`", module, pattern));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Codec modules must stay pure:\n{}",
        violations.join("\n")
    );
}

#[test]
fn commands_do_not_write_documents_directly() {
    let command_dir = Path::new("src/cli/commands");
    let mut violations = Vec::new();

    for entry in fs::read_dir(command_dir).expect("Failed to read commands directory") {
        let path = entry.expect("Failed to read entry").path();
        if path.extension().map(|e| e != "rs").unwrap_or(true) {
            continue;
        }

        let filename = path.file_name().unwrap().to_string_lossy().into_owned();
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Failed to read {}", filename));

        for pattern in ["write_text", "fs::write", "frontmatter::assemble"] {
            if content.contains(pattern) {
                violations.push(format!(
                    "{}: uses `{}` - mutations must go through LiveMetadata",
                    filename, pattern
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Command handlers bypass the store:\n{}",
        violations.join("\n")
    );
}
