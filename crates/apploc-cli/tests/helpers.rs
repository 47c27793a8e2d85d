//! Shared helpers for the CLI integration tests.

#![allow(dead_code)]

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command;

/// Убираем ANSI CSI-последовательности, чтобы сравнение строк не зависело от цвета.
pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !has_ansi(s) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' && matches!(chars.peek(), Some('[')) {
            chars.next();
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }
    Cow::Owned(out)
}

pub fn has_ansi(s: &str) -> bool {
    s.contains('\u{1b}')
}

/// One message from `i18n/<locale>/apploc.ftl`; the caller decides about the
/// en fallback.
pub fn read_ftl_message(i18n_dir: &Path, locale: &str, key: &str) -> Option<String> {
    let content = std::fs::read_to_string(i18n_dir.join(locale).join("apploc.ftl")).ok()?;
    ftl_map(&content).remove(key)
}

/// The full key/value map of a locale's user-facing catalog.
pub fn get_map(i18n_dir: &Path, locale: &str) -> BTreeMap<String, String> {
    std::fs::read_to_string(i18n_dir.join(locale).join("apploc.ftl"))
        .map(|content| ftl_map(&content))
        .unwrap_or_default()
}

// Каталоги проекта однострочные, поэтому парсер нарочно простой.
fn ftl_map(content: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            map.insert(key.trim().to_string(), value.trim().to_string());
        }
    }
    map
}

pub fn assert_contains_with_context(haystack: &str, needle: &str, context: &str) {
    assert!(
        haystack.contains(needle),
        "{context}\n--- expected fragment ---\n{needle}\n--- actual output ---\n{haystack}"
    );
}

pub fn assert_no_ansi(s: &str, context: &str) {
    assert!(!has_ansi(s), "{context}\n--- actual output ---\n{s}");
}

/// Runs the built binary directly; used where assert_cmd's builder would get
/// in the way of looping over locales.
pub fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_apploc-cli"))
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to spawn apploc-cli: {e}"));
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}
