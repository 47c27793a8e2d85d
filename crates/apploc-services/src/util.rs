use crate::Result;
use apploc_domain::Manifest;
use apploc_keytree::Tree;
use std::fs;
use std::path::Path;

/// Lowercase a remote locale code and keep at most the first two subtags,
/// collapsing a second subtag that merely repeats the language: `fr-FR`
/// becomes `fr`, `en-US` stays `en-us`, `zh-Hant-TW` becomes `zh-hant`.
pub fn locale_file_stem(locale: &str) -> String {
    let lowered = locale.to_ascii_lowercase();
    let mut parts = lowered.split('-');
    let language = parts.next().unwrap_or_default();
    match parts.next() {
        Some(region) if region == language => language.to_string(),
        Some(region) => format!("{language}-{region}"),
        None => language.to_string(),
    }
}

/// App name declared in `manifest.json`, if the file parses and the name is non-empty.
pub fn manifest_app_name(app_dir: &Path) -> Option<String> {
    let raw = fs::read_to_string(app_dir.join("manifest.json")).ok()?;
    let manifest: Manifest = serde_json::from_str(&raw).ok()?;
    manifest.name.filter(|name| !name.is_empty())
}

pub fn read_source_tree(app_dir: &Path) -> Result<Tree> {
    let raw = fs::read_to_string(app_dir.join("translations").join("en.json"))?;
    let tree: Tree = serde_json::from_str(&raw)?;
    Ok(tree)
}

/// Serialize fully in memory first, then write in a single shot so a failed
/// run never leaves a truncated catalog behind.
pub fn write_pretty_json(path: &Path, tree: &Tree) -> Result<()> {
    let mut body = serde_json::to_string_pretty(tree)?;
    body.push('\n');
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)?;
    Ok(())
}
