use crate::{util, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct PseudoSummary {
    pub out_path: PathBuf,
    pub keys: usize,
}

/// Build the marker locale from `translations/en.json` and write it to
/// `translations/fr.json`, overwriting any previous pseudo-translation.
pub fn pseudotranslate_file(app_dir: &Path) -> Result<PseudoSummary> {
    let tree = util::read_source_tree(app_dir)?;
    let package = apploc_keytree::declared_package(&tree)?.to_string();
    let (pseudo, keys) = apploc_keytree::pseudotranslate(&tree, &package)?;

    let out_path = app_dir.join("translations").join("fr.json");
    util::write_pretty_json(&out_path, &pseudo)?;

    Ok(PseudoSummary { out_path, keys })
}

#[cfg(test)]
mod tests {
    use super::*;
    use apploc_keytree::Tree;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn pseudo_locale_lands_in_fr_json_with_markers() -> Result<()> {
        let dir = tempdir()?;
        let translations = dir.path().join("translations");
        fs::create_dir_all(&translations)?;
        fs::write(
            translations.join("en.json"),
            r#"{
                "app": {
                    "package": "weather",
                    "name": { "title": "Weather App", "value": "A weather forecast app" }
                }
            }"#,
        )?;

        let summary = pseudotranslate_file(dir.path())?;
        assert_eq!(summary.keys, 1);

        let raw = fs::read_to_string(summary.out_path)?;
        let tree: Tree = serde_json::from_str(&raw)?;
        let name = tree
            .get("app")
            .and_then(|app| app.get("name"))
            .expect("app.name survives");
        assert_eq!(
            name.get("title").and_then(|t| t.as_str()),
            Some("Weather App")
        );
        assert_eq!(
            name.get("value").and_then(|v| v.as_str()),
            Some("[日本A weather forecast appéñđ]")
        );
        assert_eq!(
            tree.get("app")
                .and_then(|app| app.get("package"))
                .and_then(|p| p.as_str()),
            Some("weather")
        );
        Ok(())
    }
}
