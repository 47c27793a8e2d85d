use crate::{util, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub out_path: PathBuf,
    pub entries: usize,
    pub package: String,
}

/// Convert `translations/en.yml` back into the nested `translations/en.json`.
pub fn import_catalog(app_dir: &Path) -> Result<ImportSummary> {
    let entries =
        apploc_import_yml::read_catalog_entries(&app_dir.join("translations").join("en.yml"))?;
    let (tree, package) = apploc_import_yml::catalog_to_tree(&entries)?;

    let out_path = app_dir.join("translations").join("en.json");
    util::write_pretty_json(&out_path, &tree)?;

    Ok(ImportSummary {
        out_path,
        entries: entries.len(),
        package,
    })
}
