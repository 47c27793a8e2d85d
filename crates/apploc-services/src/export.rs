use crate::{util, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub out_path: PathBuf,
    pub records: usize,
    pub package: String,
}

/// Convert `translations/en.json` into the translator-facing `translations/en.yml`.
pub fn export_catalog(app_dir: &Path, app_name: &str) -> Result<ExportSummary> {
    let tree = util::read_source_tree(app_dir)?;
    let package = apploc_keytree::declared_package(&tree)?.to_string();
    let records = apploc_keytree::pair(&tree, &tree)?;

    let out_path = app_dir.join("translations").join("en.yml");
    apploc_export_yml::write_catalog(&out_path, app_name, &package, &records)?;

    Ok(ExportSummary {
        out_path,
        records: records.len(),
        package,
    })
}
