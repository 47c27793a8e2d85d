use apploc_core::{ApplocError, TransRecord};
use apploc_domain::WireCatalog;
use apploc_keytree::{Tree, APP_PACKAGE_KEY, TITLE_KEY, VALUE_KEY};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a wire catalog from disk and return its entries with their full
/// (prefixed) keys, in file order.
pub fn read_catalog_entries(path: &Path) -> apploc_core::Result<Vec<TransRecord>> {
    let text = fs::read_to_string(path)?;
    let catalog: WireCatalog = serde_yaml::from_str(&text)?;
    Ok(catalog
        .parts
        .into_iter()
        .map(|part| TransRecord {
            key: part.translation.key,
            title: part.translation.title,
            value: part.translation.value,
        })
        .collect())
}

/// Rebuild the nested source tree from wire records.
///
/// Discovers the package from the key set, strips its prefix from every key
/// (anchored; keys under a foreign prefix keep their literal path),
/// unflattens with `{title, value}` record leaves, then re-inserts the
/// plain-string `app.package` leaf. Returns the tree together with the
/// discovered package.
pub fn catalog_to_tree(records: &[TransRecord]) -> Result<(Tree, String), ApplocError> {
    let package =
        apploc_keytree::discover_package(records.iter().map(|r| r.key.as_str()))?.to_string();
    let prefix = apploc_keytree::package_prefix(&package);

    let mut flat = Tree::new();
    for record in records {
        let bare = apploc_keytree::strip_prefix(&record.key, &prefix);
        let mut leaf = Tree::new();
        leaf.insert(TITLE_KEY.to_string(), Value::String(record.title.clone()));
        leaf.insert(VALUE_KEY.to_string(), Value::String(record.value.clone()));
        if flat.insert(bare.to_string(), Value::Object(leaf)).is_some() {
            return Err(ApplocError::ConflictingKey {
                path: bare.to_string(),
            });
        }
    }

    let mut tree = apploc_keytree::unflatten(&flat)?;
    let app = tree
        .entry("app")
        .or_insert_with(|| Value::Object(Tree::new()));
    match app.as_object_mut() {
        Some(app) => {
            app.insert("package".to_string(), Value::String(package.clone()));
        }
        None => {
            return Err(ApplocError::ConflictingKey {
                path: APP_PACKAGE_KEY.to_string(),
            })
        }
    }
    Ok((tree, package))
}
