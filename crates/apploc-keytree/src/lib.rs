//! Pure tree transforms between nested translation catalogs and the flat
//! dot-delimited key space of the translation platform.

use std::collections::HashSet;
use std::sync::OnceLock;

use apploc_core::{ApplocError, TransRecord};
use regex::Regex;
use serde_json::Value;

/// Nested (or flat) catalog mapping. Insertion-ordered so serialized output
/// stays diff-friendly.
pub type Tree = serde_json::Map<String, Value>;

/// Namespace key selecting the human-label half of a dual-keyed tree.
pub const TITLE_KEY: &str = "title";
/// Namespace key selecting the localizable-string half.
pub const VALUE_KEY: &str = "value";
/// Structural leaf naming the app package; never paired, never decorated.
pub const APP_PACKAGE_KEY: &str = "app.package";

/// Pseudo-translation markers. Deliberately non-ASCII so undecorated strings
/// stand out when rendered.
pub const PSEUDO_PREFIX: &str = "[日本";
pub const PSEUDO_SUFFIX: &str = "éñđ]";

/// Flatten a nested tree into a mapping from dot-joined paths to leaves.
///
/// Traversal is depth-first in insertion order. Two tree positions emitting
/// the same flat path (a literal dotted key shadowing a nested one) fail
/// with `ConflictingKey` instead of silently keeping one value. Empty
/// subtrees contribute no paths.
pub fn flatten(tree: &Tree) -> Result<Tree, ApplocError> {
    let mut flat = Tree::new();
    flatten_into(tree, None, &mut flat)?;
    Ok(flat)
}

fn flatten_into(node: &Tree, prefix: Option<&str>, out: &mut Tree) -> Result<(), ApplocError> {
    for (key, value) in node {
        let path = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(child) => flatten_into(child, Some(&path), out)?,
            leaf => {
                if out.insert(path.clone(), leaf.clone()).is_some() {
                    return Err(ApplocError::ConflictingKey { path });
                }
            }
        }
    }
    Ok(())
}

/// Flatten only the `namespace` half of a dual-keyed tree.
///
/// A child map that contains `namespace` contributes its `namespace` entry
/// at the current path; any other map is recursed into. Plain leaves
/// (e.g. `app.package`) have no title/value halves and are dropped.
pub fn namespaced_leaves(tree: &Tree, namespace: &str) -> Result<Tree, ApplocError> {
    let mut flat = Tree::new();
    namespaced_into(tree, namespace, None, &mut flat)?;
    Ok(flat)
}

fn namespaced_into(
    node: &Tree,
    namespace: &str,
    prefix: Option<&str>,
    out: &mut Tree,
) -> Result<(), ApplocError> {
    for (key, value) in node {
        let Value::Object(child) = value else {
            continue;
        };
        let path = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        if let Some(half) = child.get(namespace) {
            if out.insert(path.clone(), half.clone()).is_some() {
                return Err(ApplocError::ConflictingKey { path });
            }
        } else {
            namespaced_into(child, namespace, Some(&path), out)?;
        }
    }
    Ok(())
}

/// Rebuild a nested tree from a flat mapping.
///
/// Splits every key on `.`, creating intermediate maps as needed. A path
/// used both as a leaf and as an intermediate node (`a.b` next to `a.b.c`,
/// in either insertion order) fails with `ConflictingKey`. Leaves may be
/// any non-map value or a `{title, value}` record object.
pub fn unflatten(flat: &Tree) -> Result<Tree, ApplocError> {
    let mut root = Tree::new();
    let mut leaf_paths: HashSet<&str> = HashSet::new();

    for (flat_key, leaf) in flat {
        let segments: Vec<&str> = flat_key.split('.').collect();
        let Some((last, parents)) = segments.split_last() else {
            continue;
        };

        let mut node = &mut root;
        let mut walked = String::with_capacity(flat_key.len());
        for segment in parents {
            if !walked.is_empty() {
                walked.push('.');
            }
            walked.push_str(segment);
            if leaf_paths.contains(walked.as_str()) {
                return Err(ApplocError::ConflictingKey { path: walked });
            }
            let slot = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Tree::new()));
            node = match slot.as_object_mut() {
                Some(child) => child,
                None => return Err(ApplocError::ConflictingKey { path: walked }),
            };
        }

        if node.contains_key(*last) {
            return Err(ApplocError::ConflictingKey {
                path: flat_key.clone(),
            });
        }
        node.insert((*last).to_string(), leaf.clone());
        leaf_paths.insert(flat_key.as_str());
    }

    Ok(root)
}

/// The flat-key namespace prefix for one app package.
pub fn package_prefix(package: &str) -> String {
    format!("txt.apps.{package}.")
}

/// Remove a leading `prefix` from `key`, anchored to the start; unmatched
/// keys pass through unchanged. Interior occurrences are never touched.
pub fn strip_prefix<'a>(key: &'a str, prefix: &str) -> &'a str {
    key.strip_prefix(prefix).unwrap_or(key)
}

/// Prepend the namespace prefix for `package` to a bare flat key.
pub fn apply_prefix(key: &str, package: &str) -> String {
    format!("txt.apps.{package}.{key}")
}

/// Extract the package segment from a fully prefixed key: the third
/// dot-delimited segment when the first two are `txt` and `apps`.
pub fn package_from_key(key: &str) -> Option<&str> {
    let mut segments = key.split('.');
    match (segments.next(), segments.next(), segments.next()) {
        (Some("txt"), Some("apps"), Some(package)) if !package.is_empty() => Some(package),
        _ => None,
    }
}

/// Discover the package from a wire-format key set: first key carrying the
/// namespace wins; an empty or namespace-free set fails with
/// `MissingPackage`.
pub fn discover_package<'a, I>(keys: I) -> Result<&'a str, ApplocError>
where
    I: IntoIterator<Item = &'a str>,
{
    keys.into_iter()
        .find_map(package_from_key)
        .ok_or(ApplocError::MissingPackage)
}

/// Package names are lowercase ASCII words with underscores, nothing else.
pub fn is_valid_package(name: &str) -> bool {
    static PACKAGE_RE: OnceLock<Regex> = OnceLock::new();
    let re = PACKAGE_RE.get_or_init(|| Regex::new(r"^[a-z_]+$").unwrap());
    re.is_match(name)
}

/// Read the package declared at the literal `app.package` path of a source
/// tree. Missing, non-string or invalid names fail with `MissingConfig`.
pub fn declared_package(tree: &Tree) -> Result<&str, ApplocError> {
    tree.get("app")
        .and_then(Value::as_object)
        .and_then(|app| app.get("package"))
        .and_then(Value::as_str)
        .filter(|package| is_valid_package(package))
        .ok_or(ApplocError::MissingConfig)
}

/// Pair the title and value halves of two parallel trees into flat records.
///
/// Both trees must expose identical path sets; the first path present in
/// only one of them fails fast with `MismatchedPath`. Records keep raw
/// values; the YAML exporter owns escaping.
pub fn pair(titles_tree: &Tree, values_tree: &Tree) -> Result<Vec<TransRecord>, ApplocError> {
    let titles = namespaced_leaves(titles_tree, TITLE_KEY)?;
    let values = namespaced_leaves(values_tree, VALUE_KEY)?;

    for path in values.keys() {
        if !titles.contains_key(path) {
            return Err(ApplocError::MismatchedPath { path: path.clone() });
        }
    }

    let mut records = Vec::with_capacity(titles.len());
    for (path, title) in &titles {
        let value = values
            .get(path)
            .ok_or_else(|| ApplocError::MismatchedPath { path: path.clone() })?;
        records.push(TransRecord {
            key: path.clone(),
            title: leaf_text(title),
            value: leaf_text(value),
        });
    }
    Ok(records)
}

fn leaf_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Decorate every paired value with the pseudo-translation markers while
/// keeping titles byte-identical, then rebuild the nested tree with the
/// untouched `app.package` leaf re-inserted. Returns the tree together with
/// the number of decorated records.
pub fn pseudotranslate(tree: &Tree, package: &str) -> Result<(Tree, usize), ApplocError> {
    let mut flat = Tree::new();
    for record in pair(tree, tree)? {
        let mut leaf = Tree::new();
        leaf.insert(TITLE_KEY.to_string(), Value::String(record.title));
        leaf.insert(
            VALUE_KEY.to_string(),
            Value::String(format!("{PSEUDO_PREFIX}{}{PSEUDO_SUFFIX}", record.value)),
        );
        flat.insert(record.key, Value::Object(leaf));
    }
    let decorated = flat.len();
    flat.insert(
        APP_PACKAGE_KEY.to_string(),
        Value::String(package.to_string()),
    );
    Ok((merge_locale(&flat, "")?, decorated))
}

/// Turn one remote locale payload into a nested tree: strip the package
/// prefix from every key (anchored, passthrough when absent), then
/// unflatten. Two keys collapsing to the same stripped path fail with
/// `ConflictingKey`.
pub fn merge_locale(translations: &Tree, prefix: &str) -> Result<Tree, ApplocError> {
    let mut stripped = Tree::new();
    for (key, value) in translations {
        let bare = strip_prefix(key, prefix);
        if stripped.insert(bare.to_string(), value.clone()).is_some() {
            return Err(ApplocError::ConflictingKey {
                path: bare.to_string(),
            });
        }
    }
    unflatten(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> Tree {
        value.as_object().expect("object literal").clone()
    }

    fn en_fixture() -> Tree {
        tree(json!({
            "app": {
                "package": "weather",
                "name": { "title": "Weather App", "value": "A weather forecast app" },
                "parameters": {
                    "city": { "title": "City", "value": "Name of your city" }
                }
            }
        }))
    }

    #[test]
    fn flatten_then_unflatten_round_trips() {
        let t = tree(json!({
            "app": { "name": "Weather", "settings": { "city": "Berlin" } },
            "greeting": "hello"
        }));
        let flat = flatten(&t).unwrap();
        assert_eq!(flat.get("app.name"), Some(&json!("Weather")));
        assert_eq!(flat.get("app.settings.city"), Some(&json!("Berlin")));
        assert_eq!(flat.get("greeting"), Some(&json!("hello")));
        assert_eq!(unflatten(&flat).unwrap(), t);
    }

    #[test]
    fn flatten_keeps_insertion_order() {
        let t = tree(json!({ "b": { "z": "1", "a": "2" }, "a": "3" }));
        let flat = flatten(&t).unwrap();
        let keys: Vec<&String> = flat.keys().collect();
        assert_eq!(keys, ["b.z", "b.a", "a"]);
    }

    #[test]
    fn flatten_drops_empty_subtrees() {
        let t = tree(json!({ "a": {}, "b": "x" }));
        let flat = flatten(&t).unwrap();
        assert_eq!(flat.len(), 1);
        assert!(flat.contains_key("b"));
    }

    #[test]
    fn flatten_reports_colliding_paths() {
        let t = tree(json!({ "a": { "b": "x" }, "a.b": "y" }));
        let err = flatten(&t).unwrap_err();
        assert!(matches!(err, ApplocError::ConflictingKey { ref path } if path == "a.b"));
    }

    #[test]
    fn unflatten_rejects_leaf_reused_as_scope() {
        let flat = tree(json!({ "a.b": "x", "a.b.c": "y" }));
        let err = unflatten(&flat).unwrap_err();
        assert!(matches!(err, ApplocError::ConflictingKey { ref path } if path == "a.b"));
    }

    #[test]
    fn unflatten_rejects_scope_reused_as_leaf() {
        let flat = tree(json!({ "a.b.c": "y", "a.b": "x" }));
        let err = unflatten(&flat).unwrap_err();
        assert!(matches!(err, ApplocError::ConflictingKey { ref path } if path == "a.b"));
    }

    #[test]
    fn unflatten_accepts_record_leaves() {
        let flat = tree(json!({
            "app.name": { "title": "Weather App", "value": "Forecast" }
        }));
        let t = unflatten(&flat).unwrap();
        assert_eq!(
            t,
            tree(json!({
                "app": { "name": { "title": "Weather App", "value": "Forecast" } }
            }))
        );
    }

    #[test]
    fn namespaced_leaves_picks_one_half_and_drops_plain_leaves() {
        let titles = namespaced_leaves(&en_fixture(), TITLE_KEY).unwrap();
        assert_eq!(titles.get("app.name"), Some(&json!("Weather App")));
        assert_eq!(titles.get("app.parameters.city"), Some(&json!("City")));
        // app.package has no title half and must not leak into the mapping
        assert_eq!(titles.len(), 2);
    }

    #[test]
    fn strip_prefix_is_anchored() {
        assert_eq!(strip_prefix("txt.apps.pkg.a.b", "txt.apps.pkg."), "a.b");
        assert_eq!(strip_prefix("other.key", "txt.apps.pkg."), "other.key");
        // interior occurrences survive, only a leading match is stripped
        assert_eq!(
            strip_prefix("a.txt.apps.pkg.b", "txt.apps.pkg."),
            "a.txt.apps.pkg.b"
        );
    }

    #[test]
    fn apply_then_strip_round_trips() {
        let key = "settings.title";
        let applied = apply_prefix(key, "foo_bar");
        assert_eq!(applied, "txt.apps.foo_bar.settings.title");
        assert_eq!(strip_prefix(&applied, &package_prefix("foo_bar")), key);
    }

    #[test]
    fn package_extraction_parses_segments() {
        assert_eq!(
            package_from_key("txt.apps.foo_bar.settings.title"),
            Some("foo_bar")
        );
        assert_eq!(package_from_key("txt.apps."), None);
        assert_eq!(package_from_key("apps.txt.foo"), None);
        assert_eq!(package_from_key("settings.title"), None);
    }

    #[test]
    fn discover_package_scans_until_first_match() {
        let keys = ["stray.key", "txt.apps.weather.app.name"];
        assert_eq!(discover_package(keys).unwrap(), "weather");

        let err = discover_package(["a.b", "c.d"]).unwrap_err();
        assert!(matches!(err, ApplocError::MissingPackage));
        let err = discover_package([]).unwrap_err();
        assert!(matches!(err, ApplocError::MissingPackage));
    }

    #[test]
    fn package_names_are_lowercase_words() {
        assert!(is_valid_package("foo_bar"));
        assert!(is_valid_package("weather"));
        assert!(!is_valid_package("Foo"));
        assert!(!is_valid_package("foo-bar"));
        assert!(!is_valid_package("foo1"));
        assert!(!is_valid_package(""));
    }

    #[test]
    fn declared_package_requires_a_valid_name() {
        assert_eq!(declared_package(&en_fixture()).unwrap(), "weather");

        let missing = tree(json!({ "app": { "name": { "title": "X", "value": "Y" } } }));
        assert!(matches!(
            declared_package(&missing).unwrap_err(),
            ApplocError::MissingConfig
        ));

        let invalid = tree(json!({ "app": { "package": "Weather-2" } }));
        assert!(matches!(
            declared_package(&invalid).unwrap_err(),
            ApplocError::MissingConfig
        ));
    }

    #[test]
    fn pair_builds_records_without_the_package_leaf() {
        let t = tree(json!({
            "app": {
                "package": "weather",
                "name": { "title": "Weather App", "value": "A weather forecast app" }
            }
        }));
        let records = pair(&t, &t).unwrap();
        assert_eq!(
            records,
            vec![TransRecord {
                key: "app.name".into(),
                title: "Weather App".into(),
                value: "A weather forecast app".into(),
            }]
        );
    }

    #[test]
    fn pair_fails_fast_on_diverging_trees() {
        let titles = tree(json!({ "a": { "title": "A" }, "b": { "title": "B" } }));
        let values = tree(json!({ "a": { "value": "1" } }));
        let err = pair(&titles, &values).unwrap_err();
        assert!(matches!(err, ApplocError::MismatchedPath { ref path } if path == "b"));

        // and in the other direction
        let titles = tree(json!({ "a": { "title": "A" } }));
        let values = tree(json!({ "a": { "value": "1" }, "extra": { "value": "2" } }));
        let err = pair(&titles, &values).unwrap_err();
        assert!(matches!(err, ApplocError::MismatchedPath { ref path } if path == "extra"));
    }

    #[test]
    fn pseudotranslate_decorates_values_and_keeps_structure() {
        let (pseudo, decorated_records) = pseudotranslate(&en_fixture(), "weather").unwrap();
        assert_eq!(decorated_records, 2);

        let app = pseudo.get("app").and_then(Value::as_object).unwrap();
        assert_eq!(app.get("package"), Some(&json!("weather")));

        let name = app.get("name").and_then(Value::as_object).unwrap();
        assert_eq!(name.get("title"), Some(&json!("Weather App")));
        let decorated = name.get("value").and_then(Value::as_str).unwrap();
        assert_eq!(decorated, "[日本A weather forecast appéñđ]");
        assert!(decorated.contains("A weather forecast app"));
        assert_ne!(decorated, "A weather forecast app");

        // same leaf paths as the input
        let input_paths: Vec<String> = flatten(&en_fixture())
            .unwrap()
            .keys()
            .cloned()
            .collect();
        let output_paths: Vec<String> = flatten(&pseudo).unwrap().keys().cloned().collect();
        let mut sorted_in = input_paths;
        let mut sorted_out = output_paths;
        sorted_in.sort();
        sorted_out.sort();
        assert_eq!(sorted_in, sorted_out);
    }

    #[test]
    fn merge_locale_strips_and_nests() {
        let payload = tree(json!({
            "txt.apps.weather.app.name": "Wetter App",
            "txt.apps.weather.app.parameters.city": "Stadt",
            "global.note": "kept verbatim"
        }));
        let merged = merge_locale(&payload, "txt.apps.weather.").unwrap();
        assert_eq!(
            merged,
            tree(json!({
                "app": { "name": "Wetter App", "parameters": { "city": "Stadt" } },
                "global": { "note": "kept verbatim" }
            }))
        );
    }

    #[test]
    fn merge_locale_rejects_keys_collapsing_to_one_path() {
        let payload = tree(json!({
            "txt.apps.weather.app.name": "first",
            "app.name": "second"
        }));
        let err = merge_locale(&payload, "txt.apps.weather.").unwrap_err();
        assert!(matches!(err, ApplocError::ConflictingKey { ref path } if path == "app.name"));
    }
}
