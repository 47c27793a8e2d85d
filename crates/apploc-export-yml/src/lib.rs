use apploc_core::{Result, TransRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn escape_value(s: &str) -> String {
    // Экранируем только кавычки (" -> \") — ровно то, что понимает
    // платформа переводов; остальные символы уходят как есть.
    let mut out = String::with_capacity(s.len() + 2);
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}

/// Записать wire-каталог целиком: заголовок (title + packages) и по блоку
/// `- translation:` на каждую запись. Ключи выводятся с полным префиксом
/// `txt.apps.<package>.`; значения экранируются, заголовки — нет.
pub fn write_catalog(
    path: &Path,
    app_name: &str,
    package: &str,
    records: &[TransRecord],
) -> Result<()> {
    let file = File::create(path)?;
    let mut w = BufWriter::new(file);

    // --- Header ---
    writeln!(w, "---")?;
    writeln!(w, "title: \"{}\"", app_name)?;
    writeln!(w)?;
    writeln!(w, "packages:")?;
    writeln!(w, "  - default")?;
    writeln!(w, "  - app_{}", package)?;
    writeln!(w)?;

    // --- Parts ---
    writeln!(w, "parts:")?;
    for record in records {
        writeln!(w, "  - translation:")?;
        writeln!(
            w,
            "      key: \"{}\"",
            apploc_keytree::apply_prefix(&record.key, package)
        )?;
        writeln!(w, "      title: \"{}\"", record.title)?;
        writeln!(w, "      value: \"{}\"", escape_value(&record.value))?;
    }

    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    fn record(key: &str, title: &str, value: &str) -> TransRecord {
        TransRecord {
            key: key.into(),
            title: title.into(),
            value: value.into(),
        }
    }

    #[test]
    fn catalog_contains_header_and_prefixed_parts() {
        let tmp = NamedTempFile::new().unwrap();
        let records = vec![
            record("app.name", "Weather App", "A weather forecast app"),
            record("app.parameters.city", "City", "Name of your city"),
        ];
        write_catalog(tmp.path(), "Weather App", "weather", &records).unwrap();

        let s = fs::read_to_string(tmp.path()).unwrap();
        assert!(s.starts_with("---\n"));
        assert!(s.contains(r#"title: "Weather App""#));
        assert!(s.contains("  - default\n  - app_weather"));
        assert!(s.contains(r#"      key: "txt.apps.weather.app.name""#));
        assert!(s.contains(r#"      value: "Name of your city""#));
    }

    #[test]
    fn values_are_quote_escaped_titles_are_not() {
        let tmp = NamedTempFile::new().unwrap();
        let records = vec![record("app.name", "Plain title", r#"say "hi""#)];
        write_catalog(tmp.path(), "App", "pkg", &records).unwrap();

        let s = fs::read_to_string(tmp.path()).unwrap();
        assert!(s.contains(r#"      value: "say \"hi\"""#));
        assert!(s.contains(r#"      title: "Plain title""#));
    }
}
