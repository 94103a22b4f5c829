//! Front-matter and YAML normalization
//!
//! Turns the raw text of one content file into a [`Record`]: a JSON object
//! whose values have been coerced the same way for every content kind, so
//! the typed models can be deserialized from it.

use serde_json::{Number, Value};
use serde_yaml::{Mapping, Value as Yaml};

use crate::error::{ContentError, Result};

/// A normalized, untyped record (insertion ordered)
pub type Record = serde_json::Map<String, Value>;

/// Fields that are conventionally lists; an empty value becomes `[]`.
const LIST_FIELDS: &[&str] = &["tags", "items"];

/// How a file stores its record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// Markdown with a `---` delimited YAML block at the top
    Frontmatter,
    /// A pure YAML document
    Data,
}

/// Parse one file into a record, deriving `id` from `file_name` when the
/// record does not carry one.
///
/// A missing or unrecognizable front-matter block is not an error and
/// yields a record holding only the derived `id`. Malformed YAML is.
pub fn parse_document(text: &str, format: DocumentFormat, file_name: &str) -> Result<Record> {
    let yaml = match format {
        DocumentFormat::Frontmatter => match split_frontmatter(text) {
            Some(block) if has_yaml_structure(&block) => Some(block),
            _ => None,
        },
        DocumentFormat::Data if !text.trim().is_empty() => Some(text.to_string()),
        DocumentFormat::Data => None,
    };

    let mut record = match yaml {
        Some(yaml) => match serde_yaml::from_str::<Yaml>(&yaml) {
            Ok(Yaml::Mapping(mapping)) => normalize_record(mapping),
            Ok(other) => {
                tracing::debug!("{} does not hold a mapping ({:?}), ignoring", file_name, other);
                Record::new()
            }
            Err(e) => return Err(ContentError::parse(file_name, e)),
        },
        None => Record::new(),
    };

    ensure_id(&mut record, || file_stem(file_name));
    Ok(record)
}

/// Like [`parse_document`], but logs and drops files that fail to parse
pub fn normalize_file(text: &str, format: DocumentFormat, file_name: &str) -> Option<Record> {
    match parse_document(text, format, file_name) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Skipping {}: {}", file_name, e);
            None
        }
    }
}

/// Parse a data file holding a list of records under `key`
/// (`categories:` or `tags:`).
///
/// Entries without an `id` get their lowercased `name` with whitespace runs
/// turned into `-`, or `<id_prefix>-<index>` when they have no name either. Entries that are not mappings are skipped.
pub fn parse_data_list(
    text: &str,
    key: &str,
    id_prefix: &str,
    file_name: &str,
) -> Result<Vec<Record>> {
    let document: Yaml =
        serde_yaml::from_str(text).map_err(|e| ContentError::parse(file_name, e))?;

    let entries = match document.get(key) {
        Some(Yaml::Sequence(entries)) => entries.clone(),
        Some(Yaml::Null) => Vec::new(),
        _ => {
            return Err(ContentError::parse(
                file_name,
                format!("expected a `{key}:` list"),
            ))
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let Yaml::Mapping(mapping) = entry else {
            tracing::warn!("Skipping entry {} of {}: not a mapping", index, file_name);
            continue;
        };

        let mut record = normalize_record(mapping);
        let from_name = match record.get("name") {
            Some(Value::String(name)) if !name.trim().is_empty() => Some(name_id(name)),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };
        ensure_id(&mut record, || {
            from_name.unwrap_or_else(|| format!("{}-{}", id_prefix, index))
        });
        records.push(record);
    }

    Ok(records)
}

/// `Kids' Menu` -> `kids'-menu`; punctuation is kept so ids written by hand
/// against a name keep matching.
fn name_id(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// File name without its extension
pub fn file_stem(file_name: &str) -> String {
    std::path::Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file_name)
        .to_string()
}

/// Return the text between the opening and closing `---` lines, if any
fn split_frontmatter(text: &str) -> Option<String> {
    let text = text.trim_start_matches('\u{feff}');
    let mut lines = text.lines().skip_while(|line| line.trim().is_empty());

    if lines.next()?.trim_end() != "---" {
        return None;
    }

    let mut block = Vec::new();
    for line in lines {
        if line.trim_end() == "---" {
            return Some(block.join("\n"));
        }
        block.push(line);
    }

    // No closing ---, treat as no front-matter
    None
}

/// Valid front-matter has at least one `key: value` line. Anything else
/// between two `---` lines is markdown using horizontal rules.
fn has_yaml_structure(block: &str) -> bool {
    block.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

/// Set `id` with `derive` unless the record carries a non-empty one.
/// Numeric ids are kept but stored as strings.
fn ensure_id(record: &mut Record, derive: impl FnOnce() -> String) {
    let explicit = match record.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => return,
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    };
    let id = explicit.unwrap_or_else(derive);
    record.insert("id".to_string(), Value::String(id));
}

/// Normalize a record's top-level mapping. A quoted number such as
/// `"42"` is read as the number; `id` stays text.
fn normalize_record(mapping: Mapping) -> Record {
    let mut record = normalize_mapping(mapping);
    for (key, value) in record.iter_mut() {
        if key == "id" {
            continue;
        }
        if let Some(number) = value.as_str().and_then(numeric_text) {
            *value = Value::Number(number);
        }
    }
    record
}

/// `[+-]digits[.digits]`, anything else is not a number
fn numeric_text(text: &str) -> Option<Number> {
    let text = text.trim();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !fraction.map_or(true, all_digits) {
        return None;
    }

    let text = text.strip_prefix('+').unwrap_or(text);
    match fraction {
        None => text.parse::<i64>().ok().map(Number::from),
        Some(_) => text.parse::<f64>().ok().and_then(Number::from_f64),
    }
}

fn normalize_mapping(mapping: Mapping) -> Record {
    let mut record = Record::new();
    for (key, value) in mapping {
        let Some(key) = scalar_to_string(&key) else {
            tracing::debug!("Ignoring non-scalar key {:?}", key);
            continue;
        };
        let value = normalize_field(&key, value);
        record.insert(key, value);
    }
    record
}

fn normalize_field(key: &str, value: Yaml) -> Value {
    match value {
        Yaml::Sequence(seq) => Value::Array(seq.into_iter().filter_map(normalize_element).collect()),
        Yaml::Number(n) => yaml_number(&n),
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Null if LIST_FIELDS.contains(&key) => Value::Array(Vec::new()),
        Yaml::Null => Value::String(String::new()),
        Yaml::String(s) => Value::String(s),
        Yaml::Mapping(mapping) => Value::Object(normalize_mapping(mapping)),
        Yaml::Tagged(tagged) => normalize_field(key, tagged.value),
    }
}

/// Scalars in a list become strings; nested records keep their shape
fn normalize_element(value: Yaml) -> Option<Value> {
    match value {
        Yaml::Null => None,
        Yaml::Mapping(mapping) => Some(Value::Object(normalize_mapping(mapping))),
        Yaml::Sequence(seq) => Some(Value::Array(
            seq.into_iter().filter_map(normalize_element).collect(),
        )),
        Yaml::Tagged(tagged) => normalize_element(tagged.value),
        scalar => scalar_to_string(&scalar).map(Value::String),
    }
}

fn scalar_to_string(value: &Yaml) -> Option<String> {
    match value {
        Yaml::String(s) => Some(s.trim().to_string()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Value {
    if let Some(i) = n.as_i64() {
        Value::Number(i.into())
    } else if let Some(u) = n.as_u64() {
        Value::Number(u.into())
    } else {
        n.as_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(n.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_menu_item_frontmatter() {
        let content = r#"---
name: "Margherita Pizza"
description: Classic pizza with tomato sauce
price: 13.40
category: pizza
tags: [vegetarian]
featured: true
order: 1
---

Stone-baked since 1998.
"#;

        let record = parse_document(content, DocumentFormat::Frontmatter, "margherita.md").unwrap();
        assert_eq!(record["id"], json!("margherita"));
        assert_eq!(record["name"], json!("Margherita Pizza"));
        assert_eq!(record["price"], json!(13.4));
        assert_eq!(record["tags"], json!(["vegetarian"]));
        assert_eq!(record["featured"], json!(true));
        assert_eq!(record["order"], json!(1));
    }

    #[test]
    fn test_tag_list_ignores_whitespace_and_quotes() {
        for tags in [
            "[vegetarian, vegan]",
            "[vegetarian,vegan]",
            "[ vegetarian ,   vegan ]",
            "[\"vegetarian\", 'vegan']",
        ] {
            let content = format!("---\nname: Salad\ntags: {}\n---\n", tags);
            let record = parse_document(&content, DocumentFormat::Frontmatter, "salad.md").unwrap();
            assert_eq!(record["tags"], json!(["vegetarian", "vegan"]), "input: {}", tags);
        }
    }

    #[test]
    fn test_quoted_numbers_become_numbers() {
        let content = "---\nid: \"42\"\nname: Anna\nyears: \"12\"\nrating: '4.5'\nzip: \"+0123\"\nstartDate: \"2025-03-18\"\nversion: \"1.2.3\"\nlabel: \"-\"\ntags: [\"7\"]\nsocials:\n  phone: \"5550100\"\n---\n";
        let record = parse_document(content, DocumentFormat::Frontmatter, "anna.md").unwrap();
        assert_eq!(record["id"], json!("42"));
        assert_eq!(record["years"], json!(12));
        assert_eq!(record["rating"], json!(4.5));
        assert_eq!(record["zip"], json!(123));
        assert_eq!(record["startDate"], json!("2025-03-18"));
        assert_eq!(record["version"], json!("1.2.3"));
        assert_eq!(record["label"], json!("-"));
        assert_eq!(record["tags"], json!(["7"]));
        assert_eq!(record["socials"]["phone"], json!("5550100"));

        let member: crate::content::TeamMember =
            serde_json::from_value(Value::Object(record)).unwrap();
        assert_eq!(member.extra["years"], json!(12));
        assert_eq!(member.socials.unwrap()["phone"], "5550100");
    }

    #[test]
    fn test_empty_values() {
        let content = "---\nname: Water\ntags:\nimage:\n---\n";
        let record = parse_document(content, DocumentFormat::Frontmatter, "water.md").unwrap();
        assert_eq!(record["tags"], json!([]));
        assert_eq!(record["image"], json!(""));
    }

    #[test]
    fn test_explicit_id_wins() {
        let content = "---\nid: house-special\nname: Special\n---\n";
        let record = parse_document(content, DocumentFormat::Frontmatter, "special.md").unwrap();
        assert_eq!(record["id"], json!("house-special"));

        let content = "---\nid: 42\nname: Special\n---\n";
        let record = parse_document(content, DocumentFormat::Frontmatter, "special.md").unwrap();
        assert_eq!(record["id"], json!("42"));
    }

    #[test]
    fn test_missing_or_unclosed_block_yields_id_only() {
        let record =
            parse_document("Just prose.\n", DocumentFormat::Frontmatter, "notes.md").unwrap();
        assert_eq!(record, json!({ "id": "notes" }).as_object().unwrap().clone());

        let record = parse_document(
            "---\nname: Never closed\n",
            DocumentFormat::Frontmatter,
            "open.md",
        )
        .unwrap();
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Some random text with markdown lists:
- Item 1
- Item 2

---
More content here.
"#;
        let record = parse_document(content, DocumentFormat::Frontmatter, "rules.md").unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record["id"], json!("rules"));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\nname: [unterminated\nprice: 3\n---\n";
        let err = parse_document(content, DocumentFormat::Frontmatter, "broken.md").unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
        assert!(normalize_file(content, DocumentFormat::Frontmatter, "broken.md").is_none());
    }

    #[test]
    fn test_crlf_and_nested_items() {
        let content = "---\r\ntitle: Week 12\r\nstartDate: 2025-03-18\r\nitems:\r\n  - day: Monday\r\n    name: Soup\r\n    price: 6.9\r\n---\r\n";
        let record = parse_document(content, DocumentFormat::Frontmatter, "week-12.md").unwrap();
        assert_eq!(record["startDate"], json!("2025-03-18"));
        assert_eq!(
            record["items"],
            json!([{ "day": "Monday", "name": "Soup", "price": 6.9 }])
        );
    }

    #[test]
    fn test_data_document() {
        let record =
            parse_document("name: Anna\norder: 2\n", DocumentFormat::Data, "anna.yaml").unwrap();
        assert_eq!(record["id"], json!("anna"));
        assert_eq!(record["order"], json!(2));
    }

    #[test]
    fn test_parse_data_list_derives_ids() {
        let content = r#"
categories:
  - id: pizza
    name: Pizza
    order: 1
  - name: Fresh Salads
    description: "Seasonal greens"
    order: 3
  - description: Unnamed
  - just a string
"#;
        let records = parse_data_list(content, "categories", "category", "categories.yaml").unwrap();
        let ids: Vec<_> = records.iter().map(|r| r["id"].clone()).collect();
        assert_eq!(ids, vec![json!("pizza"), json!("fresh-salads"), json!("category-2")]);
        assert_eq!(records[1]["description"], json!("Seasonal greens"));

        let records = parse_data_list(
            "categories:\n  - name: Kids' Menu\n  - name: \"Pizza   &  Pasta\"\n",
            "categories",
            "category",
            "categories.yaml",
        )
        .unwrap();
        assert_eq!(records[0]["id"], json!("kids'-menu"));
        assert_eq!(records[1]["id"], json!("pizza-&-pasta"));
    }

    #[test]
    fn test_parse_data_list_requires_key() {
        let err = parse_data_list("tags: nope\n", "tags", "tag", "tags.yaml").unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
        assert!(parse_data_list("tags:\n", "tags", "tag", "tags.yaml").unwrap().is_empty());
    }
}
