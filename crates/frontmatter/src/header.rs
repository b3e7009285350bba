//! Header field reading and rendering.

use crate::{FrontMatter, FrontMatterError};
use serde_yaml::{Mapping, Value};

const TITLE_KEY: &str = "title";
const DATE_KEY: &str = "date";
const CATEGORIES_KEY: &str = "categories";
const TAGS_KEY: &str = "tags";

/// Read header fields from a YAML mapping.
pub(crate) fn parse_yaml(front_matter: &str) -> Result<FrontMatter, FrontMatterError> {
    if front_matter.trim().is_empty() {
        return Ok(FrontMatter::default());
    }

    let yaml_value: Value = serde_yaml::from_str(front_matter)?;
    match yaml_value {
        Value::Mapping(map) => Ok(from_mapping(&map)),
        Value::Null => Ok(FrontMatter::default()),
        _ => Err(FrontMatterError::FrontMatterNotMapping),
    }
}

fn from_mapping(map: &Mapping) -> FrontMatter {
    FrontMatter {
        title: map.get(TITLE_KEY).and_then(scalar_text),
        date: map.get(DATE_KEY).and_then(scalar_text),
        categories: map.get(CATEGORIES_KEY).map(list_text).unwrap_or_default(),
        tags: map.get(TAGS_KEY).map(list_text).unwrap_or_default(),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// A sequence, a lone scalar (one element) or null (no elements).
fn list_text(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_text).collect(),
        other => scalar_text(other).into_iter().collect(),
    }
}

/// Line-oriented reading for headers that are not valid YAML.
///
/// Understands top-level `key: value` lines, `[a, b]` flow lists and indented `- item` block
/// lists. Unknown keys and nested structures are ignored.
pub(crate) fn scan_lines(front_matter: &str) -> FrontMatter {
    let mut fm = FrontMatter::default();
    let mut open_list: Option<OpenList> = None;

    for line in front_matter.lines() {
        let trimmed = line.trim();

        if let Some(item) = trimmed.strip_prefix('-') {
            let item = unquote(item.trim());
            match open_list {
                Some(_) if item.is_empty() => {}
                Some(OpenList::Categories) => fm.categories.push(item),
                Some(OpenList::Tags) => fm.tags.push(item),
                None => {}
            }
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            continue;
        }
        open_list = None;

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();

        match key.trim() {
            TITLE_KEY => fm.title = non_empty(unquote(value)),
            DATE_KEY => fm.date = non_empty(unquote(value)),
            CATEGORIES_KEY => {
                fm.categories = scan_list(value);
                if value.is_empty() {
                    open_list = Some(OpenList::Categories);
                }
            }
            TAGS_KEY => {
                fm.tags = scan_list(value);
                if value.is_empty() {
                    open_list = Some(OpenList::Tags);
                }
            }
            _ => {}
        }
    }

    fm
}

#[derive(Clone, Copy)]
enum OpenList {
    Categories,
    Tags,
}

fn scan_list(value: &str) -> Vec<String> {
    let inner = match value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        Some(inner) => inner,
        None if value.is_empty() => return Vec::new(),
        None => return vec![unquote(value)],
    };

    inner
        .split(',')
        .map(|item| unquote(item.trim()))
        .filter(|item| !item.is_empty())
        .collect()
}

fn unquote(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        if let Ok(decoded) = serde_json::from_str::<String>(value) {
            return decoded;
        }
        return value[1..value.len() - 1].to_string();
    }
    if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') {
        return value[1..value.len() - 1].replace("''", "'");
    }
    value.to_string()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Render a header scalar, quoting it only when the plain form would not read back unchanged.
pub(crate) fn render_scalar(value: &str) -> Result<String, FrontMatterError> {
    if value.is_empty() || reads_back_plain(value, false) {
        return Ok(value.to_string());
    }
    double_quoted(value)
}

/// Render list items for a `[a,b]` flow sequence.
pub(crate) fn render_flow_items(items: &[String]) -> Result<String, FrontMatterError> {
    let rendered = items
        .iter()
        .map(|item| {
            if reads_back_plain(item, true) {
                Ok(item.clone())
            } else {
                double_quoted(item)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(","))
}

/// A YAML double-quoted scalar.
///
/// JSON string syntax is valid YAML except that JSON leaves the Unicode line breaks raw, and
/// YAML folds raw line breaks inside quotes into spaces. Those get YAML's own escapes.
fn double_quoted(value: &str) -> Result<String, FrontMatterError> {
    let quoted = serde_json::to_string(value)?;
    if !quoted.contains(['\u{85}', '\u{2028}', '\u{2029}']) {
        return Ok(quoted);
    }
    Ok(quoted
        .replace('\u{85}', "\\N")
        .replace('\u{2028}', "\\L")
        .replace('\u{2029}', "\\P"))
}

fn reads_back_plain(value: &str, in_flow: bool) -> bool {
    if value.is_empty() || value.trim() != value || value.contains(['\n', '\r']) {
        return false;
    }
    if in_flow && value.contains([',', '[', ']', '{', '}']) {
        return false;
    }

    let probe = if in_flow {
        format!("k: [{value}]")
    } else {
        format!("k: {value}")
    };

    let Ok(Value::Mapping(map)) = serde_yaml::from_str::<Value>(&probe) else {
        return false;
    };

    match (in_flow, map.get("k")) {
        (false, Some(Value::String(s))) => s == value,
        (true, Some(Value::Sequence(seq))) => {
            seq.len() == 1 && matches!(&seq[0], Value::String(s) if s == value)
        }
        _ => false,
    }
}
