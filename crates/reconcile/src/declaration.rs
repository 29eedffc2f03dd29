//! Declaration types: the keys, values, and pairs a caller wants applied.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one configuration point in the settings store.
///
/// A key is a schema id plus a key name, optionally pinned to a relocation
/// path for schemas that can be instantiated at multiple addresses (one
/// instance per app-folder, for example). `(schema, key, path)` uniquely
/// identifies a setting within one run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettingKey {
    /// Schema id (e.g. "org.gnome.desktop.interface")
    pub schema: String,

    /// Key name within the schema (e.g. "color-scheme")
    pub key: String,

    /// Relocation path for relocatable schemas
    /// (e.g. "/org/gnome/desktop/app-folders/folders/A-E/")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl SettingKey {
    pub fn new(schema: &str, key: &str) -> Self {
        Self {
            schema: schema.to_string(),
            key: key.to_string(),
            path: None,
        }
    }

    /// Key into a relocatable schema instance at `path`.
    pub fn relocatable(schema: &str, path: &str, key: &str) -> Self {
        Self {
            schema: schema.to_string(),
            key: key.to_string(),
            path: Some(path.to_string()),
        }
    }

    /// The schema argument as the external store expects it:
    /// `schema` for a plain key, `schema:path` for a relocatable instance.
    pub fn schema_arg(&self) -> String {
        match &self.path {
            Some(path) => format!("{}:{}", self.schema, path),
            None => self.schema.clone(),
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.schema_arg(), self.key)
    }
}

/// A typed desired value.
///
/// The rendered type must match what the store's schema declares for the
/// key, or the write is rejected with a type mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Str(String),
    StrList(Vec<String>),
}

impl SettingValue {
    /// Render in the store's own text format: booleans as `true`/`false`,
    /// integers bare, strings single-quoted, lists as bracketed
    /// comma-separated quoted items with no trailing separator.
    pub fn render(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Str(s) => quote(s),
            Self::StrList(items) => {
                if items.is_empty() {
                    // a bare [] is untyped; annotate so the external reader
                    // accepts it as a string list
                    "@as []".to_string()
                } else {
                    let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
                    format!("[{}]", quoted.join(", "))
                }
            }
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
            Self::StrList(_) => "string list",
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for SettingValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(items: Vec<String>) -> Self {
        Self::StrList(items)
    }
}

impl From<&[&str]> for SettingValue {
    fn from(items: &[&str]) -> Self {
        Self::StrList(items.iter().map(|s| (*s).to_string()).collect())
    }
}

/// Single-quote a string, escaping backslashes and embedded quotes.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Parse the textual rendering of a string list back into its items.
///
/// Accepts the same forms [`SettingValue::render`] produces (`['a', 'b']`,
/// `@as []`, `[]`), which is also what the external store prints for a
/// string-list key. Returns `None` when the input is not a string list.
pub fn parse_str_list(text: &str) -> Option<Vec<String>> {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix("@as").map_or(trimmed, str::trim_start);
    let inner = trimmed.strip_prefix('[')?.strip_suffix(']')?.trim();

    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                let delim = c;
                let mut item = String::new();
                loop {
                    match chars.next()? {
                        '\\' => item.push(chars.next()?),
                        c if c == delim => break,
                        c => item.push(c),
                    }
                }
                items.push(item);
            }
            ',' | ' ' => {}
            _ => return None,
        }
    }
    Some(items)
}

/// A desired `(key, value)` pair. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub key: SettingKey,
    pub value: SettingValue,
}

impl Declaration {
    pub fn new(key: SettingKey, value: SettingValue) -> Self {
        Self { key, value }
    }

    /// Declare a plain key.
    pub fn set(schema: &str, key: &str, value: impl Into<SettingValue>) -> Self {
        Self {
            key: SettingKey::new(schema, key),
            value: value.into(),
        }
    }

    /// Declare a key of a relocatable schema instance.
    pub fn set_at(schema: &str, path: &str, key: &str, value: impl Into<SettingValue>) -> Self {
        Self {
            key: SettingKey::relocatable(schema, path, key),
            value: value.into(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}
