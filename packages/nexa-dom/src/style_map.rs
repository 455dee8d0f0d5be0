//! Inline style dictionaries.

use crate::prefix;
use nexa_shared::Value;
use nexa_shared::coerce::{format_number, to_js_string};
use std::fmt;

/// A stored style value.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Text(String),
    Number(f64),
    /// An explicit `null`. It is stored, and renders as `null`.
    Null,
}

impl StyleValue {
    /// Converts a dynamic value. `undefined` has no style value.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Undefined => None,
            Value::Null => Some(StyleValue::Null),
            Value::Number(n) => Some(StyleValue::Number(*n)),
            Value::String(s) => Some(StyleValue::Text(s.clone())),
            other => Some(StyleValue::Text(to_js_string(other))),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(s) => f.write_str(s),
            StyleValue::Number(n) => f.write_str(&format_number(*n)),
            StyleValue::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(s: &str) -> Self {
        StyleValue::Text(s.to_owned())
    }
}

impl From<String> for StyleValue {
    fn from(s: String) -> Self {
        StyleValue::Text(s)
    }
}

impl From<f64> for StyleValue {
    fn from(n: f64) -> Self {
        StyleValue::Number(n)
    }
}

impl From<i32> for StyleValue {
    fn from(n: i32) -> Self {
        StyleValue::Number(n.into())
    }
}

/// One item of a declaration list.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleEntry {
    /// `"name:value"`
    Declaration(String),
    /// `[name, value]`
    Pair(String, Value),
}

impl From<&str> for StyleEntry {
    fn from(s: &str) -> Self {
        StyleEntry::Declaration(s.to_owned())
    }
}

impl<V: Into<Value>> From<(&str, V)> for StyleEntry {
    fn from((name, value): (&str, V)) -> Self {
        StyleEntry::Pair(name.to_owned(), value.into())
    }
}

/// Anything a [`StyleMap`] can be built from.
#[derive(Debug, Clone, Copy)]
pub enum StyleSource<'a> {
    /// `"name:value;name2:value2;"`
    Text(&'a str),
    Entries(&'a [StyleEntry]),
    Object(&'a nexa_shared::Object),
    /// Shallow-copied.
    Map(&'a StyleMap),
    Value(&'a Value),
}

impl<'a> From<&'a str> for StyleSource<'a> {
    fn from(s: &'a str) -> Self {
        StyleSource::Text(s)
    }
}

impl<'a> From<&'a String> for StyleSource<'a> {
    fn from(s: &'a String) -> Self {
        StyleSource::Text(s)
    }
}

impl<'a> From<&'a [StyleEntry]> for StyleSource<'a> {
    fn from(entries: &'a [StyleEntry]) -> Self {
        StyleSource::Entries(entries)
    }
}

impl<'a> From<&'a Vec<StyleEntry>> for StyleSource<'a> {
    fn from(entries: &'a Vec<StyleEntry>) -> Self {
        StyleSource::Entries(entries)
    }
}

impl<'a> From<&'a nexa_shared::Object> for StyleSource<'a> {
    fn from(obj: &'a nexa_shared::Object) -> Self {
        StyleSource::Object(obj)
    }
}

impl<'a> From<&'a StyleMap> for StyleSource<'a> {
    fn from(map: &'a StyleMap) -> Self {
        StyleSource::Map(map)
    }
}

impl<'a> From<&'a Value> for StyleSource<'a> {
    fn from(value: &'a Value) -> Self {
        StyleSource::Value(value)
    }
}

/// Splits on `sep`, dropping whitespace adjacent to each separator.
fn split_trimmed(s: &str, sep: char) -> Vec<&str> {
    let parts: Vec<&str> = s.split(sep).collect();
    let last = parts.len() - 1;
    parts
        .into_iter()
        .enumerate()
        .map(|(i, part)| {
            let part = if i > 0 { part.trim_start() } else { part };
            if i < last { part.trim_end() } else { part }
        })
        .collect()
}

/// Insertion-ordered `name -> value` storage.
type Dict = Vec<(String, StyleValue)>;

fn put(dict: &mut Dict, name: &str, value: StyleValue) {
    match dict.iter_mut().find(|(k, _)| k == name) {
        Some((_, slot)) => *slot = value,
        None => dict.push((name.to_owned(), value)),
    }
}

/// `name:value`, keeping only the first value of a segment.
fn put_declaration(dict: &mut Dict, declaration: &str) {
    let parts = split_trimmed(declaration, ':');
    if let [name, value, ..] = parts.as_slice() {
        if !name.is_empty() {
            put(dict, name, StyleValue::Text((*value).to_owned()));
        }
    }
}

fn put_pair(dict: &mut Dict, name: &str, value: &Value) {
    if name.is_empty() {
        return;
    }
    if let Some(value) = StyleValue::from_value(value) {
        put(dict, name, value);
    }
}

fn put_value_entry(dict: &mut Dict, entry: &Value) {
    match entry {
        Value::String(declaration) => put_declaration(dict, declaration),
        Value::Array(pair) => {
            let Some(name) = pair.first().filter(|name| name.is_truthy()) else {
                return;
            };
            let value = pair.get(1).unwrap_or(&Value::Undefined);
            put_pair(dict, &to_js_string(name), value);
        }
        _ => {}
    }
}

/// An inline style dictionary.
///
/// Keys go through [`prefix::property`] on every access, so `get("appearance")`
/// finds a value stored under `-webkit-appearance` on engines that need it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleMap {
    dict: Dict,
}

impl StyleMap {
    pub fn new() -> Self {
        Self { dict: Vec::new() }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from<'a>(source: impl Into<StyleSource<'a>>) -> Self {
        Self {
            dict: Self::explode(source),
        }
    }

    /// Normalizes `source` into ordered declarations.
    ///
    /// Parsing is lenient: blank segments, nameless segments and segments
    /// without a value are skipped. `undefined` values are never kept,
    /// `null` is.
    pub fn explode<'a>(source: impl Into<StyleSource<'a>>) -> Vec<(String, StyleValue)> {
        let mut dict = Dict::new();

        match source.into() {
            StyleSource::Map(map) => return map.dict.clone(),
            StyleSource::Text(text) => {
                for part in split_trimmed(text, ';') {
                    if !part.trim().is_empty() {
                        put_declaration(&mut dict, part);
                    }
                }
            }
            StyleSource::Entries(entries) => {
                for entry in entries {
                    match entry {
                        StyleEntry::Declaration(declaration) => {
                            put_declaration(&mut dict, declaration)
                        }
                        StyleEntry::Pair(name, value) => put_pair(&mut dict, name, value),
                    }
                }
            }
            StyleSource::Object(obj) => {
                for (name, value) in obj.iter() {
                    if let Some(value) = StyleValue::from_value(value) {
                        put(&mut dict, name, value);
                    }
                }
            }
            StyleSource::Value(value) => match value {
                Value::String(text) => return Self::explode(text),
                Value::Object(obj) => return Self::explode(obj),
                Value::Array(entries) => {
                    for entry in entries {
                        put_value_entry(&mut dict, entry);
                    }
                }
                _ => {}
            },
        }

        dict
    }

    /// Resolves a property name for the current host.
    pub fn property(name: &str) -> &str {
        prefix::property(name)
    }

    pub fn get(&self, name: &str) -> Option<&StyleValue> {
        let name = prefix::property(name);
        self.dict.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn set(&mut self, name: &str, value: impl Into<StyleValue>) -> &mut Self {
        put(&mut self.dict, prefix::property(name), value.into());
        self
    }

    /// Removes a property. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let name = prefix::property(name);
        match self.dict.iter().position(|(k, _)| k == name) {
            Some(index) => {
                self.dict.remove(index);
                true
            }
            None => false,
        }
    }

    /// Adds `value` to a comma-separated property value, e.g. a list of
    /// transitions. The result is always text.
    pub fn append(&mut self, name: &str, value: impl Into<StyleValue>) -> &mut Self {
        let value = value.into();
        let joined = match self.get(name) {
            Some(current) => format!("{current},{value}"),
            None => value.to_string(),
        };
        self.set(name, joined)
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.dict.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.dict {
            write!(f, "{name}:{value};")?;
        }
        Ok(())
    }
}
