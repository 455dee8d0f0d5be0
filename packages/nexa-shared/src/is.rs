use crate::coerce::{format_number, parse_float, to_f64, to_js_string};
use crate::value::Value;

/// Own property marking a value as a rendered framework element.
pub const ELEMENT_ATTR_KEY: &str = "__preactattr_";
/// Registered-symbol form of [`ELEMENT_ATTR_KEY`].
pub const ELEMENT_ATTR_SYMBOL: &str = "@@preactattr@@symbol";

/// True for `undefined` and `null`.
pub fn is_undefined(v: &Value) -> bool {
    matches!(v, Value::Undefined | Value::Null)
}

pub fn is_defined(v: &Value) -> bool {
    !is_undefined(v)
}

pub fn is_true(v: &Value) -> bool {
    matches!(v, Value::Bool(true))
}

pub fn is_false(v: &Value) -> bool {
    matches!(v, Value::Bool(false))
}

/// Check if value is primitive
pub fn is_primitive(v: &Value) -> bool {
    matches!(
        v,
        Value::String(_) | Value::Number(_) | Value::Symbol(_) | Value::Bool(_)
    )
}

/// Quick object check - this is primarily used to tell objects from
/// primitive values when we know the value is a JSON-compliant type.
pub fn is_object(v: &Value) -> bool {
    matches!(v, Value::Array(_) | Value::Object(_) | Value::RegExp { .. })
}

/// Raw type tag of a value, e.g. `"Object"` or `"RegExp"`.
pub fn to_raw_type(v: &Value) -> &'static str {
    match v {
        Value::Undefined => "Undefined",
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Symbol(_) => "Symbol",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
        Value::RegExp { .. } => "RegExp",
        Value::Function { .. } => "Function",
    }
}

/// Strict object type check. Only returns true for plain objects.
pub fn is_plain_object(v: &Value) -> bool {
    to_raw_type(v) == "Object"
}

pub fn is_regexp(v: &Value) -> bool {
    to_raw_type(v) == "RegExp"
}

/// Check if `v` is usable as an array index: a finite, non-negative integer.
pub fn is_valid_array_index(v: &Value) -> bool {
    let n = parse_float(&to_js_string(v));
    n >= 0.0 && n.floor() == n && to_f64(v).is_finite()
}

/// Whether a function's source text marks it as a host built-in.
pub fn is_native_source(source: &str) -> bool {
    source.contains("native code")
}

pub fn is_native(v: &Value) -> bool {
    match v {
        Value::Function { source, .. } => is_native_source(source),
        _ => false,
    }
}

/// Whether `v` carries the framework's element attribute marker.
pub fn is_framework_element(v: &Value) -> bool {
    v.as_object().is_some_and(|obj| {
        [ELEMENT_ATTR_KEY, ELEMENT_ATTR_SYMBOL]
            .iter()
            .any(|key| obj.get(key).is_some_and(is_defined))
    })
}

fn to_json(v: &Value) -> Option<serde_json::Value> {
    use serde_json::Value as Json;

    Some(match v {
        Value::Undefined | Value::Symbol(_) | Value::Function { .. } => return None,
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        // Written exactly as `format_number` spells it; non-finite numbers
        // have no JSON form.
        Value::Number(n) if !n.is_finite() => Json::Null,
        Value::Number(n) => format_number(*n)
            .parse::<serde_json::Number>()
            .map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.clone()),
        Value::Array(items) => Json::Array(
            items
                .iter()
                .map(|item| to_json(item).unwrap_or(Json::Null))
                .collect(),
        ),
        Value::Object(obj) => Json::Object(
            obj.iter()
                .filter_map(|(k, v)| to_json(v).map(|json| (k.to_owned(), json)))
                .collect(),
        ),
        Value::RegExp { .. } => Json::Object(serde_json::Map::new()),
    })
}

/// Convert a value to the string that is actually rendered.
///
/// `null`/`undefined` render as nothing, objects and arrays as 2-space
/// indented JSON, everything else through plain string conversion.
pub fn to_display_string(v: &Value) -> String {
    match v {
        Value::Undefined | Value::Null => String::new(),
        _ if is_object(v) => to_json(v)
            .and_then(|json| serde_json::to_string_pretty(&json).ok())
            .unwrap_or_default(),
        _ => to_js_string(v),
    }
}

/// Result of [`to_number`]: the parsed number, or the input when it does not
/// start with one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coerced<'a> {
    Number(f64),
    Original(&'a str),
}

/// Convert an input value to a number for persistence.
/// If the conversion fails, return original string.
pub fn to_number(val: &str) -> Coerced<'_> {
    let n = parse_float(val);
    if n.is_nan() {
        Coerced::Original(val)
    } else {
        Coerced::Number(n)
    }
}
