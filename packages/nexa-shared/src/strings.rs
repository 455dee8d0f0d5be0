//! Case converters for attribute and style property names.
//!
//! Each converter is memoized per thread.

use crate::cached::{Memoized, cached};

type Converter = Memoized<fn(&str) -> String, String>;

thread_local! {
    static CAMELIZE: Converter = cached(camelize_uncached as fn(&str) -> String);
    static HYPHENATE: Converter = cached(hyphenate_uncached as fn(&str) -> String);
    static CAPITALIZE: Converter = cached(capitalize_uncached as fn(&str) -> String);
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn camelize_uncached(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '-' && is_word_char(next) => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }
    out
}

fn hyphenate_uncached(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if c.is_ascii_uppercase() && prev.is_some_and(is_word_char) {
            out.push('-');
        }
        out.push(c);
        prev = Some(c);
    }
    out.to_lowercase()
}

fn capitalize_uncached(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Camelize a hyphen-delimited string: `foo-bar` becomes `fooBar`.
pub fn camelize(s: &str) -> String {
    CAMELIZE.with(|f| f.call(s))
}

/// Hyphenate a camelCase string: `fooBar` becomes `foo-bar`.
pub fn hyphenate(s: &str) -> String {
    HYPHENATE.with(|f| f.call(s))
}

/// Uppercase the first character only.
pub fn capitalize(s: &str) -> String {
    CAPITALIZE.with(|f| f.call(s))
}
