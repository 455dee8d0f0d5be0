//! Class name lists, modeled on the DOM's `DOMTokenList`.

use crate::error::BoxError;
use nexa_shared::{Object, Value};
use smallvec::SmallVec;
use std::fmt;
use std::rc::Rc;

/// Something class names can be read from. Sources nest: a list may hold
/// strings, flag maps, producers and other lists.
#[derive(Clone, Default)]
pub enum TokenSource {
    #[default]
    None,
    /// One or more whitespace-separated names.
    Text(String),
    List(Vec<TokenSource>),
    /// Names whose value is truthy.
    Flags(Object),
    /// Evaluated on every read. A failing producer contributes nothing.
    Producer(Rc<dyn Fn() -> Result<TokenSource, BoxError>>),
    Tokens(TokenList),
}

impl TokenSource {
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> Result<TokenSource, BoxError> + 'static,
    {
        TokenSource::Producer(Rc::new(f))
    }

    /// Reads a source from a dynamic value: strings, arrays and objects
    /// contribute, every other value is empty.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => TokenSource::Text(s.clone()),
            Value::Array(items) => TokenSource::List(items.iter().map(Self::from_value).collect()),
            Value::Object(obj) => TokenSource::Flags(obj.clone()),
            _ => TokenSource::None,
        }
    }

    fn collect_into(&self, out: &mut Vec<String>) {
        match self {
            TokenSource::None => {}
            TokenSource::Text(text) => out.extend(text.split_whitespace().map(str::to_owned)),
            TokenSource::List(items) => {
                for item in items {
                    item.collect_into(out);
                }
            }
            TokenSource::Flags(flags) => out.extend(
                flags
                    .iter()
                    .filter(|(_, on)| on.is_truthy())
                    .map(|(name, _)| name.to_owned()),
            ),
            TokenSource::Producer(produce) => match produce() {
                Ok(source) => source.collect_into(out),
                Err(error) => tracing::debug!("class name producer failed: {}", error),
            },
            TokenSource::Tokens(list) => out.extend(list.tokens.iter().cloned()),
        }
    }
}

impl fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::None => f.write_str("None"),
            TokenSource::Text(text) => f.debug_tuple("Text").field(text).finish(),
            TokenSource::List(items) => f.debug_tuple("List").field(items).finish(),
            TokenSource::Flags(flags) => f.debug_tuple("Flags").field(flags).finish(),
            TokenSource::Producer(_) => f.write_str("Producer(..)"),
            TokenSource::Tokens(list) => f.debug_tuple("Tokens").field(list).finish(),
        }
    }
}

impl From<&str> for TokenSource {
    fn from(s: &str) -> Self {
        TokenSource::Text(s.to_owned())
    }
}

impl From<String> for TokenSource {
    fn from(s: String) -> Self {
        TokenSource::Text(s)
    }
}

impl<T: Into<TokenSource>> From<Vec<T>> for TokenSource {
    fn from(items: Vec<T>) -> Self {
        TokenSource::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<Object> for TokenSource {
    fn from(flags: Object) -> Self {
        TokenSource::Flags(flags)
    }
}

impl From<TokenList> for TokenSource {
    fn from(list: TokenList) -> Self {
        TokenSource::Tokens(list)
    }
}

impl From<&TokenList> for TokenSource {
    fn from(list: &TokenList) -> Self {
        TokenSource::Tokens(list.clone())
    }
}

impl From<&Value> for TokenSource {
    fn from(value: &Value) -> Self {
        TokenSource::from_value(value)
    }
}

impl<T: Into<TokenSource>> From<Option<T>> for TokenSource {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(TokenSource::None, Into::into)
    }
}

/// Whether `token` is a usable class name: a letter, `$`, `_` or `-`,
/// followed by word characters, `$` or `-`.
pub fn is_valid_token(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '-');
    (first.is_ascii_alphabetic() || matches!(first, '$' | '_' | '-')) && chars.all(rest)
}

/// Ordered set of class names.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenList {
    tokens: SmallVec<[String; 4]>,
}

impl TokenList {
    pub fn new() -> Self {
        Self {
            tokens: SmallVec::new(),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from(source: impl Into<TokenSource>) -> Self {
        let mut list = Self::new();
        list.add(source);
        list
    }

    /// Flattens `source` into trimmed, valid names in reading order.
    /// Invalid names are dropped with a warning. Duplicates are kept.
    pub fn explode(source: impl Into<TokenSource>) -> Vec<String> {
        let mut raw = Vec::new();
        source.into().collect_into(&mut raw);

        raw.into_iter()
            .filter_map(|token| {
                let token = token.trim();
                if token.is_empty() {
                    return None;
                }
                if !is_valid_token(token) {
                    tracing::warn!("Bad className \"{}\"", token);
                    return None;
                }
                Some(token.to_owned())
            })
            .collect()
    }

    /// Adds the names read from `source` that are not yet present.
    pub fn add(&mut self, source: impl Into<TokenSource>) -> &mut Self {
        for token in Self::explode(source) {
            if !self.contains(&token) {
                self.tokens.push(token);
            }
        }
        self
    }

    pub fn remove<I, S>(&mut self, tokens: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            if let Some(index) = self.tokens.iter().position(|t| t == token) {
                self.tokens.remove(index);
            }
        }
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Token at `index`; negative indices count from the end.
    pub fn item(&self, index: isize) -> Option<&str> {
        let index = if index < 0 {
            index.checked_add_unsigned(self.len())?
        } else {
            index
        };
        let index = usize::try_from(index).ok()?;
        self.tokens.get(index).map(String::as_str)
    }

    /// Removes `token` if present, adds it otherwise. Returns whether it was
    /// present.
    ///
    /// `token` is a single name. An invalid one is reported and leaves the
    /// list unchanged.
    pub fn toggle(&mut self, token: &str) -> bool {
        if self.contains(token) {
            self.remove([token]);
            return true;
        }
        if is_valid_token(token) {
            self.tokens.push(token.to_owned());
        } else {
            tracing::warn!("Bad className \"{}\"", token);
        }
        false
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl fmt::Display for TokenList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_validation() {
        assert!(is_valid_token("btn"));
        assert!(is_valid_token("-x_1$"));
        assert!(is_valid_token("_"));
        assert!(!is_valid_token("1col"));
        assert!(!is_valid_token("a.b"));
        assert!(!is_valid_token(""));
    }

    #[test]
    fn test_toggle_takes_one_name() {
        let mut list = TokenList::from("a");

        assert!(!list.toggle("a b"));
        assert!(!list.toggle("a b"));
        assert!(!list.toggle("1col"));
        assert_eq!(list.tokens.as_slice(), ["a".to_owned()]);

        assert!(!list.toggle("b"));
        assert!(list.toggle("b"));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_item_bounds() {
        let list = TokenList::from("a b c");
        assert_eq!(list.item(0), Some("a"));
        assert_eq!(list.item(-1), Some("c"));
        assert_eq!(list.item(-3), Some("a"));
        assert_eq!(list.item(-4), None);
        assert_eq!(list.item(3), None);
        assert_eq!(list.item(isize::MIN), None);
    }
}
