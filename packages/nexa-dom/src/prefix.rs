//! Vendor-prefixed style property lookup.
//!
//! A browser host installs the computed style property names of its engine
//! once; unprefixed names then resolve to the prefixed spelling the engine
//! understands. Without an installed table every name resolves to itself.

use crate::error::{DomError, Result};
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

const VENDOR_PREFIXES: [&str; 4] = ["-webkit-", "-moz-", "-ms-", "-o-"];

static PREFIXED: OnceLock<FxHashMap<String, String>> = OnceLock::new();

/// Length of the leftmost vendor prefix found in `name`.
fn prefix_len(name: &str) -> Option<usize> {
    VENDOR_PREFIXES
        .iter()
        .filter_map(|prefix| name.find(prefix).map(|at| (at, prefix.len())))
        .min_by_key(|&(at, _)| at)
        .map(|(_, len)| len)
}

/// Builds the `unprefixed -> prefixed` table from computed property names.
pub fn prefix_table<I, S>(names: I) -> FxHashMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut table = FxHashMap::default();
    for name in names {
        let name = name.as_ref();
        let Some(len) = prefix_len(name) else { continue };
        if let Some(tail) = name.get(len..) {
            table.insert(tail.to_owned(), name.to_owned());
        }
    }
    table
}

/// Installs the process-wide table. Only the first call succeeds.
pub fn install_prefixed<I, S>(names: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let table = prefix_table(names);
    tracing::debug!("installing {} prefixed style properties", table.len());
    PREFIXED
        .set(table)
        .map_err(|_| DomError::PrefixesInstalled)
}

/// Resolves a style property name to its vendor-prefixed form, if the host
/// needs one.
pub fn property(name: &str) -> &str {
    PREFIXED
        .get()
        .and_then(|table| table.get(name))
        .map_or(name, String::as_str)
}
