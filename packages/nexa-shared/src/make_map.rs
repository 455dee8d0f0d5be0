use rustc_hash::FxHashSet;

pub const DEFAULT_SEPARATOR: &str = ",";

/// Builds a membership set from a delimited string.
pub fn make_map(source: &str, separator: &str) -> FxHashSet<String> {
    source.split(separator).map(str::to_owned).collect()
}

/// Make a map and return a function for checking if a key is in that map.
///
/// With `expects_lower_case`, lookups are lowercased before checking; the
/// source keys are taken as written.
pub fn make_map_accessor(
    source: &str,
    expects_lower_case: bool,
    separator: &str,
) -> impl Fn(&str) -> bool + use<> {
    let map = make_map(source, separator);
    move |val: &str| {
        if expects_lower_case {
            map.contains(&val.to_lowercase())
        } else {
            map.contains(val)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_map() {
        let map = make_map("div,span,p", DEFAULT_SEPARATOR);
        assert!(map.contains("span"));
        assert!(!map.contains("a"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_accessor_lowercase() {
        let is_tag = make_map_accessor("slot|component", true, "|");
        assert!(is_tag("SLOT"));
        assert!(is_tag("component"));
        assert!(!is_tag("Div"));

        let strict = make_map_accessor("slot", false, DEFAULT_SEPARATOR);
        assert!(!strict("SLOT"));
    }
}
