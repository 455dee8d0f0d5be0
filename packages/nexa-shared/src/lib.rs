//! Leaf helpers shared across Nexa packages: value predicates and coercions,
//! memoized string converters, lookup sets, HTML encoding and host
//! environment detection.

pub mod cached;
pub mod coerce;
pub mod env;
pub mod error;
pub mod functions;
pub mod html;
pub mod is;
pub mod make_map;
pub mod strings;
pub mod value;

pub use cached::{Memoized, cached};
pub use env::{BrowserPlatform, Environment, NativePlatform, Platform, WeexPlatform};
pub use error::EnvError;
pub use functions::{noop, once, symbol, unique, without};
pub use html::encode_html;
pub use is::{
    Coerced, is_defined, is_false, is_framework_element, is_native, is_native_source,
    is_object, is_plain_object, is_primitive, is_regexp, is_true, is_undefined,
    is_valid_array_index, to_display_string, to_number, to_raw_type,
};
pub use make_map::{DEFAULT_SEPARATOR, make_map, make_map_accessor};
pub use strings::{camelize, capitalize, hyphenate};
pub use value::{Object, Value};
