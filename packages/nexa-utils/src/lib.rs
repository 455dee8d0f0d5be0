//! The Nexa utility surface in one place.
//!
//! ```
//! use nexa_utils::{StyleMap, TokenList};
//!
//! let style = StyleMap::from("color:red;width:10px;");
//! assert_eq!(style.to_string(), "color:red;width:10px;");
//!
//! let classes = TokenList::from("btn btn primary");
//! assert_eq!(classes.to_string(), "btn primary");
//! ```

pub mod logging;

pub use nexa_shared::env;
pub use nexa_shared::{
    BrowserPlatform, Coerced, DEFAULT_SEPARATOR, EnvError, Environment, Memoized, NativePlatform,
    Object, Platform, Value, WeexPlatform, cached, camelize, capitalize, encode_html, hyphenate,
    is_defined, is_false, is_framework_element, is_native, is_object, is_plain_object,
    is_primitive, is_regexp, is_true, is_undefined, is_valid_array_index, make_map,
    make_map_accessor, noop, once, symbol, to_display_string, to_number, to_raw_type, unique,
    without,
};

pub use nexa_scheduler::{
    ErrorPolicy, HostPrimitives, LocalHost, MacroTask, NextTick, SchedulerError, TaskError, Tick,
    TickContext, next_tick, run_until_idle, with_macro_task,
};
#[cfg(feature = "tokio")]
pub use nexa_scheduler::TokioHost;

pub use nexa_dom::{
    DomError, Slots, Slotted, StyleMap, StyleValue, TokenList, TokenSource, VNode,
    extract_slots, install_prefixed, parse_slots,
};
