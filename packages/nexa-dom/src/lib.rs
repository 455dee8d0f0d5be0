//! Component-facing DOM helpers: inline style maps with vendor-prefix
//! resolution, class token lists and slot grouping of child nodes.

pub mod error;
pub mod prefix;
pub mod slots;
pub mod style_map;
pub mod token_list;
pub mod vnode;

pub use error::{BoxError, DomError};
pub use prefix::{install_prefixed, property};
pub use slots::{DEFAULT_SLOT, Slots, Slotted, extract_slots, parse_slots};
pub use style_map::{StyleEntry, StyleMap, StyleSource, StyleValue};
pub use token_list::{TokenList, TokenSource, is_valid_token};
pub use vnode::{Element, VNode};
