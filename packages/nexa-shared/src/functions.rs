use crate::value::{Object, Value};
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Accepts anything and does nothing. Pass a tuple for several arguments.
pub fn noop<Args>(_args: Args) {}

/// Ensure a function is called only once.
///
/// Every later call returns the first call's result, whatever its argument.
pub fn once<A, R, F>(mut func: F) -> impl FnMut(A) -> R
where
    F: FnMut(A) -> R,
    R: Clone,
{
    let mut result: Option<R> = None;
    move |arg| result.get_or_insert_with(|| func(arg)).clone()
}

/// Shallow copy of `obj` without the keys in `exclude`.
pub fn without(obj: &Object, exclude: &[&str]) -> Object {
    obj.iter()
        .filter(|(k, _)| !exclude.contains(k))
        .map(|(k, v)| (k.to_owned(), v.clone()))
        .collect()
}

/// Distinct items in first-seen order.
pub fn unique<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut seen = FxHashSet::default();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// A registered symbol for `name`.
pub fn symbol(name: &str) -> Value {
    Value::Symbol(name.to_owned())
}
