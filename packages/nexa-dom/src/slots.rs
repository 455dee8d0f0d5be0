//! Grouping of component children by their `slot` attribute.

use smallvec::SmallVec;
use std::rc::Rc;

/// Bucket for children without a slot name.
pub const DEFAULT_SLOT: &str = "default";

/// A child that may name the slot it renders into.
pub trait Slotted {
    /// The slot name, if the child carries a non-empty one.
    fn slot(&self) -> Option<String>;
}

impl<T: Slotted + ?Sized> Slotted for &T {
    fn slot(&self) -> Option<String> {
        (**self).slot()
    }
}

impl<T: Slotted + ?Sized> Slotted for Rc<T> {
    fn slot(&self) -> Option<String> {
        (**self).slot()
    }
}

type Bucket<T> = SmallVec<[T; 2]>;

/// Named groups of children, in the order each name was first seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Slots<T> {
    buckets: Vec<(String, Bucket<T>)>,
}

impl<T> Default for Slots<T> {
    fn default() -> Self {
        Self {
            buckets: Vec::new(),
        }
    }
}

impl<T> Slots<T> {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, name: String, child: T) {
        match self.buckets.iter_mut().find(|(n, _)| *n == name) {
            Some((_, bucket)) => bucket.push(child),
            None => {
                let mut bucket = Bucket::new();
                bucket.push(child);
                self.buckets.push((name, bucket));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&[T]> {
        self.buckets
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bucket)| bucket.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Children without a slot name. Only [`parse_slots`] fills it.
    pub fn default_slot(&self) -> Option<&[T]> {
        self.get(DEFAULT_SLOT)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buckets.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.buckets.iter().map(|(n, b)| (n.as_str(), b.as_slice()))
    }

    /// Number of named groups.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Groups children by slot name, leaving `children` untouched.
///
/// Missing children are skipped. Children without a slot name land in the
/// [`DEFAULT_SLOT`] bucket.
pub fn parse_slots<T: Slotted>(children: &[Option<T>]) -> Slots<&T> {
    let mut slots = Slots::new();
    for child in children.iter().flatten() {
        let name = child.slot().unwrap_or_else(|| DEFAULT_SLOT.to_owned());
        slots.push(name, child);
    }
    slots
}

/// Moves children that name a slot out of `children` into their groups,
/// leaving `None` behind.
///
/// Children without a slot name stay where they are; there is no default
/// bucket.
pub fn extract_slots<T: Slotted>(children: &mut [Option<T>]) -> Slots<T> {
    let mut slots = Slots::new();
    for entry in children.iter_mut() {
        let Some(name) = entry.as_ref().and_then(|child| child.slot()) else {
            continue;
        };
        if let Some(child) = entry.take() {
            slots.push(name, child);
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(Option<&'static str>);

    impl Slotted for Named {
        fn slot(&self) -> Option<String> {
            self.0.filter(|n| !n.is_empty()).map(str::to_owned)
        }
    }

    #[test]
    fn test_bucket_order_follows_first_sighting() {
        let children = [
            Some(Named(Some("b"))),
            Some(Named(None)),
            Some(Named(Some("a"))),
            Some(Named(Some("b"))),
        ];
        let slots = parse_slots(&children);

        assert_eq!(slots.names().collect::<Vec<_>>(), vec!["b", "default", "a"]);
        assert_eq!(slots.get("b").map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_empty_name_is_unnamed() {
        let mut children = [Some(Named(Some("")))];
        assert!(extract_slots(&mut children).is_empty());
        assert!(children[0].is_some());
    }
}
