use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// A memoized single-argument pure function.
///
/// The cache is keyed by the exact argument and never evicts; it lives as
/// long as the wrapper does.
pub struct Memoized<F, R> {
    func: F,
    cache: RefCell<FxHashMap<String, R>>,
}

impl<F, R> Memoized<F, R>
where
    F: Fn(&str) -> R,
    R: Clone,
{
    pub fn new(func: F) -> Self {
        Self {
            func,
            cache: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn call(&self, arg: &str) -> R {
        if let Some(hit) = self.cache.borrow().get(arg) {
            return hit.clone();
        }

        // The borrow is released before `func` runs so it may re-enter.
        let value = (self.func)(arg);
        self.cache
            .borrow_mut()
            .insert(arg.to_owned(), value.clone());
        value
    }

    /// Number of distinct arguments seen so far.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }
}

/// Create a cached version of a pure function.
pub fn cached<F, R>(func: F) -> Memoized<F, R>
where
    F: Fn(&str) -> R,
    R: Clone,
{
    Memoized::new(func)
}
