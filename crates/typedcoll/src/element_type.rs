use std::{
    any::{Any, TypeId},
    collections::HashMap,
    fmt,
    sync::OnceLock,
};

use parking_lot::Mutex;

use crate::Collection;

/// Runtime descriptor of the type every element of a collection must satisfy.
///
/// Scalar and struct payloads are identified by their [`TypeId`] alone.
/// Collections of collections additionally carry the descriptor of the inner
/// element type, so a `Collection<Element>` does not accept a `Collection<u32>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementType {
    id: TypeId,
    name: &'static str,
    inner: Option<Box<ElementType>>,
}

impl ElementType {
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
            inner: None,
        }
    }

    /// Descriptor of a collection whose elements are all of type `inner`.
    pub fn collection_of(inner: ElementType) -> Self {
        Self {
            inner: Some(Box::new(inner)),
            ..Self::of::<Collection>()
        }
    }

    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped, generics included.
    pub fn short_name(&self) -> &'static str {
        short_type_name(self.name)
    }

    /// Element type of the inner collections, if this describes a collection of collections.
    pub fn inner(&self) -> Option<&ElementType> {
        self.inner.as_deref()
    }

    pub fn is_collection(&self) -> bool {
        self.id == TypeId::of::<Collection>()
    }

    /// Returns true if a value tagged with `actual` is an instance of `self`.
    ///
    /// An untagged collection descriptor (no inner type) accepts any collection.
    pub fn accepts(&self, actual: &ElementType) -> bool {
        if self.id != actual.id {
            return false;
        }
        match (&self.inner, &actual.inner) {
            (None, _) => true,
            (Some(expected), Some(actual)) => expected.accepts(actual),
            (Some(_), None) => false,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(inner) => write!(f, "{}<{inner}>", self.short_name()),
            None => f.write_str(self.short_name()),
        }
    }
}

/// Strips module paths from every path segment of a type name and caches the result.
///
/// `alloc::vec::Vec<core::option::Option<my::Sub>>` becomes `Vec<Option<Sub>>`.
pub fn short_type_name(full: &'static str) -> &'static str {
    static CACHE: OnceLock<Mutex<HashMap<&'static str, &'static str>>> = OnceLock::new();

    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = cache.lock();

    if let Some(&short) = guard.get(full) {
        return short;
    }

    let short: &'static str = Box::leak(strip_paths(full).into_boxed_str());
    guard.insert(full, short);
    short
}

fn strip_paths(full: &str) -> String {
    fn last_segment(path: &str) -> &str {
        path.rsplit("::").next().unwrap_or(path)
    }

    let mut out = String::with_capacity(full.len());
    let mut start = 0;

    for (i, c) in full.char_indices() {
        if matches!(c, '<' | '>' | ',' | '(' | ')' | '[' | ']' | '&' | ';' | ' ' | '*') {
            out.push_str(last_segment(&full[start..i]));
            out.push(c);
            start = i + c.len_utf8();
        }
    }
    out.push_str(last_segment(&full[start..]));

    out
}
