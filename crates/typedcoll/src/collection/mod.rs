use std::collections::{BTreeMap, btree_map};

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{Element, ElementType, Error, Result, Value, registry};

mod transform;

/// An ordered collection whose elements all satisfy one declared [`ElementType`].
///
/// Elements are addressed by `usize` indices. Indices are dense when built
/// with [`push`](Self::push), but [`set`](Self::set) may insert at any index,
/// leaving gaps. Iteration and serialization follow ascending index order.
///
/// Every mutation goes through [`ensure_instance_of`](Self::ensure_instance_of)
/// and leaves the collection untouched when it fails.
#[derive(Debug, Clone)]
pub struct Collection {
    element_type: ElementType,
    elements: BTreeMap<usize, Value>,
}

impl Collection {
    /// Creates an empty collection of `element_type`.
    pub fn new(element_type: ElementType) -> Self {
        registry::register_type(&element_type);
        Self {
            element_type,
            elements: BTreeMap::new(),
        }
    }

    /// Creates a collection of `element_type` holding `values` at indices `0..`.
    ///
    /// Fails on the first value that is not an instance of `element_type`.
    pub fn try_new<I>(element_type: ElementType, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let mut collection = Self::new(element_type);
        for value in values {
            collection.push(value)?;
        }
        Ok(collection)
    }

    /// Creates a collection declared as `T` from statically typed values.
    pub fn from_elements<T, I>(values: I) -> Result<Self>
    where
        T: Element,
        I: IntoIterator<Item = T>,
    {
        Self::try_new(ElementType::of::<T>(), values)
    }

    /// Creates a collection whose element type is looked up by name in the [`registry`].
    pub fn named<I>(type_name: &str, values: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::try_new(registry::resolve(type_name)?, values)
    }

    #[inline]
    pub fn element_type(&self) -> &ElementType {
        &self.element_type
    }

    /// Fails with [`Error::InvalidElement`] unless `value` is an instance of the element type.
    pub fn ensure_instance_of(&self, value: &Value) -> Result<()> {
        if self.element_type.accepts(&value.runtime_type()) {
            Ok(())
        } else {
            Err(Error::InvalidElement {
                value: value.clone(),
                expected: self.element_type.clone(),
            })
        }
    }

    /// Appends `value` one past the highest index and returns that index.
    pub fn push(&mut self, value: impl Into<Value>) -> Result<usize> {
        let value = value.into();
        self.ensure_instance_of(&value)?;

        let index = self.next_index()?;
        self.elements.insert(index, value);
        Ok(index)
    }

    /// Stores `value` at `index`, returning the value it replaced.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Option<Value>> {
        let value = value.into();
        self.ensure_instance_of(&value)?;

        Ok(self.elements.insert(index, value))
    }

    /// Removes and returns the value at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Value> {
        let len = self.len();
        self.elements
            .remove(&index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Removes and returns the value at the highest index.
    pub fn pop(&mut self) -> Result<Value> {
        self.elements
            .pop_last()
            .map(|(_, value)| value)
            .ok_or(Error::IndexOutOfRange { index: 0, len: 0 })
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn contains_index(&self, index: usize) -> bool {
        self.elements.contains_key(&index)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.elements.get(&index)
    }

    /// Returns the element at `index` as a `T`.
    pub fn get_as<T: Element>(&self, index: usize) -> Result<&T> {
        self.ensure_declared_as::<T>()?;
        self.get(index)
            .and_then(Value::downcast_ref::<T>)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    pub fn first(&self) -> Option<&Value> {
        self.elements.values().next()
    }

    pub fn last(&self) -> Option<&Value> {
        self.elements.values().next_back()
    }

    /// Iterates over `(index, value)` pairs in index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (usize, &Value)> {
        self.elements.iter().map(|(&index, value)| (index, value))
    }

    pub fn values(&self) -> btree_map::Values<'_, usize, Value> {
        self.elements.values()
    }

    /// Iterates over the elements as `T`, which must be the declared element type.
    pub fn iter_as<T: Element>(&self) -> Result<impl DoubleEndedIterator<Item = &T>> {
        self.ensure_declared_as::<T>()?;
        Ok(self.values().filter_map(Value::downcast_ref::<T>))
    }

    /// Index-to-JSON projection of the current contents.
    pub fn to_json_map(&self) -> Result<BTreeMap<usize, serde_json::Value>> {
        self.iter()
            .map(|(index, value)| -> Result<(usize, serde_json::Value)> {
                Ok((index, value.to_json()?))
            })
            .collect()
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// One past the highest occupied index, or an error if that is `usize::MAX`.
    fn next_index(&self) -> Result<usize> {
        match self.elements.last_key_value() {
            None => Ok(0),
            Some((&index, _)) => index.checked_add(1).ok_or(Error::IndexOutOfRange {
                index,
                len: self.len(),
            }),
        }
    }

    fn ensure_declared_as<T: Element>(&self) -> Result<()> {
        let requested = ElementType::of::<T>();
        if requested.id() == self.element_type.id() {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                requested,
                declared: self.element_type.clone(),
            })
        }
    }
}

impl Element for Collection {
    fn runtime_type(&self) -> ElementType {
        ElementType::collection_of(self.element_type.clone())
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (index, value) in &self.elements {
            map.serialize_entry(index, value)?;
        }
        map.end()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Value;
    type IntoIter = btree_map::Values<'a, usize, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values()
    }
}
