use std::iter::Sum;

use log::debug;

use crate::{Alignment, Collection, Element, ElementType, Error, MapOptions, Result, Value};

impl Collection {
    /// Applies `f` to every element and collects the results.
    ///
    /// The result's element type is the runtime type of the first mapped value.
    /// Fails with [`Error::EmptySource`] on an empty collection and with
    /// [`Error::InvalidElement`] if a later value has a different type.
    pub fn map<F>(&self, mut f: F) -> Result<Collection>
    where
        F: FnMut(&Value) -> Value,
    {
        self.map_with(&[], MapOptions::default(), |value, _| f(value))
    }

    /// Like [`map`](Self::map), iterating `others` in lockstep with `self`.
    ///
    /// `f` receives the primary value and one entry per additional collection,
    /// paired by iteration position. See [`Alignment`] for what happens when
    /// the lengths differ.
    pub fn map_with<F>(
        &self,
        others: &[&Collection],
        options: MapOptions,
        mut f: F,
    ) -> Result<Collection>
    where
        F: FnMut(&Value, &[Option<&Value>]) -> Value,
    {
        let len = match options.alignment {
            Alignment::Shortest => others
                .iter()
                .map(|c| c.len())
                .fold(self.len(), usize::min),
            Alignment::Primary => self.len(),
        };

        let mut iters = others.iter().map(|c| c.values()).collect::<Vec<_>>();
        let mut row = Vec::with_capacity(others.len());
        let mut mapped = Vec::with_capacity(len);

        for value in self.values().take(len) {
            row.clear();
            row.extend(iters.iter_mut().map(Iterator::next));
            mapped.push(f(value, &row));
        }

        Self::infer("map", mapped)
    }

    /// Maps with a statically known output type.
    ///
    /// Elements are read as `T`, which must be the declared element type. The
    /// result is declared as `U`, so an empty source yields an empty collection.
    pub fn map_as<T, U, F>(&self, f: F) -> Result<Collection>
    where
        T: Element,
        U: Element,
        F: FnMut(&T) -> U,
    {
        Collection::try_new(ElementType::of::<U>(), self.iter_as::<T>()?.map(f))
    }

    /// Splits the elements into consecutive collections of at most `size` elements.
    ///
    /// The result is a collection of collections; every chunk is declared with
    /// this collection's element type and re-indexed from zero.
    pub fn chunk(&self, size: usize) -> Result<Collection> {
        if size == 0 {
            return Err(Error::InvalidArgument(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if self.is_empty() {
            return Err(Error::EmptySource { operation: "chunk" });
        }

        let inner = self.element_type().clone();
        let mut chunks = Collection::new(ElementType::collection_of(inner.clone()));

        let values = self.values().collect::<Vec<_>>();
        for group in values.chunks(size) {
            let chunk =
                Collection::try_new(inner.clone(), group.iter().map(|&value| value.clone()))?;
            chunks.push(chunk)?;
        }

        debug!(
            "chunk: split {} elements into {} chunks of {size}",
            self.len(),
            chunks.len()
        );

        Ok(chunks)
    }

    /// Collects the named property of every element.
    ///
    /// The result's element type is the runtime type of the first element's property.
    pub fn column(&self, property: &str) -> Result<Collection> {
        Self::infer("column", self.properties(property)?)
    }

    /// Collects `f` applied to the named property of every element.
    ///
    /// The result's element type is the runtime type of `f`'s first output,
    /// independent of the property's own type.
    pub fn column_with<F>(&self, property: &str, f: F) -> Result<Collection>
    where
        F: FnMut(Value) -> Value,
    {
        let transformed = self.properties(property)?.into_iter().map(f).collect();
        Self::infer("column", transformed)
    }

    /// Sums `f` over every element. An empty collection sums to zero.
    pub fn sum<S, F>(&self, f: F) -> S
    where
        S: Sum<S>,
        F: FnMut(&Value) -> S,
    {
        self.values().map(f).sum()
    }

    /// Like [`sum`](Self::sum), reading elements as the declared type `T`.
    pub fn sum_as<T, S, F>(&self, f: F) -> Result<S>
    where
        T: Element,
        S: Sum<S>,
        F: FnMut(&T) -> S,
    {
        Ok(self.iter_as::<T>()?.map(f).sum())
    }

    fn properties(&self, property: &str) -> Result<Vec<Value>> {
        if self.is_empty() {
            return Err(Error::EmptySource { operation: "column" });
        }

        self.values()
            .map(|value| {
                value.property(property).ok_or_else(|| Error::MissingProperty {
                    property: property.to_string(),
                    type_name: value.type_name(),
                })
            })
            .collect()
    }

    /// Builds a collection declared as the runtime type of the first value.
    fn infer(operation: &'static str, values: Vec<Value>) -> Result<Collection> {
        let Some(first) = values.first() else {
            return Err(Error::EmptySource { operation });
        };

        let element_type = first.runtime_type();
        debug!(
            "{operation}: inferred {element_type} from the first of {} values",
            values.len()
        );

        Collection::try_new(element_type, values)
    }
}
