use std::{any::Any, fmt};

use serde::{Serialize, Serializer, ser::Error as _};

use crate::ElementType;

/// A type whose values can be stored in a [`Collection`](crate::Collection).
///
/// Implement it with an empty block to accept the defaults, or derive it with
/// `#[derive(Element)]` to expose the struct's fields as named properties.
pub trait Element: Any + fmt::Debug + Clone + Serialize + Send + Sync {
    /// The runtime type tag checked against a collection's declared element type.
    fn runtime_type(&self) -> ElementType {
        ElementType::of::<Self>()
    }

    /// Named zero-argument accessor used by [`Collection::column`](crate::Collection::column).
    ///
    /// Returns `None` if the type has no property with this name.
    fn property(&self, name: &str) -> Option<Value> {
        let _ = name;
        None
    }
}

macro_rules! impl_element {
    ($($t:ty),*) => {
        $(
            impl Element for $t {}
        )*
    };
}

impl_element!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    String
);

impl<T: Element> Element for Option<T> {}

impl<T: Element> Element for Vec<T> {}

/// Object-safe view of an [`Element`], implemented for every element type.
trait DynElement: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn clone_box(&self) -> Box<dyn DynElement>;

    fn runtime_type(&self) -> ElementType;

    fn property(&self, name: &str) -> Option<Value>;

    fn to_json(&self) -> serde_json::Result<serde_json::Value>;
}

impl<T: Element> DynElement for T {
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_box(&self) -> Box<dyn DynElement> {
        Box::new(self.clone())
    }

    fn runtime_type(&self) -> ElementType {
        Element::runtime_type(self)
    }

    fn property(&self, name: &str) -> Option<Value> {
        Element::property(self, name)
    }

    fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// An owned, type-erased element.
pub struct Value(Box<dyn DynElement>);

impl Value {
    pub fn new<T: Element>(value: T) -> Self {
        Self(Box::new(value))
    }

    pub fn runtime_type(&self) -> ElementType {
        (*self.0).runtime_type()
    }

    /// Short name of the runtime type.
    pub fn type_name(&self) -> &'static str {
        self.runtime_type().short_name()
    }

    #[inline]
    pub fn is<T: Element>(&self) -> bool {
        (*self.0).as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Element>(&self) -> Option<&T> {
        (*self.0).as_any().downcast_ref::<T>()
    }

    /// Unwraps the concrete element, handing the value back if it is not a `T`.
    ///
    /// The type is checked before the box is converted to `Box<dyn Any>`,
    /// because a failed `Box<dyn Any>` downcast cannot be turned back into a `Value`.
    pub fn downcast<T: Element>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.0.into_any().downcast::<T>() {
            Ok(value) => Ok(*value),
            // `is::<T>` above compares the same `TypeId` that `downcast` checks
            Err(_) => unreachable!("runtime type checked above"),
        }
    }

    pub fn property(&self, name: &str) -> Option<Value> {
        (*self.0).property(name)
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        (*self.0).to_json()
    }
}

impl<T: Element> From<T> for Value {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        Self((*self.0).clone_box())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}
