#![doc = include_str!("../README.md")]

#[cfg(feature = "derive")]
pub use typedcoll_derive::Element;

mod collection;
mod element;
mod element_type;
mod error;
mod options;
pub mod registry;

pub use collection::*;
pub use element::*;
pub use element_type::*;
pub use error::*;
pub use options::*;
