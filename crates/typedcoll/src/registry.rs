//! Process-wide lookup from type names to [`ElementType`] descriptors.
//!
//! Backs [`Collection::named`](crate::Collection::named). Primitives and
//! [`Collection`] are always known; other types become resolvable once they
//! are registered explicitly or declared by any collection.

use std::{collections::HashMap, sync::OnceLock};

use log::{trace, warn};
use parking_lot::RwLock;

use crate::{Collection, Element, ElementType, Error, Result};

type Types = HashMap<&'static str, ElementType>;

fn types() -> &'static RwLock<Types> {
    static TYPES: OnceLock<RwLock<Types>> = OnceLock::new();

    TYPES.get_or_init(|| {
        let mut seeded = Types::new();

        macro_rules! seed {
            ($($t:ty),*) => {
                $(
                    insert(&mut seeded, ElementType::of::<$t>());
                )*
            };
        }

        seed!(
            (), bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32,
            f64, String, Collection
        );

        RwLock::new(seeded)
    })
}

fn insert(types: &mut Types, element_type: ElementType) {
    let full = element_type.name();
    let short = element_type.short_name();

    if short != full {
        match types.get(short) {
            Some(existing) if existing.id() != element_type.id() => {
                warn!(
                    "Type name {short} already resolves to {}, {full} is only resolvable by its full name",
                    existing.name()
                );
            }
            Some(_) => {}
            None => {
                types.insert(short, element_type.clone());
            }
        }
    }

    trace!("Registered element type {full}");
    types.insert(full, element_type);
}

/// Registers `T` and returns its descriptor.
pub fn register<T: Element>() -> ElementType {
    let element_type = ElementType::of::<T>();
    register_type(&element_type);
    element_type
}

/// Registers a descriptor. Collection descriptors register their inner types.
pub fn register_type(element_type: &ElementType) {
    if let Some(inner) = element_type.inner() {
        return register_type(inner);
    }

    if types().read().contains_key(element_type.name()) {
        return;
    }

    let mut types = types().write();
    if !types.contains_key(element_type.name()) {
        insert(&mut types, element_type.clone());
    }
}

/// Looks a type up by its full or short name.
pub fn resolve(name: &str) -> Result<ElementType> {
    types()
        .read()
        .get(name)
        .cloned()
        .ok_or_else(|| Error::UnknownType {
            name: name.to_string(),
        })
}

pub fn is_registered(name: &str) -> bool {
    types().read().contains_key(name)
}
