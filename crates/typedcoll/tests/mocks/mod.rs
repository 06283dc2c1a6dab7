#![allow(dead_code)]

use serde::Serialize;
use typedcoll::Element;

/// Payload with a scalar value and an optional nested element.
#[derive(Debug, Clone, PartialEq, Serialize, Element)]
#[element(getter = "get_value", getter = "get_sub_element")]
pub struct Item {
    value: i64,
    sub_element: Option<SubItem>,
}

impl Item {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            sub_element: None,
        }
    }

    pub fn with_sub_element(value: i64, sub_element: SubItem) -> Self {
        Self {
            value,
            sub_element: Some(sub_element),
        }
    }

    pub fn get_value(&self) -> i64 {
        self.value
    }

    pub fn get_sub_element(&self) -> Option<SubItem> {
        self.sub_element.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Element)]
pub struct SubItem {
    pub label: String,
}

impl SubItem {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
        }
    }
}

/// String wrapper used as a map target.
#[derive(Debug, Clone, PartialEq, Serialize, Element)]
pub struct Label(pub String);

pub fn items(values: &[i64]) -> Vec<Item> {
    values.iter().copied().map(Item::new).collect()
}
