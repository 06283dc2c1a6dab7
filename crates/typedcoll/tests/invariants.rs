mod mocks;

use mocks::{Item, Label};
use proptest::prelude::*;
use typedcoll::{Collection, ElementType, Value};

#[derive(Debug, Clone)]
enum Candidate {
    Item(i64),
    Label(String),
    Int(i64),
}

impl Candidate {
    fn is_item(&self) -> bool {
        matches!(self, Self::Item(_))
    }

    fn into_value(self) -> Value {
        match self {
            Self::Item(n) => Value::new(Item::new(n)),
            Self::Label(s) => Value::new(Label(s)),
            Self::Int(n) => Value::new(n),
        }
    }
}

fn candidate() -> impl Strategy<Value = Candidate> {
    prop_oneof![
        any::<i64>().prop_map(Candidate::Item),
        "[a-z]{0,8}".prop_map(Candidate::Label),
        any::<i64>().prop_map(Candidate::Int),
    ]
}

#[derive(Debug, Clone)]
enum Op {
    Push(Candidate),
    Set(usize, Candidate),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        candidate().prop_map(Op::Push),
        (0..16usize, candidate()).prop_map(|(i, c)| Op::Set(i, c)),
        Just(Op::Pop),
    ]
}

proptest! {
    #[test]
    fn every_stored_element_is_an_instance(ops in prop::collection::vec(op(), 0..64)) {
        let mut collection = Collection::new(ElementType::of::<Item>());

        for op in ops {
            let len = collection.len();
            let before = collection.to_json_map().unwrap();

            match op {
                Op::Push(candidate) => {
                    let valid = candidate.is_item();
                    let result = collection.push(candidate.into_value());
                    prop_assert_eq!(result.is_ok(), valid);
                    if valid {
                        prop_assert_eq!(collection.len(), len + 1);
                    } else {
                        prop_assert_eq!(collection.to_json_map().unwrap(), before);
                    }
                }
                Op::Set(index, candidate) => {
                    let valid = candidate.is_item();
                    let result = collection.set(index, candidate.into_value());
                    prop_assert_eq!(result.is_ok(), valid);
                    if !valid {
                        prop_assert_eq!(collection.to_json_map().unwrap(), before);
                    }
                }
                Op::Pop => {
                    prop_assert_eq!(collection.pop().is_ok(), len > 0);
                }
            }

            prop_assert!(collection.values().all(|value| value.is::<Item>()));
        }
    }

    #[test]
    fn push_places_element_at_previous_len(values in prop::collection::vec(any::<i64>(), 0..32)) {
        let mut collection = Collection::new(ElementType::of::<Item>());

        for (expected, value) in values.iter().enumerate() {
            prop_assert_eq!(collection.push(Item::new(*value)).unwrap(), expected);
        }
        prop_assert_eq!(collection.len(), values.len());
    }

    #[test]
    fn chunk_preserves_order(values in prop::collection::vec(any::<i64>(), 1..40), size in 1..8usize) {
        let source = Collection::from_elements(values.iter().copied().map(Item::new)).unwrap();
        let chunks = source.chunk(size).unwrap();

        prop_assert_eq!(chunks.len(), values.len().div_ceil(size));

        let flattened = chunks
            .iter_as::<Collection>()
            .unwrap()
            .flat_map(|chunk| chunk.iter_as::<Item>().unwrap().map(Item::get_value))
            .collect::<Vec<_>>();
        prop_assert_eq!(flattened, values);
    }
}
