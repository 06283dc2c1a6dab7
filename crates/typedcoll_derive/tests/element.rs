use serde::Serialize;
use typedcoll::{Collection, Element, ElementType, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Element)]
#[element(getter = "doubled")]
struct Reading {
    sensor: String,
    #[element(rename = "celsius")]
    temperature: f64,
    #[element(skip)]
    calibration: i32,
}

impl Reading {
    fn doubled(&self) -> f64 {
        self.temperature * 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Element)]
struct Meters(u32);

#[derive(Debug, Clone, PartialEq, Serialize, Element)]
struct Tagged<T> {
    tag: T,
}

fn reading() -> Reading {
    Reading {
        sensor: "north".to_string(),
        temperature: 21.5,
        calibration: 3,
    }
}

#[test]
fn test_named_fields_are_properties() {
    let reading = reading();

    let sensor = reading.property("sensor").and_then(|v| v.downcast::<String>().ok());
    assert_eq!(sensor.as_deref(), Some("north"));

    let celsius = reading.property("celsius").and_then(|v| v.downcast::<f64>().ok());
    assert_eq!(celsius, Some(21.5));
}

#[test]
fn test_skipped_and_renamed_fields_are_hidden() {
    let reading = reading();

    assert!(reading.property("calibration").is_none());
    assert!(reading.property("temperature").is_none());
    assert!(reading.property("missing").is_none());
}

#[test]
fn test_getter_attribute_exposes_method() {
    let doubled = reading().property("doubled").and_then(|v| v.downcast::<f64>().ok());
    assert_eq!(doubled, Some(43.0));
}

#[test]
fn test_tuple_struct_fields_are_numbered() {
    let value = Meters(12).property("0").map(|v| v.runtime_type());
    assert_eq!(value, Some(ElementType::of::<u32>()));
}

#[test]
fn test_generic_struct_exposes_generic_field() {
    let tagged = Tagged { tag: 5_u8 };
    let tag = tagged.property("tag").and_then(|v| v.downcast::<u8>().ok());
    assert_eq!(tag, Some(5));
    assert_eq!(Value::new(tagged).type_name(), "Tagged<u8>");
}

#[test]
fn test_derived_elements_work_with_column() -> typedcoll::Result<()> {
    let readings = Collection::from_elements([reading(), reading()])?;

    let sensors = readings.column("sensor")?;
    assert_eq!(sensors.element_type(), &ElementType::of::<String>());
    assert_eq!(sensors.len(), 2);

    Ok(())
}
