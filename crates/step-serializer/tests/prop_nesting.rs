/// Property-based tests for nested value serialization.
///
/// Generates random value trees (arrays and inline entities nested a few
/// levels deep) and checks structural properties of the emitted token
/// sequence:
/// - every start marker has a matching end marker, properly nested
/// - exactly one value token per leaf, in depth-first order
/// - data entities are emitted in insertion order regardless of their ids
use proptest::prelude::*;
use step_serializer::{
    write_step_to_string, RecordingSink, SinkEvent, StepDocument, StepObject, StepSerializer,
    StepValue,
};

// ============================================================================
// Strategies
// ============================================================================

fn arb_leaf() -> impl Strategy<Value = StepValue> {
    prop_oneof![
        Just(StepValue::Null),
        Just(StepValue::Overridden),
        any::<bool>().prop_map(StepValue::Boolean),
        any::<i16>().prop_map(StepValue::integer16),
        any::<i32>().prop_map(StepValue::integer32),
        any::<i64>().prop_map(StepValue::integer64),
        (-1.0e12f64..1.0e12).prop_map(StepValue::Float),
        "[A-Z_]{1,12}".prop_map(StepValue::Enumeration),
        "[ -~]{0,16}".prop_map(StepValue::String),
        (1u64..10_000).prop_map(StepValue::LineReference),
    ]
}

fn arb_value() -> impl Strategy<Value = StepValue> {
    arb_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(StepValue::Array),
            ("[A-Z][A-Z_]{0,15}", prop::collection::vec(inner, 0..4))
                .prop_map(|(name, props)| StepValue::Entity(StepObject::new(name, props))),
        ]
    })
}

fn arb_object() -> impl Strategy<Value = StepObject> {
    ("[A-Z][A-Z_]{0,15}", prop::collection::vec(arb_value(), 0..6))
        .prop_map(|(name, props)| StepObject::new(name, props))
}

// ============================================================================
// Helpers
// ============================================================================

/// Number of value tokens a value should produce.
fn leaf_count(value: &StepValue) -> usize {
    match value {
        StepValue::Array(items) => items.iter().map(leaf_count).sum(),
        StepValue::Entity(object) => object.properties.iter().map(leaf_count).sum(),
        _ => 1,
    }
}

fn is_value_token(event: &SinkEvent) -> bool {
    matches!(
        event,
        SinkEvent::Overridden
            | SinkEvent::Enum(_)
            | SinkEvent::String(_)
            | SinkEvent::I16(_)
            | SinkEvent::I32(_)
            | SinkEvent::I64(_)
            | SinkEvent::F64(_)
            | SinkEvent::Bool(_)
            | SinkEvent::Null
            | SinkEvent::LineReference(_)
    )
}

fn record(doc: &StepDocument) -> Vec<SinkEvent> {
    let mut sink = RecordingSink::new();
    StepSerializer::new().serialize(&mut sink, doc).unwrap();
    sink.into_events()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn markers_are_balanced(object in arb_object()) {
        let mut doc = StepDocument::new();
        doc.insert_entity(1, object);

        let mut stack = Vec::new();
        for event in record(&doc) {
            match event {
                SinkEvent::StartArray | SinkEvent::StartObject => stack.push(event),
                SinkEvent::EndArray => {
                    prop_assert_eq!(stack.pop(), Some(SinkEvent::StartArray));
                }
                SinkEvent::EndObject => {
                    prop_assert_eq!(stack.pop(), Some(SinkEvent::StartObject));
                }
                _ => {}
            }
        }
        prop_assert!(stack.is_empty());
    }

    #[test]
    fn one_value_token_per_leaf(object in arb_object()) {
        let expected: usize = object.properties.iter().map(leaf_count).sum();

        let mut doc = StepDocument::new();
        doc.insert_entity(1, object);

        let tokens = record(&doc).iter().filter(|e| is_value_token(e)).count();
        prop_assert_eq!(tokens, expected);
    }

    #[test]
    fn entities_follow_insertion_order(ids in prop::collection::vec(1u64..1_000_000, 0..20)) {
        let mut doc = StepDocument::new();
        for &id in &ids {
            doc.insert_entity(id, StepObject::new("ENTITY", vec![]));
        }
        let expected: Vec<u64> = doc.data.keys().copied().collect();

        let emitted: Vec<u64> = record(&doc)
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::LineIdentifier(id) => Some(id),
                _ => None,
            })
            .collect();
        prop_assert_eq!(emitted, expected);
    }

    #[test]
    fn text_output_has_one_line_per_entity(objects in prop::collection::vec(arb_object(), 0..8)) {
        let mut doc = StepDocument::new();
        for (i, object) in objects.into_iter().enumerate() {
            doc.insert_entity(i as u64 + 1, object);
        }

        let text = write_step_to_string(&doc).unwrap();
        let entity_lines = text.lines().filter(|l| l.starts_with('#')).count();
        prop_assert_eq!(entity_lines, doc.data.len());
        prop_assert!(text.ends_with("ENDSEC;\nEND-ISO-10303-21;\n"));
    }
}
