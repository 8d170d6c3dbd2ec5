// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

// Laws that must hold for every record, checked over small generated inputs.

use anyhow::Result;
use condeval::*;
use serde_json::{json, Value};

fn schema() -> Schema {
    Schema::new()
        .with("n", SemanticType::Integer)
        .with("s", SemanticType::Keyword)
        .with("tags", SemanticType::Keyword)
        .with("d", SemanticType::Date)
}

fn build(config: ConditionConfig) -> Result<Predicate> {
    Ok(compile(Some(&config), &schema())?.expect("predicate"))
}

fn numbers() -> impl Iterator<Item = Value> {
    (-3..25).map(|n| json!({ "n": n }))
}

#[test]
fn range_is_half_open() -> Result<()> {
    for (low, high) in [(0, 10), (5, 6), (7, 7), (-2, 20)] {
        let range = build(ConditionConfig::leaf("n", "range", json!([low, high])))?;
        let out_range = build(ConditionConfig::leaf("n", "out_range", json!([low, high])))?;
        let explicit = build(ConditionConfig::and(vec![
            ConditionConfig::leaf("n", "gte", json!(low)),
            ConditionConfig::leaf("n", "lt", json!(high)),
        ]))?;

        for doc in numbers() {
            let inside = range.passes_value(&doc)?;
            assert_eq!(inside, explicit.passes_value(&doc)?, "{doc} in [{low}, {high})");
            assert_eq!(!inside, out_range.passes_value(&doc)?, "{doc} out [{low}, {high})");
        }
    }
    Ok(())
}

#[test]
fn range_on_empty_interval_is_never_satisfied() -> Result<()> {
    let range = build(ConditionConfig::leaf("n", "range", json!([7, 7])))?;
    for doc in numbers() {
        assert!(!range.passes_value(&doc)?);
    }
    Ok(())
}

#[test]
fn de_morgan() -> Result<()> {
    let p = |n: i64| ConditionConfig::leaf("n", "gt", json!(n));
    let not_p = |n: i64| ConditionConfig::leaf("n", "lte", json!(n));
    let q = |s: &str| ConditionConfig::leaf("s", "eq", json!(s));
    let not_q = |s: &str| ConditionConfig::leaf("s", "not_eq", json!(s));

    // not(p and q) == (not p) or (not q), on records where both fields are present.
    let conjunction = build(ConditionConfig::and(vec![p(5), q("x")]))?;
    let negated = build(ConditionConfig::or(vec![not_p(5), not_q("x")]))?;

    for s in ["x", "y"] {
        for mut doc in numbers() {
            doc["s"] = json!(s);
            assert_eq!(conjunction.passes_value(&doc)?, !negated.passes_value(&doc)?, "{doc}");
        }
    }
    Ok(())
}

#[test]
fn contain_and_not_contain_are_complementary_on_single_literals() -> Result<()> {
    let contain = build(ConditionConfig::leaf("tags", "contain", json!("red")))?;
    let not_contain = build(ConditionConfig::leaf("tags", "not_contain", json!("red")))?;

    for tags in [json!(["red"]), json!(["blue", "red"]), json!(["blue"]), json!([]), json!("red")] {
        let doc = json!({ "tags": tags });
        assert_ne!(contain.passes_value(&doc)?, not_contain.passes_value(&doc)?, "{doc}");
    }
    Ok(())
}

#[test]
fn in_and_not_in_are_complementary_on_present_values() -> Result<()> {
    let within = build(ConditionConfig::leaf("s", "in", json!(["a", "b"])))?;
    let outside = build(ConditionConfig::leaf("s", "not_in", json!(["a", "b"])))?;

    for s in ["a", "b", "c", ""] {
        let doc = json!({ "s": s });
        assert_ne!(within.passes_value(&doc)?, outside.passes_value(&doc)?, "{doc}");
    }

    // Neither holds on an absent field.
    let doc = json!({});
    assert!(!within.passes_value(&doc)?);
    assert!(!outside.passes_value(&doc)?);
    Ok(())
}

#[test]
fn absent_field_fails_every_comparison() -> Result<()> {
    for op in ["eq", "not_eq", "gt", "gte", "lt", "lte"] {
        let predicate = build(ConditionConfig::leaf("n", op, json!(5)))?;
        assert!(!predicate.passes_value(&json!({"other": 5}))?, "{op}");
    }
    Ok(())
}

#[test]
fn date_range_excludes_values_below_a_nanosecond_bound() -> Result<()> {
    let range = build(ConditionConfig::leaf(
        "d",
        "range",
        json!(["2024-01-01T00:00:00.000000001Z", "2024-01-02T00:00:00Z"]),
    ))?;
    assert!(!range.passes_value(&json!({"d": "2024-01-01T00:00:00Z"}))?);
    assert!(range.passes_value(&json!({"d": "2024-01-01T00:00:00.000000001Z"}))?);
    Ok(())
}

#[test]
fn numeric_range_bounds_are_parsed_as_numbers() -> Result<()> {
    let range = build(ConditionConfig::leaf("n", "range", json!([1, 100])))?;
    assert!(range.passes_value(&json!({"n": 50}))?);

    assert!(matches!(
        compile(
            Some(&ConditionConfig::leaf("n", "range", json!(["2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z"]))),
            &schema(),
        ),
        Err(ConstructionError::InvalidLiteral { semantic_type: SemanticType::Integer, .. })
    ));
    Ok(())
}

#[test]
fn construction_errors_name_the_field() {
    let cases = [
        (ConditionConfig::leaf("missing", "eq", json!(1)), "field `missing` not in schema"),
        (ConditionConfig::leaf("n", "in", json!([1, "2"])), "field `n`: `in` expects a homogeneous array"),
        (ConditionConfig::leaf("n", "like", json!("1")), "field `n`: `like` is not supported on integer fields"),
        (ConditionConfig::leaf("s", "eq", json!(["a"])), "field `s`: `eq` expects a single value"),
    ];

    for (config, expected) in cases {
        match compile(Some(&config), &schema()) {
            Err(e) => assert_eq!(e.to_string(), expected),
            Ok(p) => panic!("expected `{expected}`, built {p:?}"),
        }
    }
}

#[test]
fn value_source_must_be_constant() {
    let mut config = ConditionConfig::leaf("n", "eq", json!(1));
    config.value_from = Some("document".to_string());
    assert_eq!(
        compile(Some(&config), &schema()).err(),
        Some(ConstructionError::UnsupportedValueSource {
            field: "n".to_string(),
            value_from: "document".to_string(),
        })
    );
}
