// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::Result;
use condeval::*;
use serde_json::json;

#[test]
fn extraction_is_idempotent() -> Result<()> {
    let doc = json!({"orders": [{"items": [{"sku": "a"}, {"sku": "b"}]}, {"items": [{"sku": "c"}]}]});
    let field = Field::new("orders.items.sku", SemanticType::Keyword);
    let mut record = Record::new(&doc);

    let first = record.extract(&field)?.to_vec();
    let second = record.extract(&field)?.to_vec();
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec![TypedValue::from("a"), TypedValue::from("b"), TypedValue::from("c")]
    );
    assert_eq!(record.cached_len(), 1);
    Ok(())
}

#[test]
fn nested_one_to_many_is_ambiguous_for_single_value_operators() -> Result<()> {
    let schema = Schema::new().with("items.tag", SemanticType::Keyword);
    let doc = json!({"items": [{"tag": "a"}, {"tag": "b"}]});

    let eq = compile(
        Some(&ConditionConfig::leaf("items.tag", "eq", json!("a"))),
        &schema,
    )?
    .expect("predicate");
    assert_eq!(
        eq.passes_value(&doc),
        Err(EvaluationError::Ambiguous {
            field: "items.tag".to_string(),
            count: 2,
        })
    );

    let contain = compile(
        Some(&ConditionConfig::leaf("items.tag", "contain", json!(["a", "b"]))),
        &schema,
    )?
    .expect("predicate");
    assert!(contain.passes_value(&doc)?);
    Ok(())
}

#[test]
fn one_record_shared_by_many_conditions() -> Result<()> {
    let schema = Schema::new()
        .with("a", SemanticType::Long)
        .with("b", SemanticType::Keyword);
    let config = ConditionConfig::and(vec![
        ConditionConfig::leaf("a", "gt", json!(1)),
        ConditionConfig::leaf("a", "lt", json!(10)),
        ConditionConfig::unary("b", "not_empty"),
    ]);
    let predicate = compile(Some(&config), &schema)?.expect("predicate");

    let doc = json!({"a": 5, "b": "x"});
    let mut record = Record::from(&doc);
    assert!(predicate.passes(&mut record)?);
    assert!(record.is_cached(&Field::new("a", SemanticType::Long)));
    assert_eq!(record.cached_len(), 2);

    // Second pass is served from the cache.
    assert!(predicate.passes(&mut record)?);
    assert_eq!(record.cached_len(), 2);
    Ok(())
}

#[test]
fn failed_coercion_is_not_cached() {
    let doc = json!({"when": "yesterday"});
    let field = Field::new("when", SemanticType::Date);
    let mut record = Record::new(&doc);

    for _ in 0..2 {
        assert!(matches!(
            record.extract(&field),
            Err(EvaluationError::InvalidValue { semantic_type: SemanticType::Date, .. })
        ));
    }
    assert!(!record.is_cached(&field));
}

#[test]
fn dates_keep_nanoseconds() -> Result<()> {
    let doc = json!({"t": "2024-01-01T00:00:00.000000001+00:00"});
    let field = Field::new("t", SemanticType::Date);
    let mut record = Record::new(&doc);
    let value = record.extract_single(&field)?.expect("value");
    assert_eq!(value.to_string(), "2024-01-01T00:00:00.000000001Z");
    Ok(())
}
