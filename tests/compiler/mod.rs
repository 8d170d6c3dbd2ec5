// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use anyhow::Result;
use condeval::*;
use serde_json::json;

fn schema() -> Schema {
    Schema::new()
        .with("a", SemanticType::Long)
        .with("title", SemanticType::Text)
        .with("title.keyword", SemanticType::Keyword)
}

fn a_eq(n: i64) -> ConditionConfig {
    ConditionConfig::leaf("a", "eq", json!(n))
}

#[test]
fn absent_config_compiles_to_nothing() -> Result<()> {
    assert!(compile(None, &schema())?.is_none());
    assert!(Filter::new(None, &schema())?.is_empty());
    assert!(Filter::from_json_str("null", &schema())?.passes_value(&json!({"a": 1}))?);
    Ok(())
}

#[test]
fn fan_out_limit() -> Result<()> {
    let schema = schema();
    let ten = ConditionConfig::or((0..10).map(a_eq).collect());
    let predicate = compile(Some(&ten), &schema)?.expect("predicate");
    assert!(predicate.passes_value(&json!({"a": 9}))?);
    assert!(!predicate.passes_value(&json!({"a": 10}))?);

    let ten = ConditionConfig::and(
        (0..10)
            .map(|n| ConditionConfig::leaf("a", "gte", json!(n)))
            .collect(),
    );
    let predicate = compile(Some(&ten), &schema)?.expect("predicate");
    assert!(predicate.passes_value(&json!({"a": 9}))?);
    assert!(!predicate.passes_value(&json!({"a": 8}))?);

    let eleven = ConditionConfig::and((0..11).map(a_eq).collect());
    assert_eq!(
        compile(Some(&eleven), &schema).err(),
        Some(ConstructionError::SubConditionCount {
            operator: Operator::And,
            count: 11,
            max: MAX_SUB_CONDITIONS,
        })
    );
    Ok(())
}

#[test]
fn configurable_fan_out_limit() -> Result<()> {
    let schema = schema();
    let config = ConditionConfig::or((0..11).map(a_eq).collect());
    let compiler = Compiler::new(&schema).with_max_sub_conditions(16);
    assert!(compiler.compile(Some(&config))?.is_some());

    let strict = Compiler::new(&schema).with_max_sub_conditions(2);
    let config = ConditionConfig::and(vec![a_eq(1), a_eq(2), a_eq(3)]);
    assert!(matches!(
        strict.compile(Some(&config)),
        Err(ConstructionError::SubConditionCount { count: 3, max: 2, .. })
    ));
    Ok(())
}

#[test]
fn reserved_operators_fail_before_field_lookup() {
    for op in ["match", "match_phrase", "MATCH"] {
        let config = ConditionConfig::leaf("not_declared", op, json!("x"));
        assert!(matches!(
            compile(Some(&config), &schema()),
            Err(ConstructionError::UnsupportedOperator(Operator::Match | Operator::MatchPhrase))
        ));
    }
}

#[test]
fn operator_tokens_are_case_insensitive() -> Result<()> {
    let config = ConditionConfig::leaf("a", " Not_In ", json!([1, 2]));
    let predicate = compile(Some(&config), &schema())?.expect("predicate");
    assert!(predicate.passes_value(&json!({"a": 3}))?);
    Ok(())
}

#[test]
fn unknown_operator() {
    let config = ConditionConfig::leaf("a", "between", json!([1, 2]));
    assert_eq!(
        compile(Some(&config), &schema()).err(),
        Some(ConstructionError::UnknownOperator("between".to_string()))
    );
}

#[test]
fn wildcard_field_is_text() -> Result<()> {
    let config = ConditionConfig::leaf(WILDCARD_FIELD, "like", json!("needle"));
    let Some(Predicate::Leaf(condition)) = compile(Some(&config), &schema())? else {
        panic!("expected a leaf");
    };
    assert_eq!(condition.field().name(), "*");
    assert_eq!(condition.field().semantic_type(), SemanticType::Text);
    assert_eq!(condition.operator(), Operator::Like);
    Ok(())
}

#[test]
#[cfg(feature = "yaml")]
fn config_loaders() -> Result<()> {
    let schema = schema();
    let json = r#"{
        "operation": "and",
        "sub_conditions": [
            {"field": "a", "operation": "gte", "value_from": "constant", "value": 1},
            null
        ]
    }"#;
    let from_json = ConditionConfig::from_json_str(json)?;

    let yaml = r#"
operation: and
sub_conditions:
  - field: a
    operation: gte
    value_from: constant
    value: 1
  - null
"#;
    let from_yaml = ConditionConfig::from_yaml_str(yaml)?;
    assert_eq!(from_json, from_yaml);

    let predicate = compile(Some(&from_yaml), &schema)?.expect("predicate");
    assert_eq!(predicate.to_string(), "(a gte 1)");
    Ok(())
}

#[test]
#[cfg(feature = "yaml")]
fn schema_loaders() -> Result<()> {
    let json = Schema::from_json_str(r#"{"a": {"type": "long"}, "title": {"type": "text"}}"#)?;
    let yaml = Schema::from_yaml_str("a: {type: long}\ntitle: {type: text, comment: body}")?;
    assert_eq!(json.len(), 2);
    assert_eq!(yaml.get("a"), json.get("a"));
    assert_eq!(yaml.get("title").map(|f| f.comment.as_str()), Some("body"));

    assert!(Schema::from_json_str(r#"{"a": {"type": "uuid"}}"#).is_err());
    Ok(())
}

#[test]
fn search_field_names() {
    let schema = schema();
    let title = schema.field("title").expect("title");
    let keyword = schema.field("title.keyword").expect("title.keyword");
    let a = schema.field("a").expect("a");

    assert_eq!(search_field_name(&title, &schema, false), "title.keyword");
    assert_eq!(search_field_name(&title, &schema, true), "title");
    assert_eq!(search_field_name(&keyword, &schema, true), "title");
    assert_eq!(search_field_name(&keyword, &schema, false), "title.keyword");
    assert_eq!(search_field_name(&a, &schema, true), "a");
}
