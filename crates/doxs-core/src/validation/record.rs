//! Documentation record validation against a [`Schema`]

use crate::schema::{Schema, SectionSpec};
use crate::types::{DocRecord, Entry, SectionContent, SectionName, SectionShape};
use crate::validation::base::{json_type_name, ErrorCollector, SchemaValidator, ValidationContext};
use crate::validation::error::{ValidationError, ValidationErrors, ViolationKind};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Validates raw mappings and turns them into [`DocRecord`]s
#[derive(Debug, Clone, Copy)]
pub struct RecordValidator<'s> {
    schema: &'s Schema,
}

impl<'s> RecordValidator<'s> {
    pub fn new(schema: &'s Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Keys outside the schema vocabulary, in input order
    fn check_unknown_keys(
        &self,
        map: &Map<String, Value>,
        ctx: &ValidationContext,
        errors: &mut ErrorCollector,
    ) {
        for key in map.keys() {
            if self.schema.section(key).is_some() {
                continue;
            }
            errors.push(
                ValidationError::new(
                    ViolationKind::UnknownSection,
                    ctx.child(key).path,
                    key.as_str(),
                    format!("Unknown section '{}' is not allowed", key),
                )
                .with_detail("a recognized section name", key.as_str()),
            );
        }
    }

    fn check_required(
        &self,
        map: &Map<String, Value>,
        ctx: &ValidationContext,
        errors: &mut ErrorCollector,
    ) {
        for spec in self.schema.required_sections() {
            let key = spec.name.key();
            match map.get(key) {
                None | Some(Value::Null) => errors.push(
                    ValidationError::new(
                        ViolationKind::MissingRequired,
                        ctx.child(key).path,
                        key,
                        format!("Required section '{}' is missing", key),
                    )
                    .with_detail(format!("'{}' to be present", key), "section is missing"),
                ),
                Some(Value::String(text))
                    if spec.shape == SectionShape::Text && text.trim().is_empty() =>
                {
                    errors.push(
                        ValidationError::new(
                            ViolationKind::EmptyRequired,
                            ctx.child(key).path,
                            key,
                            format!("Required section '{}' must not be blank", key),
                        )
                        .with_detail("non-blank text", "blank text"),
                    )
                }
                Some(_) => {}
            }
        }
    }

    /// Check one section's shape. Returns `None` for null content or when the
    /// section had violations.
    fn check_section(
        &self,
        spec: &SectionSpec,
        value: &Value,
        ctx: &ValidationContext,
        errors: &mut ErrorCollector,
    ) -> Option<SectionContent> {
        if value.is_null() {
            // Null means "present but empty"; required sections were already reported
            return None;
        }

        match spec.shape {
            SectionShape::Text => match value {
                Value::String(text) => Some(SectionContent::Text(text.clone())),
                other => {
                    errors.push(wrong_shape(spec.name, ctx, "a text block", other));
                    None
                }
            },
            SectionShape::Identifiers => match value {
                Value::Object(map) => self.check_entries(map, ctx, errors),
                other => {
                    errors.push(wrong_shape(
                        spec.name,
                        ctx,
                        "a mapping from identifier to description",
                        other,
                    ));
                    None
                }
            },
            SectionShape::Names => match value {
                Value::String(name) => Some(SectionContent::Names(vec![name.clone()])),
                Value::Array(items) => check_names(spec.name, items, ctx, errors),
                other => {
                    errors.push(wrong_shape(spec.name, ctx, "a string or a list of strings", other));
                    None
                }
            },
        }
    }

    fn check_entries(
        &self,
        map: &Map<String, Value>,
        ctx: &ValidationContext,
        errors: &mut ErrorCollector,
    ) -> Option<SectionContent> {
        let before = errors.len();
        let mut entries = Vec::with_capacity(map.len());

        for (name, description) in map {
            let entry_ctx = ctx.child(name);

            if !self.schema.is_identifier(name) {
                errors.push(
                    ValidationError::new(
                        ViolationKind::InvalidIdentifier,
                        entry_ctx.path.clone(),
                        name.as_str(),
                        format!("'{}' is not a valid identifier", name),
                    )
                    .with_detail(
                        format!("key matching {}", self.schema.identifier_pattern()),
                        name.as_str(),
                    ),
                );
            }

            match description {
                Value::String(text) => entries.push(Entry::new(name.as_str(), text.as_str())),
                other => errors.push(
                    ValidationError::new(
                        ViolationKind::WrongShape,
                        entry_ctx.path,
                        name.as_str(),
                        format!("Description of '{}' must be a string", name),
                    )
                    .with_detail("string", json_type_name(other)),
                ),
            }
        }

        (errors.len() == before).then_some(SectionContent::Entries(entries))
    }
}

fn check_names(
    section: SectionName,
    items: &[Value],
    ctx: &ValidationContext,
    errors: &mut ErrorCollector,
) -> Option<SectionContent> {
    let before = errors.len();
    let mut names = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        match item {
            Value::String(name) => names.push(name.clone()),
            other => errors.push(
                ValidationError::new(
                    ViolationKind::WrongShape,
                    ctx.child_index(i).path,
                    section.key(),
                    format!("Items of '{}' must be strings", section),
                )
                .with_detail("string", json_type_name(other)),
            ),
        }
    }

    (errors.len() == before).then_some(SectionContent::Names(names))
}

fn wrong_shape(
    section: SectionName,
    ctx: &ValidationContext,
    expected: &str,
    actual: &Value,
) -> ValidationError {
    ValidationError::new(
        ViolationKind::WrongShape,
        ctx.path.clone(),
        section.key(),
        format!(
            "Section '{}' must be {}, found {}",
            section,
            expected,
            json_type_name(actual)
        ),
    )
    .with_detail(expected, json_type_name(actual))
}

impl SchemaValidator for RecordValidator<'_> {
    type Input = Value;
    type Output = DocRecord;

    fn validate_with_context(
        &self,
        raw: &Value,
        ctx: &ValidationContext,
    ) -> Result<DocRecord, ValidationErrors> {
        let Some(map) = raw.as_object() else {
            return Err(ValidationError::new(
                ViolationKind::WrongShape,
                ctx.path.clone(),
                "$",
                format!("A documentation record must be a mapping, found {}", json_type_name(raw)),
            )
            .with_detail("mapping", json_type_name(raw))
            .into());
        };

        let mut errors = ctx.collector();
        self.check_unknown_keys(map, ctx, &mut errors);
        self.check_required(map, ctx, &mut errors);

        let mut sections = BTreeMap::new();
        for (key, value) in map {
            if errors.is_full() {
                break;
            }
            let Some(spec) = self.schema.section(key) else {
                continue;
            };
            if let Some(content) = self.check_section(spec, value, &ctx.child(key), &mut errors) {
                sections.insert(spec.name, content);
            }
        }

        if !errors.is_empty() {
            let errors = errors.finish();
            debug!(path = %ctx.path, violations = errors.len(), "documentation record rejected");
            return Err(errors);
        }

        trace!(path = %ctx.path, sections = sections.len(), "documentation record accepted");
        Ok(DocRecord::from_parts(self.schema.version().clone(), sections))
    }
}

/// Validate a raw mapping against the standard schema
pub fn validate_record(raw: &Value) -> Result<DocRecord, ValidationErrors> {
    RecordValidator::new(Schema::standard()).validate(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::base::ValidationConfig;
    use serde_json::json;

    fn validator() -> RecordValidator<'static> {
        RecordValidator::new(Schema::standard())
    }

    #[test]
    fn test_minimal_record() {
        let record = validator().validate(&json!({"title": "Add"})).unwrap();
        assert_eq!(record.title(), "Add");
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_unknown_key_is_named() {
        let errors = validator()
            .validate(&json!({"title": "x", "bogus": "y"}))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        let error = &errors.errors[0];
        assert_eq!(error.kind, ViolationKind::UnknownSection);
        assert_eq!(error.key, "bogus");
        assert_eq!(error.path, "$.bogus");
        assert!(errors.to_string().contains("bogus"));
    }

    #[test]
    fn test_missing_title_fails_regardless_of_content() {
        let errors = validator()
            .validate(&json!({
                "summary": "Adds two numbers.",
                "parameters": {"a": "first"},
                "returns": "the sum"
            }))
            .unwrap_err();
        assert!(errors.has_kind(ViolationKind::MissingRequired));
        assert!(errors.names_key("title"));

        let errors = validator().validate(&json!({"title": null})).unwrap_err();
        assert!(errors.has_kind(ViolationKind::MissingRequired));
    }

    #[test]
    fn test_blank_title_rejected() {
        let errors = validator().validate(&json!({"title": "   "})).unwrap_err();
        assert!(errors.has_kind(ViolationKind::EmptyRequired));
    }

    #[test]
    fn test_invalid_identifier() {
        let errors = validator()
            .validate(&json!({"title": "x", "parameters": {"1bad": "desc"}}))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].kind, ViolationKind::InvalidIdentifier);
        assert_eq!(errors.errors[0].path, "$.parameters.1bad");
        assert_eq!(errors.errors[0].key, "1bad");
    }

    #[test]
    fn test_identifier_sections_need_string_values() {
        let errors = validator()
            .validate(&json!({"title": "x", "raises": {"ValueError": 3}}))
            .unwrap_err();
        assert_eq!(errors.errors[0].kind, ViolationKind::WrongShape);
        assert_eq!(errors.errors[0].path, "$.raises.ValueError");
    }

    #[test]
    fn test_wrong_section_shapes() {
        let errors = validator()
            .validate(&json!({
                "title": "x",
                "summary": ["not", "text"],
                "attributes": "not a mapping",
                "see_also": {"a": "b"},
                "methods": ["ok", 4]
            }))
            .unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|e| e.kind == ViolationKind::WrongShape));
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["$.summary", "$.attributes", "$.see_also", "$.methods[1]"]);
    }

    #[test]
    fn test_root_must_be_mapping() {
        let errors = validator().validate(&json!(["title"])).unwrap_err();
        assert_eq!(errors.errors[0].path, "$");
        assert_eq!(errors.errors[0].kind, ViolationKind::WrongShape);
    }

    #[test]
    fn test_union_sections_are_normalized() {
        let single = validator().validate(&json!({"title": "x", "see_also": "foo"})).unwrap();
        let listed = validator().validate(&json!({"title": "x", "see_also": ["foo"]})).unwrap();
        assert_eq!(single, listed);
        assert_eq!(
            single.section(SectionName::SeeAlso),
            Some(&SectionContent::Names(vec!["foo".to_string()]))
        );
    }

    #[test]
    fn test_null_sections_are_dropped() {
        let record = validator()
            .validate(&json!({"title": "x", "notes": null, "parameters": null}))
            .unwrap();
        assert!(!record.has_section(SectionName::Notes));
        assert!(!record.has_section(SectionName::Parameters));
    }

    #[test]
    fn test_entry_order_is_preserved() {
        let record = validator()
            .validate(&json!({"title": "x", "parameters": {"zeta": "z", "alpha": "a", "mid": "m"}}))
            .unwrap();
        let names: Vec<&str> = record
            .entries(SectionName::Parameters)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let raw = json!({
            "title": "Add",
            "summary": "Adds two numbers.",
            "parameters": {"a": "first operand", "b": "second operand"},
            "returns": "the sum",
            "methods": "run"
        });
        let record = validator().validate(&raw).unwrap();
        let again = validator().validate(&record.to_value()).unwrap();
        assert_eq!(record, again);
    }

    #[test]
    fn test_all_violations_are_collected() {
        let raw = json!({"bogus": 1, "other": 2, "parameters": {"1bad": "x"}});
        let errors = validator().validate(&raw).unwrap_err();
        // two unknown keys, missing title, bad identifier
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_fail_fast_stops_at_first_violation() {
        let raw = json!({"bogus": 1, "other": 2, "parameters": {"1bad": "x"}});
        let ctx = ValidationContext::new(ValidationConfig::default().with_fail_fast());
        let errors = validator().validate_with_context(&raw, &ctx).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.errors[0].key, "bogus");
    }

    #[test]
    fn test_alternate_schema() {
        let schema = Schema::builder()
            .require(SectionName::Summary, true)
            .without(SectionName::Methods)
            .build()
            .unwrap();
        let validator = RecordValidator::new(&schema);

        let errors = validator
            .validate(&json!({"title": "x", "methods": "run"}))
            .unwrap_err();
        assert!(errors.names_key("summary"));
        assert!(errors.names_key("methods"));

        assert!(validator.is_valid(&json!({"title": "x", "summary": "y"})));
    }

    #[test]
    fn test_validate_record_uses_standard_schema() {
        let record = validate_record(&json!({"title": "x"})).unwrap();
        assert_eq!(record.schema_version(), Schema::standard().version());
    }
}
