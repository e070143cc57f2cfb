//! Representative values synthesized from JSON schemas.

mod formats;

use serde_json::{Map, Value};

use crate::error::ResolveError;
use crate::parse::ref_resolve::RefResolver;
use crate::parse::schema::{AdditionalProperties, Schema, SchemaOrRef, SchemaType};

pub use formats::string_sample;

/// Upper bound on repeated items for `minItems`.
pub const MAX_SAMPLE_ITEMS: u64 = 16;

/// Produces a sample value tree for a schema.
pub trait SchemaSampler {
    fn sample(
        &self,
        schema: &SchemaOrRef,
        resolver: RefResolver<'_>,
    ) -> Result<Value, ResolveError>;
}

/// Built-in sampler. Object keys follow schema declaration order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSampler;

impl SchemaSampler for DefaultSampler {
    fn sample(
        &self,
        schema: &SchemaOrRef,
        resolver: RefResolver<'_>,
    ) -> Result<Value, ResolveError> {
        let mut stack = Vec::new();
        sample_schema_or_ref(schema, resolver, &mut stack)
    }
}

/// `stack` holds the references currently being expanded.
fn sample_schema_or_ref(
    schema_or_ref: &SchemaOrRef,
    resolver: RefResolver<'_>,
    stack: &mut Vec<String>,
) -> Result<Value, ResolveError> {
    match schema_or_ref {
        SchemaOrRef::Schema(schema) => sample_schema(schema, resolver, stack),
        SchemaOrRef::Ref { ref_path } => {
            let schema: Schema = resolver.resolve_as(ref_path)?;
            if stack.contains(ref_path) {
                log::debug!("recursive reference {ref_path}, sampling as empty");
                return Ok(empty_value(&schema));
            }
            stack.push(ref_path.clone());
            let value = sample_schema(&schema, resolver, stack);
            stack.pop();
            value
        }
    }
}

fn sample_schema(
    schema: &Schema,
    resolver: RefResolver<'_>,
    stack: &mut Vec<String>,
) -> Result<Value, ResolveError> {
    // Explicit values win
    if let Some(value) = schema
        .example
        .as_ref()
        .or(schema.default_value.as_ref())
        .or(schema.const_value.as_ref())
        .or(schema.enum_values.first())
    {
        return Ok(value.clone());
    }

    // Composition
    if !schema.all_of.is_empty() {
        return sample_all_of(schema, resolver, stack);
    }
    if let Some(first) = schema.one_of.first().or(schema.any_of.first()) {
        return sample_schema_or_ref(first, resolver, stack);
    }

    match schema_kind(schema) {
        Some(SchemaType::Object) => sample_object(schema, resolver, stack),
        Some(SchemaType::Array) => {
            let item = match &schema.items {
                Some(items) => sample_schema_or_ref(items, resolver, stack)?,
                None => return Ok(Value::Array(Vec::new())),
            };
            let count = schema.min_items.unwrap_or(1).clamp(1, MAX_SAMPLE_ITEMS) as usize;
            Ok(Value::Array(vec![item; count]))
        }
        Some(SchemaType::String) => Ok(Value::String(string_sample(schema))),
        Some(SchemaType::Integer) => Ok(Value::from(numeric_seed(schema) as i64)),
        Some(SchemaType::Number) => {
            let seed = numeric_seed(schema);
            if seed.fract() == 0.0 {
                Ok(Value::from(seed as i64))
            } else {
                Ok(Value::from(seed))
            }
        }
        Some(SchemaType::Boolean) => Ok(Value::Bool(true)),
        Some(SchemaType::Null) | None => Ok(Value::Null),
    }
}

/// Declared type, or one inferred from the structural keywords.
fn schema_kind(schema: &Schema) -> Option<SchemaType> {
    schema.primary_type().or_else(|| {
        if !schema.properties.is_empty() || schema.additional_properties.is_some() {
            Some(SchemaType::Object)
        } else if schema.items.is_some() {
            Some(SchemaType::Array)
        } else {
            None
        }
    })
}

fn sample_object(
    schema: &Schema,
    resolver: RefResolver<'_>,
    stack: &mut Vec<String>,
) -> Result<Value, ResolveError> {
    let mut members = Map::new();
    for (name, property) in &schema.properties {
        members.insert(name.clone(), sample_schema_or_ref(property, resolver, stack)?);
    }
    if members.is_empty() {
        if let Some(AdditionalProperties::Schema(extra)) = &schema.additional_properties {
            let value = sample_schema_or_ref(extra, resolver, stack)?;
            members.insert("property1".to_string(), value.clone());
            members.insert("property2".to_string(), value);
        }
    }
    Ok(Value::Object(members))
}

fn sample_all_of(
    schema: &Schema,
    resolver: RefResolver<'_>,
    stack: &mut Vec<String>,
) -> Result<Value, ResolveError> {
    let own = Schema {
        all_of: Vec::new(),
        ..schema.clone()
    };
    let mut merged = match sample_object(&own, resolver, stack)? {
        Value::Object(members) => members,
        _ => Map::new(),
    };
    let mut last = None;
    for part in &schema.all_of {
        match sample_schema_or_ref(part, resolver, stack)? {
            Value::Object(members) => merged.extend(members),
            other => last = Some(other),
        }
    }
    match last {
        Some(value) if merged.is_empty() => Ok(value),
        _ => Ok(Value::Object(merged)),
    }
}

fn numeric_seed(schema: &Schema) -> f64 {
    match (schema.minimum, schema.maximum) {
        (Some(min), _) => min,
        (None, Some(max)) if max < 0.0 => max,
        _ => 0.0,
    }
}

fn empty_value(schema: &Schema) -> Value {
    match schema_kind(schema) {
        Some(SchemaType::Array) => Value::Array(Vec::new()),
        _ => Value::Object(Map::new()),
    }
}
