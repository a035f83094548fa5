//! Declarative field schema for the member metadata surface.
//!
//! One fixed table of descriptors, consulted by the read/write API and its
//! validation. The editor panel's contract is exactly: these field names
//! exist, with these types and these defaults.

use serde_json::Value;

use super::member::ImageMeta;

/// Semantic type of a metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Boolean,
    Number,
    Image,
}

/// Default value of a metadata field.
#[derive(Debug, Clone, Copy)]
pub enum FieldDefault {
    Text(&'static str),
    Flag(bool),
    Number(f64),
    EmptyImage,
}

/// A single entry in the field schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Wire name, as the editor client sends it.
    pub name: &'static str,
    pub kind: FieldKind,
    pub default: FieldDefault,
}

/// The member field schema. Single-value cardinality throughout.
pub const MEMBER_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        name: "coverImage",
        kind: FieldKind::Image,
        default: FieldDefault::EmptyImage,
    },
    FieldDescriptor {
        name: "detailImage",
        kind: FieldKind::Image,
        default: FieldDefault::EmptyImage,
    },
    FieldDescriptor {
        name: "name",
        kind: FieldKind::String,
        default: FieldDefault::Text(""),
    },
    FieldDescriptor {
        name: "subtitle",
        kind: FieldKind::String,
        default: FieldDefault::Text(""),
    },
    FieldDescriptor {
        name: "show",
        kind: FieldKind::Boolean,
        default: FieldDefault::Flag(true),
    },
    FieldDescriptor {
        name: "scrollTop",
        kind: FieldKind::Boolean,
        default: FieldDefault::Flag(false),
    },
    FieldDescriptor {
        name: "scrollOffset",
        kind: FieldKind::Number,
        default: FieldDefault::Number(0.0),
    },
];

/// A field value parsed and validated against its descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Number(f64),
    Image(ImageMeta),
}

/// Look up a descriptor by wire name.
pub fn descriptor_for(name: &str) -> Option<&'static FieldDescriptor> {
    MEMBER_FIELDS.iter().find(|d| d.name == name)
}

impl FieldDescriptor {
    /// The field's default, as a typed value.
    pub fn default_value(&self) -> FieldValue {
        match self.default {
            FieldDefault::Text(s) => FieldValue::Text(s.to_string()),
            FieldDefault::Flag(b) => FieldValue::Flag(b),
            FieldDefault::Number(n) => FieldValue::Number(n),
            FieldDefault::EmptyImage => FieldValue::Image(ImageMeta::default()),
        }
    }

    /// The semantic type name, as the editor panel consumes it.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            FieldKind::String => "string",
            FieldKind::Boolean => "boolean",
            FieldKind::Number => "number",
            FieldKind::Image => "object",
        }
    }

    /// The field's default as a JSON value.
    pub fn default_json(&self) -> Value {
        match self.default_value() {
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Flag(b) => Value::Bool(b),
            FieldValue::Number(n) => serde_json::json!(n),
            FieldValue::Image(meta) => serde_json::to_value(meta).unwrap_or_default(),
        }
    }

    /// Parse a raw JSON value against this descriptor's type.
    pub fn parse_value(&self, raw: Value) -> Result<FieldValue, String> {
        match self.kind {
            FieldKind::String => match raw {
                Value::String(s) => Ok(FieldValue::Text(s)),
                other => Err(format!("field {} expects a string, got {}", self.name, kind_of(&other))),
            },
            FieldKind::Boolean => match raw {
                Value::Bool(b) => Ok(FieldValue::Flag(b)),
                other => Err(format!("field {} expects a boolean, got {}", self.name, kind_of(&other))),
            },
            FieldKind::Number => match raw.as_f64() {
                Some(n) => Ok(FieldValue::Number(n)),
                None => Err(format!("field {} expects a number, got {}", self.name, kind_of(&raw))),
            },
            FieldKind::Image => {
                if !raw.is_object() {
                    return Err(format!(
                        "field {} expects an image object, got {}",
                        self.name,
                        kind_of(&raw)
                    ));
                }
                serde_json::from_value::<ImageMeta>(raw)
                    .map(FieldValue::Image)
                    .map_err(|e| format!("field {}: {}", self.name, e))
            }
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
