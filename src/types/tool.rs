//! Function-calling definitions: declarations sent to the model and the
//! invocations it sends back.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// JSON type of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
    Object,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub param_type: ParamType,
    pub description: String,
}

/// Parameter block of a declaration. Property order is preserved on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionParameters {
    #[serde(rename = "type")]
    pub schema_type: ParamType,
    #[serde(serialize_with = "ordered_properties")]
    pub properties: Vec<(String, PropertySchema)>,
    pub required: Vec<String>,
}

fn ordered_properties<S: Serializer>(
    properties: &[(String, PropertySchema)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(properties.len()))?;
    for (name, schema) in properties {
        map.serialize_entry(name, schema)?;
    }
    map.end()
}

impl FunctionParameters {
    pub fn object(properties: Vec<(&str, ParamType, &str)>, required: &[&str]) -> Self {
        Self {
            schema_type: ParamType::Object,
            properties: properties
                .into_iter()
                .map(|(name, param_type, description)| {
                    (
                        name.to_string(),
                        PropertySchema {
                            param_type,
                            description: description.to_string(),
                        },
                    )
                })
                .collect(),
            required: required.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, schema)| schema)
    }

    /// Names listed in `required` that have no matching property.
    pub fn dangling_required(&self) -> Vec<&str> {
        self.required
            .iter()
            .filter(|r| self.property(r).is_none())
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: FunctionParameters,
}

impl FunctionDeclaration {
    /// Draft 7 JSON Schema equivalent of the parameter block.
    pub fn json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .properties
            .iter()
            .map(|(name, schema)| {
                let ty = match schema.param_type {
                    ParamType::String => "string",
                    ParamType::Integer => "integer",
                    ParamType::Object => "object",
                };
                (name.clone(), serde_json::json!({ "type": ty }))
            })
            .collect();
        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": self.parameters.required,
        })
    }
}

/// Tool block of a completion request.
#[derive(Debug, Clone, Serialize)]
pub struct Tool<'a> {
    pub function_declarations: &'a [FunctionDeclaration],
}

/// Loosely-typed argument value produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArgValue {
    Text(String),
    Number(Number),
    Bool(bool),
    List(Vec<ArgValue>),
    Map(BTreeMap<String, ArgValue>),
}

impl ArgValue {
    /// Convert a JSON value; `null` (also nested) is treated as absent.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(ArgValue::Text(s)),
            Value::Number(n) => Some(ArgValue::Number(n)),
            Value::Bool(b) => Some(ArgValue::Bool(b)),
            Value::Array(items) => Some(ArgValue::List(
                items.into_iter().filter_map(ArgValue::from_json).collect(),
            )),
            Value::Object(map) => Some(ArgValue::Map(
                map.into_iter()
                    .filter_map(|(k, v)| ArgValue::from_json(v).map(|v| (k, v)))
                    .collect(),
            )),
        }
    }

    /// Textual form of scalar values.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ArgValue::Text(s) => Some(s.clone()),
            ArgValue::Number(n) => Some(n.to_string()),
            ArgValue::Bool(b) => Some(b.to_string()),
            ArgValue::List(_) | ArgValue::Map(_) => None,
        }
    }

    /// Integer form: whole numbers, or text holding a whole number.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            ArgValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invocation {
    pub name: String,
    pub arguments: BTreeMap<String, ArgValue>,
}

impl Invocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: BTreeMap::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: Value) -> Self {
        if let Some(v) = ArgValue::from_json(value) {
            self.arguments.insert(key.into(), v);
        }
        self
    }

    /// Build from the raw `args` object of a function-call part.
    pub fn from_call(name: impl Into<String>, args: Option<Map<String, Value>>) -> Self {
        let arguments = args
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(k, v)| ArgValue::from_json(v).map(|v| (k, v)))
            .collect();
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.arguments.get(key)
    }

    pub fn arguments_json(&self) -> Value {
        serde_json::to_value(&self.arguments).unwrap_or(Value::Null)
    }
}
