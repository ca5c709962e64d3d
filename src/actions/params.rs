//! Parameter coercion for the flat action interface.
//!
//! Action parameters arrive as a flat JSON mapping; these helpers pull
//! typed values out of it, naming the offending field on failure.
//! List-valued parameters accept either a JSON array or a
//! comma-separated string (split on commas, surrounding whitespace
//! trimmed) and produce the same discrete list either way.

use crate::errors::{SmaResult, ValidationError};
use serde_json::{Map, Value};

/// Flat named-parameter mapping for one action invocation
#[derive(Debug, Clone)]
pub struct Params {
    map: Map<String, Value>,
}

impl Params {
    /// Wrap an incoming parameter object; `null` counts as empty
    pub fn new(value: Value) -> SmaResult<Self> {
        match value {
            Value::Null => Ok(Self { map: Map::new() }),
            Value::Object(map) => Ok(Self { map }),
            _ => Err(ValidationError::InvalidValue {
                name: "parameters".to_string(),
                message: "expected a JSON object".to_string(),
            }
            .into()),
        }
    }

    fn raw(&self, name: &str) -> Option<&Value> {
        self.map.get(name).filter(|v| !v.is_null())
    }

    /// Optional string value; empty strings count as absent
    pub fn opt_str(&self, name: &str) -> Option<String> {
        match self.raw(name)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Required string value
    pub fn require_str(&self, name: &str) -> SmaResult<String> {
        self.opt_str(name).ok_or_else(|| {
            ValidationError::MissingParameter {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Optional integer, accepting numbers and numeric strings
    pub fn opt_i64(&self, name: &str) -> SmaResult<Option<i64>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(|| {
                ValidationError::NotAnInteger {
                    name: name.to_string(),
                }
                .into()
            }),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s.trim().parse::<i64>().map(Some).map_err(|_| {
                ValidationError::NotAnInteger {
                    name: name.to_string(),
                }
                .into()
            }),
            Some(_) => Err(ValidationError::NotAnInteger {
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// Required integer
    pub fn require_i64(&self, name: &str) -> SmaResult<i64> {
        self.opt_i64(name)?.ok_or_else(|| {
            ValidationError::MissingParameter {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Optional unsigned integer for offsets, limits and counts
    pub fn opt_u32(&self, name: &str) -> SmaResult<Option<u32>> {
        match self.opt_i64(name)? {
            None => Ok(None),
            Some(v) => u32::try_from(v).map(Some).map_err(|_| {
                ValidationError::NotAnInteger {
                    name: name.to_string(),
                }
                .into()
            }),
        }
    }

    /// Required list of message identifiers, from an integer, a
    /// comma-separated string or an array
    pub fn id_list(&self, name: &str) -> SmaResult<Vec<i64>> {
        let not_an_integer = || ValidationError::NotAnInteger {
            name: name.to_string(),
        };
        let ids = match self.raw(name) {
            None => Vec::new(),
            Some(Value::Number(n)) => vec![n.as_i64().ok_or_else(not_an_integer)?],
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| part.parse::<i64>().map_err(|_| not_an_integer()))
                .collect::<Result<Vec<_>, _>>()?,
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Number(n) => n.as_i64().ok_or_else(not_an_integer),
                    Value::String(s) => s.trim().parse::<i64>().map_err(|_| not_an_integer()),
                    _ => Err(not_an_integer()),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => return Err(not_an_integer().into()),
        };
        if ids.is_empty() {
            return Err(ValidationError::MissingParameter {
                name: name.to_string(),
            }
            .into());
        }
        Ok(ids)
    }

    /// List of strings, from a comma-separated string or an array;
    /// absent parameters yield an empty list
    pub fn string_list(&self, name: &str) -> SmaResult<Vec<String>> {
        match self.raw(name) {
            None => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(s
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.trim().to_string()),
                    Value::Number(n) => Ok(n.to_string()),
                    _ => Err(ValidationError::InvalidValue {
                        name: name.to_string(),
                        message: "expected a list of strings".to_string(),
                    }
                    .into()),
                })
                .filter(|item| !matches!(item, Ok(s) if s.is_empty()))
                .collect(),
            Some(_) => Err(ValidationError::InvalidValue {
                name: name.to_string(),
                message: "expected a comma-separated string or a list".to_string(),
            }
            .into()),
        }
    }

    /// Optional boolean, accepting booleans and "true"/"false" strings
    pub fn opt_bool(&self, name: &str) -> SmaResult<Option<bool>> {
        match self.raw(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(Some(true)),
                "false" | "0" => Ok(Some(false)),
                _ => Err(ValidationError::InvalidValue {
                    name: name.to_string(),
                    message: "expected true or false".to_string(),
                }
                .into()),
            },
            Some(_) => Err(ValidationError::InvalidValue {
                name: name.to_string(),
                message: "expected true or false".to_string(),
            }
            .into()),
        }
    }

    /// Optional enum-valued parameter, rejecting out-of-set values
    /// before any network call
    pub fn opt_parsed<T>(
        &self,
        name: &str,
        parse: impl Fn(&str) -> Result<T, String>,
    ) -> SmaResult<Option<T>> {
        match self.opt_str(name) {
            None => Ok(None),
            Some(value) => parse(&value).map(Some).map_err(|message| {
                ValidationError::InvalidValue {
                    name: name.to_string(),
                    message,
                }
                .into()
            }),
        }
    }
}
