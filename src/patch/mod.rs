//! JSON-patch-style partial updates
//!
//! A patch document is an ordered list of `add`, `replace` and `remove`
//! operations over single-level `/<field>` paths. It is applied to a JSON
//! projection of an update model, never to the stored entity, so a rejected
//! patch leaves storage untouched. The keys of the initial projection define
//! the patchable field set; `add` may therefore re-materialize a key an
//! earlier `remove` deleted, and nothing outside that set is reachable.
//!
//! Structural problems with the document itself surface as [`PatchError`],
//! which the error taxonomy keeps distinct from validation failures.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use thiserror::Error;

/// An ordered list of patch operations
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct PatchDocument(pub Vec<PatchOperation>);

/// One operation in a patch document
#[derive(Debug, Clone, Deserialize)]
pub struct PatchOperation {
    pub op: String,
    pub path: String,
    #[serde(default)]
    pub value: Option<Value>,
}

impl PatchOperation {
    pub fn add(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: "add".to_string(),
            path: path.into(),
            value: Some(value),
        }
    }

    pub fn replace(path: impl Into<String>, value: Value) -> Self {
        Self {
            op: "replace".to_string(),
            path: path.into(),
            value: Some(value),
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self {
            op: "remove".to_string(),
            path: path.into(),
            value: None,
        }
    }
}

/// A structurally invalid patch document, independent of any field values
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PatchError {
    #[error("Unsupported patch operation '{op}'")]
    UnknownOperation { op: String },

    #[error("Invalid patch path '{path}'; expected '/<field>'")]
    InvalidPath { path: String },

    #[error("Field '{field}' is not patchable on this resource")]
    UnknownField { field: String },

    #[error("Operation '{op}' on '{path}' requires a value")]
    MissingValue { op: String, path: String },

    #[error("Patched document no longer deserializes: {message}")]
    InvalidValue { message: String },

    #[error("Patch target is not a JSON object")]
    NotAnObject,
}

impl PatchError {
    /// Detail payload for error responses
    pub fn details(&self) -> Value {
        match self {
            PatchError::UnknownOperation { op } => serde_json::json!({ "op": op }),
            PatchError::InvalidPath { path } => serde_json::json!({ "path": path }),
            PatchError::UnknownField { field } => serde_json::json!({ "field": field }),
            PatchError::MissingValue { op, path } => {
                serde_json::json!({ "op": op, "path": path })
            }
            PatchError::InvalidValue { message } => serde_json::json!({ "message": message }),
            PatchError::NotAnObject => serde_json::json!({}),
        }
    }
}

impl PatchDocument {
    /// Apply every operation, in order, to a JSON object
    ///
    /// The patchable field set is the object's key set before any operation
    /// runs. Removing an absent key is a no-op.
    pub fn apply(&self, mut target: Map<String, Value>) -> Result<Map<String, Value>, PatchError> {
        let patchable: HashSet<String> = target.keys().cloned().collect();
        for operation in &self.0 {
            let field = parse_path(&operation.path)?;
            if !patchable.contains(field) {
                return Err(PatchError::UnknownField {
                    field: field.to_string(),
                });
            }
            match operation.op.as_str() {
                "add" | "replace" => {
                    let value =
                        operation
                            .value
                            .clone()
                            .ok_or_else(|| PatchError::MissingValue {
                                op: operation.op.clone(),
                                path: operation.path.clone(),
                            })?;
                    target.insert(field.to_string(), value);
                }
                "remove" => {
                    target.remove(field);
                }
                other => {
                    return Err(PatchError::UnknownOperation {
                        op: other.to_string(),
                    });
                }
            }
        }
        Ok(target)
    }
}

fn parse_path(path: &str) -> Result<&str, PatchError> {
    match path.strip_prefix('/') {
        Some(field) if !field.is_empty() && !field.contains('/') => Ok(field),
        _ => Err(PatchError::InvalidPath {
            path: path.to_string(),
        }),
    }
}

/// Project a model to JSON, apply the document, and deserialize it back
///
/// Serde defaults on the model fill keys the patch removed; a value of the
/// wrong type comes back as [`PatchError::InvalidValue`].
pub fn patch_model<T>(model: &T, document: &PatchDocument) -> Result<T, PatchError>
where
    T: serde::Serialize + serde::de::DeserializeOwned,
{
    let projected = serde_json::to_value(model).map_err(|_| PatchError::NotAnObject)?;
    let Value::Object(target) = projected else {
        return Err(PatchError::NotAnObject);
    };
    let patched = document.apply(target)?;
    serde_json::from_value(Value::Object(patched)).map_err(|err| PatchError::InvalidValue {
        message: err.to_string(),
    })
}
