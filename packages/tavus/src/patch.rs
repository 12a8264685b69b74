//! JSON Patch (RFC 6902) operations.
//!
//! Personas, objectives and guardrails are updated by sending a JSON array of
//! patch operations. Everything here is shared by those resources: building a
//! single operation, validating a sequence before it is sent, and dispatching
//! it.
//!
//! ```ignore
//! use tavus::patch::{JsonPatch, PatchOp, PatchOperation};
//!
//! let ops = vec![
//!     PatchOperation::replace("/persona_name", "Wellness Advisor"),
//!     PatchOperation::remove("/layers/stt/hotwords"),
//! ];
//! client.personas().patch("p123", &ops)?;
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Dispatcher;
use crate::error::Error;
use crate::types::{Method, Params};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Remove,
    Replace,
    Copy,
    Move,
    Test,
}

impl PatchOp {
    pub const ALL: [PatchOp; 6] = [
        PatchOp::Add,
        PatchOp::Remove,
        PatchOp::Replace,
        PatchOp::Copy,
        PatchOp::Move,
        PatchOp::Test,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatchOp::Add => "add",
            PatchOp::Remove => "remove",
            PatchOp::Replace => "replace",
            PatchOp::Copy => "copy",
            PatchOp::Move => "move",
            PatchOp::Test => "test",
        }
    }

    /// Whether an operation of this kind must carry a `value`.
    pub fn requires_value(self) -> bool {
        matches!(self, PatchOp::Add | PatchOp::Replace | PatchOp::Test)
    }

    /// Whether an operation of this kind must carry a `from` pointer.
    pub fn requires_from(self) -> bool {
        matches!(self, PatchOp::Copy | PatchOp::Move)
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatchOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatchOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(invalid_op)
    }
}

/// A single patch operation.
///
/// `value` is omitted from the serialized form when `None`, which is not the
/// same thing as `Some(Value::Null)`: a `remove` carries no value at all, a
/// `replace` with `Value::Null` sets the field to null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Source pointer for `copy` and `move`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl PatchOperation {
    pub fn add(path: impl Into<String>, value: impl Into<Value>) -> Self {
        build(path, value, PatchOp::Add)
    }

    pub fn replace(path: impl Into<String>, value: impl Into<Value>) -> Self {
        build(path, value, PatchOp::Replace)
    }

    pub fn test(path: impl Into<String>, value: impl Into<Value>) -> Self {
        build(path, value, PatchOp::Test)
    }

    pub fn remove(path: impl Into<String>) -> Self {
        build(path, Value::Null, PatchOp::Remove)
    }

    pub fn copy(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Copy,
            path: path.into(),
            value: None,
            from: Some(from.into()),
        }
    }

    pub fn move_to(from: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            op: PatchOp::Move,
            path: path.into(),
            value: None,
            from: Some(from.into()),
        }
    }
}

/// Build one operation. `value` is dropped entirely for `remove`.
pub fn build(path: impl Into<String>, value: impl Into<Value>, op: PatchOp) -> PatchOperation {
    let value = match op {
        PatchOp::Remove => None,
        _ => Some(value.into()),
    };
    PatchOperation {
        op,
        path: path.into(),
        value,
        from: None,
    }
}

fn invalid_op() -> Error {
    Error::argument("Operation 'op' must be one of: add, remove, replace, copy, move, test")
}

fn missing_op_or_path() -> Error {
    Error::argument("Each operation must have 'op' and 'path'")
}

fn missing_value(index: usize, op: PatchOp) -> Error {
    Error::argument(format!(
        "Operation {} ('{}') must have a 'value'",
        index, op
    ))
}

fn missing_from(index: usize, op: PatchOp) -> Error {
    Error::argument(format!(
        "Operation {} ('{}') must have a 'from'",
        index, op
    ))
}

/// Validate a typed sequence of operations. Fails on the first offender.
pub fn validate_operations(operations: &[PatchOperation]) -> Result<(), Error> {
    if operations.is_empty() {
        return Err(Error::argument("Operations cannot be empty"));
    }

    for (index, operation) in operations.iter().enumerate() {
        if operation.path.is_empty() {
            return Err(missing_op_or_path());
        }
        if operation.op.requires_value() && operation.value.is_none() {
            return Err(missing_value(index, operation.op));
        }
        let has_from = operation.from.as_deref().is_some_and(|from| !from.is_empty());
        if operation.op.requires_from() && !has_from {
            return Err(missing_from(index, operation.op));
        }
    }

    Ok(())
}

/// Validate a raw JSON patch document and convert it to typed operations.
///
/// The document must be a non-empty array whose elements are objects with a
/// non-empty string `path` and an `op` naming one of the six RFC 6902
/// operations. Fails on the first offending element.
pub fn validate(document: &Value) -> Result<Vec<PatchOperation>, Error> {
    let elements = document
        .as_array()
        .ok_or_else(|| Error::argument("Operations must be an array"))?;

    if elements.is_empty() {
        return Err(Error::argument("Operations cannot be empty"));
    }

    let mut operations = Vec::with_capacity(elements.len());
    for element in elements {
        let op = element.get("op").and_then(Value::as_str);
        let path = element.get("path").and_then(Value::as_str);

        let (op, path) = match (op, path) {
            (Some(op), Some(path)) if !op.is_empty() && !path.is_empty() => (op, path),
            _ => return Err(missing_op_or_path()),
        };
        let op: PatchOp = op.parse()?;

        operations.push(PatchOperation {
            op,
            path: path.to_string(),
            value: element.get("value").cloned(),
            from: element.get("from").and_then(Value::as_str).map(str::to_string),
        });
    }

    validate_operations(&operations)?;
    Ok(operations)
}

/// Validate `operations` and send them as the body of `PATCH {resource_path}`.
pub(crate) fn dispatch(
    dispatcher: &Dispatcher,
    resource_path: &str,
    operations: &[PatchOperation],
) -> Result<Value, Error> {
    validate_operations(operations)?;
    let body = serde_json::to_value(operations).map_err(|e| Error::argument(e.to_string()))?;
    dispatcher.request(Method::PATCH, resource_path, &Params::new(), Some(body))
}

/// Updates by JSON Patch, for resources whose `PATCH` takes an operation
/// array.
///
/// Implementors only provide [`patch`](JsonPatch::patch); the rest is shared.
pub trait JsonPatch {
    /// Validate `operations` and apply them to the resource with `id`.
    fn patch(&self, id: &str, operations: &[PatchOperation]) -> Result<Value, Error>;

    /// Like [`patch`](JsonPatch::patch), for operations held as raw JSON.
    fn patch_json(&self, id: &str, operations: &Value) -> Result<Value, Error> {
        let operations = validate(operations)?;
        self.patch(id, &operations)
    }

    /// Replace a single field, e.g. `update_field(id, "/persona_name", "Tutor")`.
    fn update_field(
        &self,
        id: &str,
        path: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Value, Error> {
        self.patch(id, &[PatchOperation::replace(path, value)])
    }

    fn build_patch_operation(
        &self,
        path: impl Into<String>,
        value: impl Into<Value>,
        op: PatchOp,
    ) -> PatchOperation {
        build(path, value, op)
    }
}
