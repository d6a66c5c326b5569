//! Request and response shapes for `POST /bfhl`.
//!
//! The body is a JSON object with exactly one key naming the operation. The
//! key selects a [`BfhlRequest`] variant and its value is validated into that
//! variant's payload. Results go back as an [`OperationOutput`].

use std::fmt;

use num_bigint::BigUint;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use service_core::error::AppError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fibonacci,
    Prime,
    Lcm,
    Hcf,
    Ai,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Fibonacci,
        Operation::Prime,
        Operation::Lcm,
        Operation::Hcf,
        Operation::Ai,
    ];

    /// Wire name; case-sensitive.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Fibonacci => "fibonacci",
            Operation::Prime => "prime",
            Operation::Lcm => "lcm",
            Operation::Hcf => "hcf",
            Operation::Ai => "AI",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }

    fn input_requirement(self) -> &'static str {
        match self {
            Operation::Fibonacci => "fibonacci requires a non-negative integer",
            Operation::Prime => "prime requires an array of integers",
            Operation::Lcm => "lcm requires a non-empty array of positive integers",
            Operation::Hcf => "hcf requires a non-empty array of positive integers",
            Operation::Ai => "AI requires a non-empty question string",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated operation with its payload.
#[derive(Debug, Clone, PartialEq)]
pub enum BfhlRequest {
    /// Sequence length, non-negative.
    Fibonacci(i64),
    Prime(Vec<i64>),
    /// Non-empty, every element positive.
    Lcm(Vec<u64>),
    /// Non-empty, every element positive.
    Hcf(Vec<u64>),
    /// Question as sent; non-empty once trimmed.
    Ai(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Request must contain exactly one operation key")]
    NotSingleKey,

    #[error("Invalid operation. Allowed: fibonacci, prime, lcm, hcf, AI")]
    UnknownOperation(String),

    #[error("{}", .0.input_requirement())]
    InvalidInput(Operation),
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl BfhlRequest {
    pub fn operation(&self) -> Operation {
        match self {
            BfhlRequest::Fibonacci(_) => Operation::Fibonacci,
            BfhlRequest::Prime(_) => Operation::Prime,
            BfhlRequest::Lcm(_) => Operation::Lcm,
            BfhlRequest::Hcf(_) => Operation::Hcf,
            BfhlRequest::Ai(_) => Operation::Ai,
        }
    }

    /// Decode a parsed body. Anything that is not a JSON object counts as
    /// having the wrong number of keys.
    pub fn from_value(body: Value) -> Result<Self, RequestError> {
        match body {
            Value::Object(map) => Self::from_object(map),
            _ => Err(RequestError::NotSingleKey),
        }
    }

    pub fn from_object(map: Map<String, Value>) -> Result<Self, RequestError> {
        if map.len() != 1 {
            return Err(RequestError::NotSingleKey);
        }

        let Some((name, input)) = map.into_iter().next() else {
            return Err(RequestError::NotSingleKey);
        };

        let operation =
            Operation::from_name(&name).ok_or(RequestError::UnknownOperation(name))?;
        let invalid = || RequestError::InvalidInput(operation);

        match operation {
            Operation::Fibonacci => as_integer(&input)
                .filter(|n| *n >= 0)
                .map(BfhlRequest::Fibonacci)
                .ok_or_else(invalid),
            Operation::Prime => integer_array(&input)
                .map(BfhlRequest::Prime)
                .ok_or_else(invalid),
            Operation::Lcm => positive_array(&input)
                .map(BfhlRequest::Lcm)
                .ok_or_else(invalid),
            Operation::Hcf => positive_array(&input)
                .map(BfhlRequest::Hcf)
                .ok_or_else(invalid),
            Operation::Ai => match input {
                Value::String(question) if !question.trim().is_empty() => {
                    Ok(BfhlRequest::Ai(question))
                }
                _ => Err(invalid()),
            },
        }
    }
}

/// The `data` payload of a successful operation.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Sequence(Vec<ExactInteger>),
    Integers(Vec<i64>),
    Integer(u64),
    Text(String),
}

impl From<Vec<BigUint>> for OperationOutput {
    fn from(terms: Vec<BigUint>) -> Self {
        OperationOutput::Sequence(terms.into_iter().map(ExactInteger).collect())
    }
}

/// Unbounded integer written as a plain JSON number, never rounded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExactInteger(pub BigUint);

impl Serialize for ExactInteger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if let Ok(small) = u64::try_from(&self.0) {
            return serializer.serialize_u64(small);
        }

        RawValue::from_string(self.0.to_string())
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// A JSON number with no fractional part that fits in an `i64`. `5.0`
/// counts; `5.5`, `"5"` and `true` do not.
fn as_integer(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };

    n.as_i64().or_else(|| {
        n.as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn integer_array(value: &Value) -> Option<Vec<i64>> {
    value.as_array()?.iter().map(as_integer).collect()
}

fn positive_array(value: &Value) -> Option<Vec<u64>> {
    let items = integer_array(value)?;
    if items.is_empty() || items.iter().any(|n| *n <= 0) {
        return None;
    }

    Some(items.into_iter().map(|n| n as u64).collect())
}
