use std::fmt::Display;

use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Request validation error.
///
/// Raised before a request reaches the store. Carries every failing field so
/// clients can fix a body in one round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("invalid `{name}` request: {}", .violations.iter().join(", "))]
    BadRequest {
        name: String,
        violations: Vec<FieldError>,
    },
    #[error(transparent)]
    Field(FieldError),
}

pub type RequestResult<T> = Result<T, RequestError>;

/// A single failing field, located by its path in the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}: {error}", .loc.join("."))]
pub struct FieldError {
    pub loc: Vec<String>,
    pub error: CommonError,
    /// The rejected value, when there is one to echo back.
    pub input: Option<Value>,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonError {
    #[error("Field required")]
    RequiredFieldMissing,
    #[error("Input should be a valid integer")]
    InvalidInteger,
    #[error("Input should be a valid integer, unable to parse string as an integer")]
    InvalidIntegerParse,
    #[error("Input should be a valid integer, got a number with a fractional part")]
    InvalidIntegerFraction,
    #[error("Input should be a valid string")]
    InvalidString,
    #[error("Input should be a valid dictionary or object to extract fields from")]
    InvalidObject,
    #[error("JSON decode error")]
    InvalidJson,
}

/// Wire form of a [`FieldError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

/// Error body returned by the service, `{"detail": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse<D> {
    pub detail: D,
}

impl RequestError {
    #[must_use]
    pub fn bad_request<N, V, L, S>(name: N, violations: V) -> Self
    where
        N: Display,
        V: IntoIterator<Item = (L, CommonError)>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BadRequest {
            name: name.to_string(),
            violations: violations
                .into_iter()
                .map(|(loc, error)| FieldError::new(loc, error))
                .collect(),
        }
    }

    #[must_use]
    pub fn wrap_request<N: Display>(self, name: N) -> Self {
        match self {
            Self::Field(error) => Self::BadRequest {
                name: name.to_string(),
                violations: vec![error],
            },
            err => err,
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::BadRequest { violations, .. } => violations.as_slice(),
            Self::Field(error) => std::slice::from_ref(error),
        }
    }

    pub fn violations(&self) -> Vec<FieldViolation> {
        self.field_errors()
            .iter()
            .map(FieldError::to_violation)
            .collect()
    }
}

impl FieldError {
    pub fn new<L, S>(loc: L, error: CommonError) -> Self
    where
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loc: loc.into_iter().map(Into::into).collect(),
            error,
            input: None,
        }
    }

    #[must_use]
    pub fn with_input(mut self, input: Value) -> Self {
        self.input = Some(input);
        self
    }

    pub fn to_violation(&self) -> FieldViolation {
        FieldViolation {
            loc: self.loc.clone(),
            msg: self.error.to_string(),
            kind: self.error.kind().into(),
            input: self.input.clone(),
        }
    }
}

impl From<FieldError> for RequestError {
    fn from(err: FieldError) -> Self {
        Self::Field(err)
    }
}

impl CommonError {
    /// Stable machine-readable tag, emitted as the violation `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RequiredFieldMissing => "missing",
            Self::InvalidInteger => "int_type",
            Self::InvalidIntegerParse => "int_parsing",
            Self::InvalidIntegerFraction => "int_from_float",
            Self::InvalidString => "string_type",
            Self::InvalidObject => "model_attributes_type",
            Self::InvalidJson => "json_invalid",
        }
    }
}

impl<D> ErrorResponse<D> {
    pub fn new(detail: D) -> Self {
        Self { detail }
    }
}
