use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::Serialize;
use serde_json::Value;

use crate::error::{CommonError, FieldError, RequestError};

/// An author record.
///
/// Serialized with every field present; a missing death date is `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub birth_year: i64,
    pub country_of_birth: String,
    /// Free-form, not validated as a date.
    pub first_published_date: String,
    pub death_date: Option<String>,
}

/// Primary key of an [`Author`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AuthorId(pub i64);

impl AuthorId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl Display for AuthorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AuthorId {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        author_id_convert::parse(s)
    }
}

pub mod author_id_convert {
    use super::*;
    use crate::error::RequestResult;

    /// Parses an author ID taken from a request path.
    ///
    /// # Errors
    ///
    /// Returns a `path.id` field error if the segment is not an integer.
    pub fn parse<S: AsRef<str>>(raw: S) -> RequestResult<AuthorId> {
        let raw = raw.as_ref();
        raw.trim().parse::<i64>().map(AuthorId).map_err(|_| {
            FieldError::new(["path", "id"], CommonError::InvalidIntegerParse)
                .with_input(Value::String(raw.to_string()))
                .into()
        })
    }
}
