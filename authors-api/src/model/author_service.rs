use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    error::{CommonError, FieldError, RequestError, RequestResult},
    model::author::{Author, AuthorId},
};

pub const API_NAME: &str = "Authors REST API";
pub const AUTHOR_CREATED_MESSAGE: &str = "Author created successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedGetAuthorRequest {
    pub id: AuthorId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCreateAuthorRequest {
    pub author: Author,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiInfoResponse {
    pub message: String,
    pub endpoints: ApiEndpoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiEndpoints {
    #[serde(rename = "GET /authors")]
    pub list_authors: String,
    #[serde(rename = "GET /author/{id}")]
    pub get_author: String,
    #[serde(rename = "POST /author")]
    pub create_author: String,
}

/// Body of `GET /authors`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListAuthorsResponse {
    pub authors: Vec<Author>,
}

/// Body of a successful `POST /author`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateAuthorResponse {
    pub message: String,
    pub author: Author,
}

impl ParsedGetAuthorRequest {
    pub const NAME: &'static str = "GetAuthorRequest";

    /// Parses the `{id}` path segment.
    ///
    /// # Errors
    ///
    /// Returns a bad request error if the segment is not an integer.
    pub fn parse<S: AsRef<str>>(raw_id: S) -> RequestResult<Self> {
        let id = raw_id
            .as_ref()
            .parse::<AuthorId>()
            .map_err(|err| err.wrap_request(Self::NAME))?;
        Ok(Self { id })
    }
}

impl ParsedCreateAuthorRequest {
    pub const NAME: &'static str = "CreateAuthorRequest";

    /// Decodes and validates a raw request body.
    ///
    /// # Errors
    ///
    /// Returns a bad request error if the body is not JSON or fails [`Self::parse`].
    pub fn parse_json(body: &[u8]) -> RequestResult<Self> {
        let value: Value = serde_json::from_slice(body).map_err(|_| {
            RequestError::bad_request(Self::NAME, [(["body"], CommonError::InvalidJson)])
        })?;
        Self::parse(&value)
    }

    /// Validates a decoded request body against the author shape.
    ///
    /// All fields are checked before returning, so the error lists every
    /// violation in field declaration order. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns a bad request error if the body is not an object, a required
    /// field is missing, or a field has the wrong type.
    pub fn parse(body: &Value) -> RequestResult<Self> {
        let Some(object) = body.as_object() else {
            return Err(
                RequestError::from(
                    FieldError::new(["body"], CommonError::InvalidObject).with_input(body.clone()),
                )
                .wrap_request(Self::NAME),
            );
        };

        let mut fields = BodyFields::new(object);
        let id = fields.integer("id");
        let name = fields.string("name");
        let birth_year = fields.integer("birth_year");
        let country_of_birth = fields.string("country_of_birth");
        let first_published_date = fields.string("first_published_date");
        let death_date = fields.optional_string("death_date");

        match (
            id,
            name,
            birth_year,
            country_of_birth,
            first_published_date,
            death_date,
        ) {
            (
                Some(id),
                Some(name),
                Some(birth_year),
                Some(country_of_birth),
                Some(first_published_date),
                Some(death_date),
            ) => Ok(Self {
                author: Author {
                    id: AuthorId(id),
                    name,
                    birth_year,
                    country_of_birth,
                    first_published_date,
                    death_date,
                },
            }),
            _ => Err(fields.into_error()),
        }
    }
}

/// Collects violations while reading fields out of a JSON object.
struct BodyFields<'a> {
    object: &'a Map<String, Value>,
    violations: Vec<FieldError>,
}

impl<'a> BodyFields<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        Self {
            object,
            violations: Vec::new(),
        }
    }

    fn violate(&mut self, field: &str, error: CommonError, input: Value) {
        self.violations
            .push(FieldError::new(["body", field], error).with_input(input));
    }

    /// A missing field echoes the whole body as its input.
    fn required(&mut self, field: &str) -> Option<&'a Value> {
        let object = self.object;
        let value = object.get(field);
        if value.is_none() {
            self.violate(
                field,
                CommonError::RequiredFieldMissing,
                Value::Object(object.clone()),
            );
        }
        value
    }

    fn integer(&mut self, field: &str) -> Option<i64> {
        let value = self.required(field)?;
        match lax_integer(value) {
            Ok(integer) => Some(integer),
            Err(error) => {
                self.violate(field, error, value.clone());
                None
            }
        }
    }

    fn string(&mut self, field: &str) -> Option<String> {
        let value = self.required(field)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.violate(field, CommonError::InvalidString, value.clone());
                None
            }
        }
    }

    /// Absent and `null` both read as `Some(None)`; `None` marks a violation.
    fn optional_string(&mut self, field: &str) -> Option<Option<String>> {
        let object = self.object;
        match object.get(field) {
            None | Some(Value::Null) => Some(None),
            Some(Value::String(s)) => Some(Some(s.clone())),
            Some(value) => {
                self.violate(field, CommonError::InvalidString, value.clone());
                None
            }
        }
    }

    fn into_error(self) -> RequestError {
        RequestError::BadRequest {
            name: ParsedCreateAuthorRequest::NAME.into(),
            violations: self.violations,
        }
    }
}

/// Reads an integer the way form-style clients send it.
///
/// Integral floats (`2000.0`) and numeric strings (`" 7 "`) are accepted.
/// Booleans, `null`, arrays and objects are not.
fn lax_integer(value: &Value) -> Result<i64, CommonError> {
    match value {
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                return Ok(integer);
            }
            match number.as_f64() {
                Some(float) if float.is_finite() && float.fract() != 0.0 => {
                    Err(CommonError::InvalidIntegerFraction)
                }
                // `i64::MAX as f64` rounds up to 2^63, which is out of range.
                Some(float) if float >= i64::MIN as f64 && float < i64::MAX as f64 => {
                    Ok(float as i64)
                }
                _ => Err(CommonError::InvalidInteger),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| CommonError::InvalidIntegerParse),
        _ => Err(CommonError::InvalidInteger),
    }
}

impl Default for ApiInfoResponse {
    fn default() -> Self {
        Self {
            message: API_NAME.into(),
            endpoints: ApiEndpoints {
                list_authors: "Get all authors".into(),
                get_author: "Get author by ID".into(),
                create_author: "Create a new author".into(),
            },
        }
    }
}

impl CreateAuthorResponse {
    pub fn new(author: Author) -> Self {
        Self {
            message: AUTHOR_CREATED_MESSAGE.into(),
            author,
        }
    }
}
