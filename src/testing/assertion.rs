use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::context::{ContextKey, TestContext};
use crate::http::ApiResponse;

/// A single check evaluated against a response.
///
/// Field locations are JSON pointers: `""` is the whole body, `"/data"` the
/// nested record of single-item endpoints, `"/data/0/id"` the first id of a
/// listing.
#[derive(Debug, Clone, PartialEq)]
pub enum Assertion {
    Status(u16),
    FieldsPresent { pointer: String, fields: Vec<String> },
    FieldEquals { pointer: String, expected: Value },
    FieldMatchesContext { pointer: String, key: ContextKey },
    FieldNotNull { pointer: String },
    EmptyBody,
    /// Exclusive bounds on the wall-clock time of the call.
    ElapsedWithin { min: Duration, max: Duration },
}

/// Outcome of evaluating one [`Assertion`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionResult {
    pub check: String,
    pub passed: bool,
    pub actual: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Assertion {
    pub fn status(code: u16) -> Self {
        Assertion::Status(code)
    }

    pub fn fields_present(pointer: &str, fields: &[&str]) -> Self {
        Assertion::FieldsPresent {
            pointer: pointer.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn field_equals(pointer: &str, expected: Value) -> Self {
        Assertion::FieldEquals {
            pointer: pointer.to_string(),
            expected,
        }
    }

    pub fn field_matches_context(pointer: &str, key: ContextKey) -> Self {
        Assertion::FieldMatchesContext {
            pointer: pointer.to_string(),
            key,
        }
    }

    pub fn field_not_null(pointer: &str) -> Self {
        Assertion::FieldNotNull {
            pointer: pointer.to_string(),
        }
    }

    pub fn elapsed_within(min: Duration, max: Duration) -> Self {
        Assertion::ElapsedWithin { min, max }
    }

    pub fn describe(&self) -> String {
        match self {
            Assertion::Status(code) => format!("status is {code}"),
            Assertion::FieldsPresent { pointer, fields } => {
                format!("{} has [{}]", location(pointer), fields.join(", "))
            }
            Assertion::FieldEquals { pointer, expected } => format!("{pointer} == {expected}"),
            Assertion::FieldMatchesContext { pointer, key } => format!("{pointer} == context {key}"),
            Assertion::FieldNotNull { pointer } => format!("{pointer} is not null"),
            Assertion::EmptyBody => "body is empty".to_string(),
            Assertion::ElapsedWithin { min, max } => {
                format!("elapsed in ({:.1}s, {:.1}s)", min.as_secs_f64(), max.as_secs_f64())
            }
        }
    }

    pub fn evaluate(&self, response: &ApiResponse, ctx: &TestContext) -> AssertionResult {
        let (actual, failure) = match self {
            Assertion::Status(expected) => {
                let actual = response.status;
                let failure = (actual != *expected)
                    .then(|| format!("Expected Status Code {expected}, but got {actual}"));
                (actual.to_string(), failure)
            }
            Assertion::FieldsPresent { pointer, fields } => check_fields_present(response, pointer, fields),
            Assertion::FieldEquals { pointer, expected } => {
                let actual = response.field(pointer);
                let failure = (actual != Some(expected)).then(|| {
                    format!("{} field is incorrect: expected {expected}, got {}", quoted(pointer), show(actual))
                });
                (show(actual), failure)
            }
            Assertion::FieldMatchesContext { pointer, key } => {
                let actual = response.field(pointer);
                let failure = match ctx.require(*key) {
                    Err(err) => Some(err.to_string()),
                    Ok(expected) if actual != Some(expected) => Some(format!(
                        "{} does not match captured `{key}`: expected {expected}, got {}",
                        quoted(pointer),
                        show(actual)
                    )),
                    Ok(_) => None,
                };
                (show(actual), failure)
            }
            Assertion::FieldNotNull { pointer } => {
                let actual = response.field(pointer);
                let failure = match actual {
                    None | Some(Value::Null) => Some(format!("{} was not generated", quoted(pointer))),
                    Some(_) => None,
                };
                (show(actual), failure)
            }
            Assertion::EmptyBody => {
                if response.has_empty_body() {
                    ("<no body>".to_string(), None)
                } else {
                    let empty = response.json.as_object().is_some_and(|map| map.is_empty());
                    let failure = (!empty)
                        .then(|| format!("Data inconsistency: expected an empty body, got {}", response.json));
                    (response.json.to_string(), failure)
                }
            }
            Assertion::ElapsedWithin { min, max } => {
                let elapsed = response.elapsed;
                let failure = !(*min < elapsed && elapsed < *max);
                let failure = failure.then(|| {
                    format!(
                        "Expected delay between {:.1} and {:.1} seconds, but got {:.2} seconds",
                        min.as_secs_f64(),
                        max.as_secs_f64(),
                        elapsed.as_secs_f64()
                    )
                });
                (format!("{:.2}s", elapsed.as_secs_f64()), failure)
            }
        };

        AssertionResult {
            check: self.describe(),
            passed: failure.is_none(),
            actual,
            message: failure,
        }
    }
}

fn check_fields_present(response: &ApiResponse, pointer: &str, fields: &[String]) -> (String, Option<String>) {
    let Some(object) = response.field(pointer).and_then(Value::as_object) else {
        let actual = show(response.field(pointer));
        return (
            actual.clone(),
            Some(format!("Needed information inconsistency: expected an object at {}, got {actual}", location(pointer))),
        );
    };

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    let actual = format!("[{}]", keys.join(", "));

    let failure = fields
        .iter()
        .find(|field| !object.contains_key(field.as_str()))
        .map(|field| format!("Needed information inconsistency: \"{field}\" is missing from {}", location(pointer)));
    (actual, failure)
}

fn location(pointer: &str) -> String {
    if pointer.is_empty() {
        "the response body".to_string()
    } else {
        format!("\"{pointer}\"")
    }
}

fn quoted(pointer: &str) -> String {
    let name = pointer.rsplit('/').next().unwrap_or(pointer);
    format!("\"{name}\"")
}

fn show(value: Option<&Value>) -> String {
    value.map_or_else(|| "<missing>".to_string(), Value::to_string)
}
