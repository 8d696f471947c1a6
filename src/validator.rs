use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use gradebook_core::{AppError, FieldError, Normalize};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body extractor that normalizes and validates the payload.
///
/// Rejections:
/// - missing `Content-Type: application/json` or unparseable JSON: 400
/// - a body that parses but does not fit `T` (missing field, wrong type): 422
/// - a value that fits `T` but breaks a validation rule: 422
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Normalize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| match rejection {
                JsonRejection::JsonDataError(err) => {
                    AppError::validation(vec![describe_data_error(&err.body_text())])
                }
                JsonRejection::MissingJsonContentType(_) => AppError::bad_request(anyhow!(
                    "Missing 'Content-Type: application/json' header"
                )),
                JsonRejection::JsonSyntaxError(_) => {
                    AppError::bad_request(anyhow!("Malformed JSON in request body"))
                }
                _ => AppError::bad_request(anyhow!("Invalid request body")),
            })?;

        let value = value.normalize();
        value
            .validate()
            .map_err(|errors| AppError::from_validation(&errors))?;

        Ok(ValidatedJson(value))
    }
}

/// Turns a deserialization message into a field error.
///
/// Messages look like `...target type: grade: invalid type: string "x",
/// expected i32 at line 1 column 12` or `...target type: missing field
/// \`grade\` at line 1 column 40`.
fn describe_data_error(body_text: &str) -> FieldError {
    let detail = body_text
        .split_once("target type: ")
        .map(|(_, rest)| rest)
        .unwrap_or(body_text);

    if let Some(field) = detail
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return FieldError::new(field, "Field required");
    }

    match detail.split_once(": ") {
        Some((path, message)) if !path.contains(' ') => {
            FieldError::new(path, strip_position(message))
        }
        _ => FieldError::new("body", strip_position(detail)),
    }
}

fn strip_position(message: &str) -> String {
    message
        .split(" at line ")
        .next()
        .unwrap_or(message)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field() {
        let err = describe_data_error(
            "Failed to deserialize the JSON body into the target type: missing field `grade` at line 1 column 40",
        );
        assert_eq!(err, FieldError::new("grade", "Field required"));
    }

    #[test]
    fn test_wrong_type_uses_path() {
        let err = describe_data_error(
            "Failed to deserialize the JSON body into the target type: grade: invalid type: string \"x\", expected i32 at line 1 column 12",
        );
        assert_eq!(err.field, "grade");
        assert_eq!(err.message, "invalid type: string \"x\", expected i32");
    }

    #[test]
    fn test_nested_path() {
        let err = describe_data_error(
            "Failed to deserialize the JSON body into the target type: subjects.math: invalid type: floating point `4.5`, expected i32 at line 1 column 30",
        );
        assert_eq!(err.field, "subjects.math");
    }

    #[test]
    fn test_unrecognized_message_falls_back_to_body() {
        let err = describe_data_error("invalid type: sequence, expected struct StudentPayload");
        assert_eq!(err.field, "body");
        assert_eq!(err.message, "invalid type: sequence, expected struct StudentPayload");
    }
}
