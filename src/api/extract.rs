//! Extractors that reject with [`AppError`] so failures share the common
//! error body.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// JSON body that has passed `validator` checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> AppResult<Self> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

/// Path parameters; malformed values become `400 BAD_REQUEST`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> AppResult<Self> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(ApiPath(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct TestBody {
        #[validate(length(min = 1, max = 5, message = "Name must be between 1 and 5 characters"))]
        name: String,
        #[validate(range(min = 18, max = 100, message = "Age must be between 18 and 100"))]
        age: u8,
    }

    fn json_request(body: &str) -> Request {
        Request::builder()
            .method(Method::POST)
            .uri("/test")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn valid_body_is_extracted() {
        let ValidatedJson(body) =
            ValidatedJson::<TestBody>::from_request(json_request(r#"{"name":"ann","age":30}"#), &())
                .await
                .unwrap();

        assert_eq!(body.name, "ann");
        assert_eq!(body.age, 30);
    }

    #[tokio::test]
    async fn every_failing_field_is_reported() {
        let error = ValidatedJson::<TestBody>::from_request(
            json_request(r#"{"name":"","age":150}"#),
            &(),
        )
        .await
        .unwrap_err();

        match error {
            AppError::ValidationErrors { errors } => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["age", "name"]);
            }
            other => panic!("Expected ValidationErrors, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let error = ValidatedJson::<TestBody>::from_request(json_request("{not json"), &())
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::BadRequest { message } if !message.is_empty()));
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/test")
            .body(Body::from(r#"{"name":"ann","age":30}"#))
            .unwrap();

        let error = ValidatedJson::<TestBody>::from_request(request, &())
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::BadRequest { .. }));
    }
}
