//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use authgate_core::error::AppError;

/// A JSON body that parsed and passed its validation rules.
///
/// Both failures become `InvalidArgument`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::invalid_argument("Invalid argument", e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::invalid_argument("Invalid argument", e.to_string()))?;

        Ok(Self(value))
    }
}
