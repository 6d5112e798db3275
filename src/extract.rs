//! Request extraction helpers
//!
//! [`ValidatedJson`] deserializes a JSON body and runs its `validator`
//! rules in one step, so malformed payloads and rule violations both
//! come back as a 400 with the uniform envelope instead of the framework
//! default rejection.

use crate::error::ApiError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that validates the payload before the handler runs
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::Validation(errors.to_string()))?;

        Ok(ValidatedJson(value))
    }
}
