//! A strict-JSON extractor.
//!
//! `axum::Json` rejects malformed bodies with 400 Bad Request; the wire
//! contract here calls for 422 Unprocessable Entity instead. `StrictJson`
//! wraps `Json` and only changes the status code on rejection; the actual
//! strictness (unknown/missing/null/duplicate/out-of-range) comes entirely
//! from the derived `Deserialize` impls in [`crate::dto`].

use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;

pub struct StrictJson<T>(pub T);

impl<S, T> FromRequest<S> for StrictJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(StrictJson(value)),
            Err(rejection) => Err((StatusCode::UNPROCESSABLE_ENTITY, rejection.to_string()).into_response()),
        }
    }
}
