//! Form body extraction that tolerates a missing body.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Form;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// `application/x-www-form-urlencoded` body, or `T::default()` when the
/// request carries no body and no content type.
pub struct FormBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if req.headers().contains_key(CONTENT_TYPE) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
            return Ok(FormBody(value));
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        if body.is_empty() {
            Ok(FormBody(T::default()))
        } else {
            Err(AppError::BadRequest(
                "Expected request with `Content-Type: application/x-www-form-urlencoded`"
                    .to_string(),
            ))
        }
    }
}
