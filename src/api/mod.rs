//! API handlers for the Carta REST endpoints

pub mod analytics;
pub mod availability;
pub mod health;
pub mod openapi;
pub mod reservations;
pub mod schedules;

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::{error::AppError, AppState};

/// Header injected by the identity proxy in front of this service. Identity
/// verification itself is delegated; ownership checks stay in the services.
const OWNER_ID_HEADER: &str = "x-owner-id";

/// Extractor for the authenticated restaurant owner
pub struct AuthenticatedOwner(pub String);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedOwner {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let owner_id = parts
            .headers
            .get(OWNER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Missing authentication".to_string()))?;

        Ok(AuthenticatedOwner(owner_id.to_string()))
    }
}

/// JSON extractor that turns body rejections into the `{"error": …}` 400
/// shape instead of axum's plain-text default
pub struct AppJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::Validation(rejection.body_text()))?;
        Ok(AppJson(value))
    }
}
