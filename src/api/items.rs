use axum::async_trait;
use axum::extract::{FromRequestParts, Path, State};
use axum::http::request::Parts;
use axum::Json;
use serde::Deserialize;

use super::envelope::Envelope;
use super::form::FormBody;
use super::AppState;
use crate::domain::{Item, ItemFilter, ItemId};
use crate::error::AppError;
use crate::service::ItemChanges;

#[derive(Debug, Default, Deserialize)]
pub struct CreateItemForm {
    #[serde(default)]
    pub description: String,
}

type ItemResponse = Result<Json<Envelope<Item>>, AppError>;
type ItemsResponse = Result<Json<Envelope<Vec<Item>>>, AppError>;

fn parse_item_id(raw: &str) -> Result<ItemId, AppError> {
    raw.parse::<ItemId>().map_err(|e| {
        tracing::warn!(id = %raw, "Rejecting non-numeric item id");
        AppError::BadRequest(e.to_string())
    })
}

/// `{id}` path segment parsed as an [`ItemId`].
///
/// Any failure, including a segment that is not valid UTF-8 once decoded,
/// is rejected as a bad request envelope.
pub struct ItemIdPath(pub ItemId);

#[async_trait]
impl<S> FromRequestParts<S> for ItemIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let message = rejection.body_text();
                tracing::warn!(error = %message, "Rejecting item id path segment");
                AppError::BadRequest(message)
            })?;
        parse_item_id(&raw_id).map(ItemIdPath)
    }
}

pub async fn list_items(State(state): State<AppState>) -> ItemsResponse {
    list(&state, ItemFilter::All).await
}

pub async fn list_completed_items(State(state): State<AppState>) -> ItemsResponse {
    list(&state, ItemFilter::Completed).await
}

pub async fn list_incomplete_items(State(state): State<AppState>) -> ItemsResponse {
    list(&state, ItemFilter::Incomplete).await
}

async fn list(state: &AppState, filter: ItemFilter) -> ItemsResponse {
    let items = state.service.list_items(filter).await?;
    Ok(Json(Envelope::success(items)))
}

pub async fn create_item(
    State(state): State<AppState>,
    FormBody(form): FormBody<CreateItemForm>,
) -> ItemResponse {
    let item = state.service.create_item(&form.description).await?;
    Ok(Json(Envelope::success(item)))
}

pub async fn get_item(State(state): State<AppState>, ItemIdPath(id): ItemIdPath) -> ItemResponse {
    let item = state.service.get_item(id).await?;
    Ok(Json(Envelope::success(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
    FormBody(changes): FormBody<ItemChanges>,
) -> ItemResponse {
    let item = state.service.update_item(id, &changes).await?;
    Ok(Json(Envelope::success(item)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    ItemIdPath(id): ItemIdPath,
) -> Result<Json<Envelope<()>>, AppError> {
    state.service.delete_item(id).await?;
    Ok(Json(Envelope::ok()))
}
