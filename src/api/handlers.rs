use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{
        Feedback, FeedbackEntry, FeedbackInput, HistoryEntry, RecommendationRequestInput,
        RecommendationResponse, WardrobeItem, WardrobeItemInput,
    },
    services::{feedback, recommendations},
};

use super::AppState;

/// Health check that also verifies the wardrobe store is reachable
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let timestamp = Utc::now().to_rfc3339();

    match state.wardrobe.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": timestamp,
                "port": state.port,
                "database": "connected",
            })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "error",
                    "timestamp": timestamp,
                    "port": state.port,
                    "database": "disconnected",
                    "error": "Database connection failed",
                })),
            )
        }
    }
}

// Wardrobe items

/// List all wardrobe items, newest first
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<WardrobeItem>>> {
    let items = state.wardrobe.list_all().await?;
    Ok(Json(items))
}

/// Get one wardrobe item
pub async fn get_item(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<WardrobeItem>> {
    state
        .wardrobe
        .find_by_id(item_id(id)?)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
}

/// Create a wardrobe item
pub async fn create_item(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<WardrobeItemInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<WardrobeItem>)> {
    let Json(input) = payload?;
    let item = state.wardrobe.create(input.normalize()?).await?;

    tracing::info!(
        request_id = %request_id,
        item_id = %item.id,
        category = %item.category,
        "Wardrobe item created"
    );

    Ok((StatusCode::CREATED, Json(item)))
}

/// Replace a wardrobe item's fields
pub async fn update_item(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<WardrobeItemInput>, JsonRejection>,
) -> AppResult<Json<WardrobeItem>> {
    let id = item_id(id)?;
    let Json(input) = payload?;
    let item = state
        .wardrobe
        .update(id, input.normalize()?)
        .await
        .map_err(item_not_found)?;

    tracing::info!(request_id = %request_id, item_id = %id, "Wardrobe item updated");
    Ok(Json(item))
}

/// Delete a wardrobe item
pub async fn delete_item(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    id: Result<Path<Uuid>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = item_id(id)?;
    state.wardrobe.delete(id).await.map_err(item_not_found)?;

    tracing::info!(request_id = %request_id, item_id = %id, "Wardrobe item deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Ids that are not UUIDs cannot name an item
fn item_id(path: Result<Path<Uuid>, PathRejection>) -> AppResult<Uuid> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::NotFound("Item not found".to_string()))
}

fn item_not_found(error: AppError) -> AppError {
    match error {
        AppError::NotFound(_) => AppError::NotFound("Item not found".to_string()),
        other => other,
    }
}

// Recommendations

/// Generate outfit recommendations for a request
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendationRequestInput>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(input) = payload?;

    tracing::info!(
        request_id = %request_id,
        occasion = %input.occasion,
        formality = %input.formality,
        "Processing recommendation request"
    );

    let response =
        recommendations::recommend(state.snapshot.as_ref(), state.history.as_ref(), input).await?;

    tracing::info!(
        request_id = %request_id,
        recommendation_id = %response.request_id,
        outfits = response.outfits.len(),
        "Recommendation completed"
    );

    Ok(Json(response))
}

/// Past requests with their outfits and feedback, newest first
pub async fn recommendation_history(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    Ok(Json(state.history.history().await?))
}

// Feedback

/// Rate a recommended outfit
pub async fn create_feedback(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<FeedbackInput>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Feedback>)> {
    let Json(input) = payload?;
    let feedback = feedback::submit_feedback(state.history.as_ref(), input).await?;

    tracing::info!(
        request_id = %request_id,
        feedback_id = %feedback.id,
        "Feedback created"
    );

    Ok((StatusCode::CREATED, Json(feedback)))
}

/// All feedback, newest first, with the rated request and outfit
pub async fn list_feedback(State(state): State<AppState>) -> AppResult<Json<Vec<FeedbackEntry>>> {
    Ok(Json(feedback::list_feedback(state.history.as_ref()).await?))
}
