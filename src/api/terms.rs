//! Taxonomy term endpoints.
//!
//! Term management lives on the editor surface; the read endpoint under
//! `/wp-team-members/v1/` is public and feeds the selector widget.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateTermRequest, TeamTerm};
use crate::AppState;

/// GET /wp-team-members/v1/ - Public term listing.
///
/// Always answers with a JSON array; zero registered terms is a normal empty
/// result, and store failures degrade to the same empty array rather than an
/// error status.
pub async fn public_terms(State(state): State<AppState>) -> Json<Vec<TeamTerm>> {
    match state.repo.list_terms().await {
        Ok(terms) => Json(terms),
        Err(e) => {
            tracing::warn!("Failed to list terms for public endpoint: {}", e);
            Json(Vec::new())
        }
    }
}

/// GET /api/terms - List all terms.
pub async fn list_terms(State(state): State<AppState>) -> ApiResult<Vec<TeamTerm>> {
    let terms = state.repo.list_terms().await?;
    success(terms)
}

/// POST /api/terms - Create a new term.
pub async fn create_term(
    State(state): State<AppState>,
    Json(request): Json<CreateTermRequest>,
) -> ApiResult<TeamTerm> {
    if request.label.trim().is_empty() {
        return Err(AppError::Validation("Term label is required".to_string()));
    }

    let term = state.repo.create_term(&request).await?;
    success(term)
}

/// DELETE /api/terms/{id} - Delete a term.
pub async fn delete_term(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.repo.delete_term(id).await?;
    success(())
}
