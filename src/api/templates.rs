//! Template catalog and block pattern endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::render::{lookup_template, PatternRegistry, TemplateSelection};
use crate::AppState;

/// GET /api/templates - The full template catalog.
pub async fn get_template_catalog() -> ApiResult<TemplateSelection> {
    success(lookup_template(None))
}

/// GET /api/templates/{id} - One catalog entry.
///
/// An unknown id answers with the full catalog instead of a not-found error,
/// matching the selector widget's contract.
pub async fn get_template_by_id(Path(id): Path<u32>) -> ApiResult<TemplateSelection> {
    success(lookup_template(Some(id)))
}

/// GET /api/patterns - Registered block patterns and their categories.
pub async fn list_patterns(State(state): State<AppState>) -> ApiResult<PatternRegistry> {
    success(state.patterns.as_ref().clone())
}
