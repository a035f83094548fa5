//! Member API endpoints for the editor surface.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{
    descriptor_for, AssignTermsRequest, CreateMemberRequest, FieldWriteRequest, TeamMember,
    TeamTerm, MEMBER_FIELDS,
};
use crate::AppState;

/// GET /api/fields - The member field schema.
///
/// The editor panel's whole contract: these field names exist, with these
/// types and these defaults.
pub async fn field_schema() -> ApiResult<Value> {
    let fields: Vec<Value> = MEMBER_FIELDS
        .iter()
        .map(|d| {
            serde_json::json!({
                "name": d.name,
                "type": d.kind_name(),
                "default": d.default_json(),
                "single": true,
                "showInRest": true,
            })
        })
        .collect();
    success(Value::Array(fields))
}

/// GET /api/members - List all members.
pub async fn list_members(State(state): State<AppState>) -> ApiResult<Vec<TeamMember>> {
    let members = state.repo.list_members().await?;
    success(members)
}

/// GET /api/members/{id} - Get a single member.
pub async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<TeamMember> {
    match state.repo.get_member(id).await? {
        Some(member) => success(member),
        None => Err(AppError::NotFound(format!("Member {} not found", id))),
    }
}

/// POST /api/members - Create a new member.
pub async fn create_member(
    State(state): State<AppState>,
    Json(request): Json<CreateMemberRequest>,
) -> ApiResult<TeamMember> {
    let member = state.repo.create_member(&request).await?;
    success(member)
}

/// DELETE /api/members/{id} - Delete a member.
pub async fn delete_member(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    state.repo.delete_member(id).await?;
    success(())
}

/// GET /api/members/{id}/meta - Read all metadata fields.
pub async fn get_member_meta(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Value> {
    match state.repo.get_member(id).await? {
        Some(member) => success(member.meta()),
        None => Err(AppError::NotFound(format!("Member {} not found", id))),
    }
}

/// PUT /api/members/{id}/meta/{field} - Write a single metadata field.
pub async fn write_member_field(
    State(state): State<AppState>,
    Path((id, field)): Path<(i64, String)>,
    Json(request): Json<FieldWriteRequest>,
) -> ApiResult<TeamMember> {
    let descriptor = descriptor_for(&field)
        .ok_or_else(|| AppError::Validation(format!("Unknown field {}", field)))?;

    let value = descriptor
        .parse_value(request.value)
        .map_err(AppError::Validation)?;

    let member = state.repo.write_member_field(id, descriptor, &value).await?;
    success(member)
}

/// GET /api/members/{id}/terms - List a member's term assignments.
pub async fn member_terms(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<TeamTerm>> {
    if state.repo.get_member(id).await?.is_none() {
        return Err(AppError::NotFound(format!("Member {} not found", id)));
    }

    let terms = state.repo.terms_for_member(id).await?;
    success(terms)
}

/// PUT /api/members/{id}/terms - Replace a member's term assignments.
pub async fn assign_member_terms(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<AssignTermsRequest>,
) -> ApiResult<Vec<TeamTerm>> {
    let terms = state.repo.assign_terms(id, &request).await?;
    success(terms)
}
