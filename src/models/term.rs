//! Taxonomy term model for team groupings.

use serde::{Deserialize, Serialize};

/// A classification term members can be assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamTerm {
    pub id: i64,
    pub label: String,
}

/// Request body for creating a new term.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTermRequest {
    pub label: String,
}

/// Request body for replacing a member's term assignments.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignTermsRequest {
    pub term_ids: Vec<i64>,
}
