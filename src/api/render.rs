//! Block render endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::{success, ApiResult};
use crate::blocks::BlockInput;
use crate::AppState;

/// Request body for POST /api/render.
#[derive(Debug, Deserialize)]
pub struct RenderBlocksRequest {
    pub blocks: Vec<BlockInput>,
}

/// Rendered output of a block sequence.
#[derive(Debug, Serialize)]
pub struct RenderResult {
    pub html: String,
}

/// POST /api/render - Render a block sequence through the dispatch table.
pub async fn render_blocks(
    State(state): State<AppState>,
    Json(request): Json<RenderBlocksRequest>,
) -> ApiResult<RenderResult> {
    let html = state.blocks.render_all(&request.blocks)?;
    success(RenderResult { html })
}
