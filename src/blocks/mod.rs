//! Block rendering dispatch.
//!
//! A dispatch table maps block-type names to renderer functions. Names
//! without an entry fall through to the generic passthrough renderer, which
//! returns the block's inner HTML unchanged; the one override entry routes
//! the team-members block through the template renderer.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::render::TemplateRenderer;

/// Qualified name of the block rendered through the template engine.
pub const TEAM_MEMBERS_BLOCK: &str = "teams/team-members-block";

/// One block in a render request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInput {
    pub block_name: String,
    #[serde(default)]
    pub attrs: Map<String, Value>,
    #[serde(default)]
    pub inner_html: String,
}

/// Renderer function for one block type.
pub type BlockRenderFn = Box<dyn Fn(&BlockInput) -> Result<String, AppError> + Send + Sync>;

/// Dispatch table from block-type name to renderer.
pub struct BlockDispatch {
    overrides: HashMap<String, BlockRenderFn>,
}

impl BlockDispatch {
    pub fn new() -> Self {
        Self {
            overrides: HashMap::new(),
        }
    }

    /// Build the table with the team-members override wired to `renderer`.
    pub fn with_template_renderer(renderer: Arc<TemplateRenderer>) -> Self {
        let mut dispatch = Self::new();
        dispatch.register(
            TEAM_MEMBERS_BLOCK,
            Box::new(move |block| {
                // Empty attributes are a legitimate "nothing to render" case.
                if block.attrs.is_empty() {
                    return Ok(String::new());
                }
                renderer.render(&block.attrs)
            }),
        );
        dispatch
    }

    /// Register an override for one block-type name.
    pub fn register(&mut self, block_name: impl Into<String>, render: BlockRenderFn) {
        self.overrides.insert(block_name.into(), render);
    }

    /// Render one block, consulting the dispatch table.
    pub fn render(&self, block: &BlockInput) -> Result<String, AppError> {
        match self.overrides.get(&block.block_name) {
            Some(render) => render(block),
            None => Ok(block.inner_html.clone()),
        }
    }

    /// Render a sequence of blocks into a single buffered string.
    pub fn render_all(&self, blocks: &[BlockInput]) -> Result<String, AppError> {
        let mut out = String::new();
        for block in blocks {
            out.push_str(&self.render(block)?);
        }
        Ok(out)
    }
}

impl Default for BlockDispatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn renderer_with(content: &str) -> (TempDir, Arc<TemplateRenderer>) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("TemplateOne.html"), content).unwrap();
        let renderer =
            Arc::new(TemplateRenderer::new(dir.path(), "/assets/placeholder.png").unwrap());
        (dir, renderer)
    }

    fn block(name: &str, attrs: Value, inner_html: &str) -> BlockInput {
        BlockInput {
            block_name: name.to_string(),
            attrs: attrs.as_object().cloned().unwrap_or_default(),
            inner_html: inner_html.to_string(),
        }
    }

    #[test]
    fn unregistered_block_passes_through() {
        let dispatch = BlockDispatch::new();
        let input = block("core/paragraph", json!({}), "<p>hello</p>");
        assert_eq!(dispatch.render(&input).unwrap(), "<p>hello</p>");
    }

    #[test]
    fn team_members_block_with_empty_attrs_renders_nothing() {
        let (_dir, renderer) = renderer_with("<div>members</div>");
        let dispatch = BlockDispatch::with_template_renderer(renderer);

        let input = block(TEAM_MEMBERS_BLOCK, json!({}), "<p>fallback</p>");
        assert_eq!(dispatch.render(&input).unwrap(), "");
    }

    #[test]
    fn team_members_block_renders_template() {
        let (_dir, renderer) =
            renderer_with("<img src=\"###PLACEHOLDERIMAGE###\"><h2>{{ headline }}</h2>");
        let dispatch = BlockDispatch::with_template_renderer(renderer);

        let input = block(
            TEAM_MEMBERS_BLOCK,
            json!({"template": 1, "headline": "Our Team"}),
            "",
        );
        let html = dispatch.render(&input).unwrap();

        assert!(html.contains("/assets/placeholder.png"));
        assert!(!html.contains("###PLACEHOLDERIMAGE###"));
        assert!(html.contains("Our Team"));
    }

    #[test]
    fn render_all_concatenates_in_order() {
        let (_dir, renderer) = renderer_with("<div>team</div>");
        let dispatch = BlockDispatch::with_template_renderer(renderer);

        let blocks = vec![
            block("core/heading", json!({}), "<h1>About</h1>"),
            block(TEAM_MEMBERS_BLOCK, json!({"template": 1}), ""),
            block("core/paragraph", json!({}), "<p>after</p>"),
        ];

        assert_eq!(
            dispatch.render_all(&blocks).unwrap(),
            "<h1>About</h1><div>team</div><p>after</p>"
        );
    }
}
