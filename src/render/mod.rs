//! Template rendering for team-member views.
//!
//! A small catalog maps template ids to files in the configured template
//! directory. Rendering binds the caller's block attributes as template
//! variables and substitutes the placeholder-image token in the output.
//! Template files are read per render; there is no compiled-template cache
//! beyond what the engine does internally.

mod patterns;

pub use patterns::*;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tera::{Context, Tera};

use crate::errors::AppError;

/// Token replaced with the configured placeholder asset URL.
pub const PLACEHOLDER_TOKEN: &str = "###PLACEHOLDERIMAGE###";

/// Default template id when the caller does not pick one.
pub const DEFAULT_TEMPLATE_ID: u32 = 1;

/// One entry in the template catalog.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateEntry {
    pub id: u32,
    pub name: String,
    pub file: String,
}

/// The static template catalog.
pub fn template_catalog() -> Vec<TemplateEntry> {
    vec![TemplateEntry {
        id: 1,
        name: "Member Template one".to_string(),
        file: "TemplateOne.html".to_string(),
    }]
}

/// Result of a catalog lookup.
///
/// An unknown id falls through to the full catalog rather than a "not found"
/// error; callers wanting exactly one template use [`TemplateRenderer::resolve`].
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TemplateSelection {
    One(TemplateEntry),
    All(Vec<TemplateEntry>),
}

/// Look up a template by id, or the full catalog if no id is given.
pub fn lookup_template(template_id: Option<u32>) -> TemplateSelection {
    let catalog = template_catalog();

    if let Some(id) = template_id {
        for entry in &catalog {
            if entry.id == id {
                return TemplateSelection::One(entry.clone());
            }
        }
    }

    TemplateSelection::All(catalog)
}

/// Renders member views from the template directory.
pub struct TemplateRenderer {
    template_dir: PathBuf,
    placeholder_image_url: String,
}

impl TemplateRenderer {
    /// Construct a renderer rooted at `template_dir`.
    ///
    /// A missing directory is a startup failure.
    pub fn new(
        template_dir: &Path,
        placeholder_image_url: impl Into<String>,
    ) -> Result<Self, AppError> {
        if !template_dir.is_dir() {
            return Err(AppError::Template(format!(
                "template directory {} does not exist",
                template_dir.display()
            )));
        }

        Ok(Self {
            template_dir: template_dir.to_path_buf(),
            placeholder_image_url: placeholder_image_url.into(),
        })
    }

    /// Resolve a template id to exactly one catalog entry.
    ///
    /// The render path needs a single file, so ids the catalog does not know
    /// fall back to the default entry.
    pub fn resolve(&self, template_id: u32) -> TemplateEntry {
        match lookup_template(Some(template_id)) {
            TemplateSelection::One(entry) => entry,
            TemplateSelection::All(catalog) => catalog
                .into_iter()
                .find(|e| e.id == DEFAULT_TEMPLATE_ID)
                .expect("catalog always contains the default template"),
        }
    }

    /// Render a member view from block attributes.
    ///
    /// The attributes become the template's bind variables; the `template`
    /// attribute selects the catalog entry. Engine errors and a missing
    /// template file propagate unwrapped.
    pub fn render(&self, attrs: &Map<String, Value>) -> Result<String, AppError> {
        let template_id = attrs
            .get("template")
            .and_then(|v| v.as_u64())
            .map(|v| v as u32)
            .unwrap_or(DEFAULT_TEMPLATE_ID);

        let entry = self.resolve(template_id);
        let path = self.template_dir.join(&entry.file);
        let source = std::fs::read_to_string(&path).map_err(|e| {
            AppError::Template(format!("failed to read template {}: {}", path.display(), e))
        })?;

        let context = Context::from_serialize(attrs)?;
        let html = Tera::one_off(&source, &context, true)?;

        Ok(html.replace(PLACEHOLDER_TOKEN, &self.placeholder_image_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn template_dir_with(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("TemplateOne.html"), content).unwrap();
        dir
    }

    fn attrs(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn lookup_by_known_id_returns_single_entry() {
        match lookup_template(Some(1)) {
            TemplateSelection::One(entry) => assert_eq!(entry.file, "TemplateOne.html"),
            TemplateSelection::All(_) => panic!("expected a single entry for id 1"),
        }
    }

    #[test]
    fn lookup_without_id_returns_full_catalog() {
        match lookup_template(None) {
            TemplateSelection::All(catalog) => assert_eq!(catalog.len(), 1),
            TemplateSelection::One(_) => panic!("expected the full catalog"),
        }
    }

    #[test]
    fn lookup_with_unknown_id_returns_full_catalog() {
        match lookup_template(Some(999)) {
            TemplateSelection::All(catalog) => assert_eq!(catalog.len(), 1),
            TemplateSelection::One(_) => panic!("expected the full catalog for an unknown id"),
        }
    }

    #[test]
    fn renderer_requires_existing_directory() {
        let result = TemplateRenderer::new(Path::new("/nonexistent/templates"), "/p.png");
        assert!(result.is_err());
    }

    #[test]
    fn render_substitutes_placeholder_token() {
        let dir = template_dir_with("<img src=\"###PLACEHOLDERIMAGE###\" alt=\"{{ title }}\">");
        let renderer = TemplateRenderer::new(dir.path(), "/assets/placeholder.png").unwrap();

        let html = renderer
            .render(&attrs(json!({"template": 1, "title": "Crew"})))
            .unwrap();

        assert!(html.contains("/assets/placeholder.png"));
        assert!(!html.contains(PLACEHOLDER_TOKEN));
        assert!(html.contains("Crew"));
    }

    #[test]
    fn render_falls_back_to_default_template_for_unknown_id() {
        let dir = template_dir_with("<p>default</p>");
        let renderer = TemplateRenderer::new(dir.path(), "/p.png").unwrap();

        let html = renderer.render(&attrs(json!({"template": 999}))).unwrap();
        assert_eq!(html, "<p>default</p>");
    }

    #[test]
    fn render_propagates_missing_template_file() {
        let dir = TempDir::new().unwrap();
        let renderer = TemplateRenderer::new(dir.path(), "/p.png").unwrap();

        let result = renderer.render(&attrs(json!({"template": 1})));
        assert!(result.is_err());
    }
}
