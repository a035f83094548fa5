//! Block patterns built from the template catalog.
//!
//! Pattern content is the template file with the placeholder token already
//! substituted, so the editor can insert it as-is.

use std::path::Path;

use serde::Serialize;

use super::{template_catalog, PLACEHOLDER_TOKEN};
use crate::errors::AppError;

/// Category the member patterns are registered under.
pub const PATTERN_CATEGORY: &str = "teams/member-block-patterns";

/// A pattern category record.
#[derive(Debug, Clone, Serialize)]
pub struct PatternCategory {
    pub name: String,
    pub label: String,
}

/// An insertable block pattern.
#[derive(Debug, Clone, Serialize)]
pub struct BlockPattern {
    pub name: String,
    pub title: String,
    pub description: String,
    pub content: String,
    pub categories: Vec<String>,
}

/// All registered patterns and their categories.
#[derive(Debug, Clone, Serialize)]
pub struct PatternRegistry {
    pub categories: Vec<PatternCategory>,
    pub patterns: Vec<BlockPattern>,
}

impl PatternRegistry {
    /// Load pattern content from the template directory.
    ///
    /// A missing pattern file is a startup failure.
    pub fn load(
        template_dir: &Path,
        placeholder_image_url: &str,
    ) -> Result<Self, AppError> {
        let categories = vec![PatternCategory {
            name: PATTERN_CATEGORY.to_string(),
            label: "Team Members Patterns".to_string(),
        }];

        let mut patterns = Vec::new();
        for entry in template_catalog() {
            let path = template_dir.join(&entry.file);
            let content = std::fs::read_to_string(&path).map_err(|e| {
                AppError::Template(format!(
                    "failed to read pattern source {}: {}",
                    path.display(),
                    e
                ))
            })?;

            patterns.push(BlockPattern {
                name: format!("teams/team-members-block-pattern-{}", entry.id),
                title: entry.name.clone(),
                description: format!("{} for team members", entry.name),
                content: content.replace(PLACEHOLDER_TOKEN, placeholder_image_url),
                categories: vec![PATTERN_CATEGORY.to_string()],
            });
        }

        Ok(Self {
            categories,
            patterns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_substitutes_placeholder_in_content() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("TemplateOne.html"),
            "<img src=\"###PLACEHOLDERIMAGE###\">",
        )
        .unwrap();

        let registry = PatternRegistry::load(dir.path(), "/assets/member.png").unwrap();

        assert_eq!(registry.patterns.len(), 1);
        assert_eq!(registry.categories.len(), 1);
        let pattern = &registry.patterns[0];
        assert!(pattern.content.contains("/assets/member.png"));
        assert!(!pattern.content.contains(PLACEHOLDER_TOKEN));
        assert_eq!(pattern.categories, vec![PATTERN_CATEGORY.to_string()]);
    }

    #[test]
    fn load_fails_without_pattern_file() {
        let dir = TempDir::new().unwrap();
        assert!(PatternRegistry::load(dir.path(), "/p.png").is_err());
    }
}
