//! Page rendering service
//!
//! Feeds the sequence to a Jinja-style template and writes the static page.

use std::path::{Component, Path};
use std::sync::Arc;

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use tracing::{debug, info};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{AssetNames, Sequence};
use crate::infrastructure::traits::FileSystem;
use crate::util::path::{normalize_path, normalize_path_separator};

/// Everything the template sees.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    /// Steps in play order
    pub sequence: &'a Sequence,
    /// Character form of the tree, e.g. `NLNRN`
    pub tree: String,
    /// Seed the tree was generated from
    pub seed: u64,
    /// Copies directory relative to the page
    pub copies_url: String,
    /// Source frames directory relative to the page
    pub frames_url: String,
    pub assets: &'a AssetNames,
}

/// Service for rendering and writing the game page.
pub struct RenderService {
    fs: Arc<dyn FileSystem>,
}

impl RenderService {
    /// Create a new render service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Render the template at `template_path` with `context`.
    ///
    /// Undefined template variables are errors, not empty strings.
    pub fn render(&self, template_path: &Path, context: &RenderContext) -> ApplicationResult<String> {
        debug!("render: template={}", template_path.display());
        let source = self
            .fs
            .read_to_string(template_path)
            .with_path_context("read template", template_path)?;
        let name = template_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "game.html".to_string());

        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template(&name, &source)?;
        let html = env.get_template(&name)?.render(context)?;
        Ok(html)
    }

    /// Write the rendered page, creating its parent directory if needed.
    pub fn write_page(&self, output_file: &Path, html: &str) -> ApplicationResult<()> {
        self.fs
            .ensure_parent(output_file)
            .with_path_context("create output directory", output_file)?;
        self.fs
            .write(output_file, html)
            .with_path_context("write page", output_file)?;
        info!("Wrote {} ({} bytes)", output_file.display(), html.len());
        Ok(())
    }

    /// Path of `target` as seen from the page at `output_file`, `/`-separated.
    ///
    /// Both paths are normalized first. Falls back to the target path itself
    /// when no relative path exists (e.g. different drive prefixes).
    pub fn relative_url(output_file: &Path, target: &Path) -> String {
        let output_file = normalize_path(output_file);
        let target = normalize_path(target);
        let base = output_file.parent().unwrap_or(Path::new(""));
        match pathdiff::diff_paths(&target, base) {
            Some(relative) => {
                let parts: Vec<String> = relative
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                        Component::ParentDir => Some("..".to_string()),
                        _ => None,
                    })
                    .collect();
                if parts.is_empty() {
                    ".".to_string()
                } else {
                    parts.join("/")
                }
            }
            None => normalize_path_separator(&target.to_string_lossy()),
        }
    }
}
