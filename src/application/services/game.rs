//! Game page generation service
//!
//! One linear run: seed → tree → sequence → frame copies → rendered page.

use std::path::PathBuf;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::application::services::{FrameService, RenderContext, RenderService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{CopiedFrame, SequenceGenerator, TreeString};
use crate::infrastructure::traits::FileSystem;

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GameReport {
    pub tree: TreeString,
    /// Seed the tree was generated from; pass it back to reproduce the page
    pub seed: u64,
    pub steps: usize,
    pub frames: Vec<CopiedFrame>,
    pub output_file: PathBuf,
}

/// Service for generating the game page.
pub struct GameService {
    frames: FrameService,
    render: RenderService,
}

impl GameService {
    /// Create a new game service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            frames: FrameService::new(Arc::clone(&fs)),
            render: RenderService::new(fs),
        }
    }

    /// Generate the page described by `settings`.
    ///
    /// Any failure aborts the run; nothing is retried.
    #[instrument(skip_all)]
    pub fn run(&self, settings: &Settings) -> ApplicationResult<GameReport> {
        settings.validate_paths()?;
        let seed = settings.tree.seed.unwrap_or_else(|| rand::rng().random());
        info!(
            "Generating tree: length={}, pattern={:?}, seed={}",
            settings.tree.length, settings.tree.pattern, seed
        );

        let mut generator = SequenceGenerator::seeded(seed, settings.tree.pattern);
        let tree = generator.generate_tree_string(settings.tree.length)?;
        let sequence = generator.build_sequence(&tree, &settings.assets);
        debug!("run: tree={}, steps={}", tree, sequence.len());

        let frames_dir = settings.frames_dir();
        let copies_dir = settings.copies_dir();
        let output_file = settings.output_file();
        let frames = self
            .frames
            .prepare(&sequence, &settings.assets, &frames_dir, &copies_dir)?;

        let context = RenderContext {
            sequence: &sequence,
            tree: tree.to_string(),
            seed,
            copies_url: RenderService::relative_url(&output_file, &copies_dir),
            frames_url: RenderService::relative_url(&output_file, &frames_dir),
            assets: &settings.assets,
        };
        let html = self.render.render(&settings.template_path(), &context)?;
        self.render.write_page(&output_file, &html)?;

        Ok(GameReport {
            tree,
            seed,
            steps: sequence.len(),
            frames,
            output_file,
        })
    }
}
