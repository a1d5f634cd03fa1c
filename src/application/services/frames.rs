//! Frame asset service
//!
//! Verifies the source gifs a sequence references and maintains the copies
//! directory: cleared at the start of a run, then one renamed main gif per step.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{AssetNames, CopiedFrame, Sequence};
use crate::infrastructure::traits::FileSystem;

/// Service for preparing the per-run frame copies.
pub struct FrameService {
    fs: Arc<dyn FileSystem>,
}

impl FrameService {
    /// Create a new frame service.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Path of a source gif: `<frames_dir>/<basename>.gif`.
    pub fn source_path(frames_dir: &Path, basename: &str) -> PathBuf {
        frames_dir.join(format!("{}.gif", basename))
    }

    /// Check that every gif the page will reference exists under `frames_dir`.
    ///
    /// Covers each step's main and death gif plus the start and victory frames.
    pub fn verify_assets(
        &self,
        sequence: &Sequence,
        assets: &AssetNames,
        frames_dir: &Path,
    ) -> ApplicationResult<()> {
        debug!("verify_assets: frames_dir={}", frames_dir.display());
        let mut names = vec![assets.start.as_str(), assets.victory.as_str()];
        for step in sequence {
            names.push(step.correct.gif.as_str());
            names.push(step.wrong.gif.as_str());
        }
        names.sort_unstable();
        names.dedup();

        for name in names {
            let path = Self::source_path(frames_dir, name);
            if !self.fs.is_file(&path) {
                return Err(ApplicationError::AssetMissing(path));
            }
        }
        Ok(())
    }

    /// Remove the copies directory with everything in it, then recreate it empty.
    pub fn reset_output_dir(&self, copies_dir: &Path) -> ApplicationResult<()> {
        if self.fs.exists(copies_dir) {
            let stale = self
                .fs
                .list_files(copies_dir)
                .with_path_context("list copies directory", copies_dir)?;
            debug!(
                "reset_output_dir: removing {} stale frames from {}",
                stale.len(),
                copies_dir.display()
            );
            self.fs
                .remove_dir_all(copies_dir)
                .with_path_context("clear copies directory", copies_dir)?;
        }
        self.fs
            .create_dir_all(copies_dir)
            .with_path_context("create copies directory", copies_dir)
    }

    /// Copy each step's main gif to `<copies_dir>/<basename>_<index>.gif`.
    pub fn copy_frames(
        &self,
        sequence: &Sequence,
        frames_dir: &Path,
        copies_dir: &Path,
    ) -> ApplicationResult<Vec<CopiedFrame>> {
        let mut frames = Vec::with_capacity(sequence.len());
        for step in sequence {
            let source = Self::source_path(frames_dir, &step.correct.gif);
            if !self.fs.is_file(&source) {
                return Err(ApplicationError::AssetMissing(source));
            }
            let destination = copies_dir.join(step.frame_file_name());
            self.fs
                .copy(&source, &destination)
                .with_path_context("copy frame", &source)?;
            frames.push(CopiedFrame {
                index: step.index,
                source,
                destination,
            });
        }
        debug!("copy_frames: copied {} frames", frames.len());
        Ok(frames)
    }

    /// Verify, clear, then repopulate the copies directory.
    ///
    /// Verification runs first, so a missing asset leaves the previous
    /// run's frames in place.
    pub fn prepare(
        &self,
        sequence: &Sequence,
        assets: &AssetNames,
        frames_dir: &Path,
        copies_dir: &Path,
    ) -> ApplicationResult<Vec<CopiedFrame>> {
        self.verify_assets(sequence, assets, frames_dir)?;
        self.reset_output_dir(copies_dir)?;
        let frames = self.copy_frames(sequence, frames_dir, copies_dir)?;
        info!(
            "Prepared {} frames in {}",
            frames.len(),
            copies_dir.display()
        );
        Ok(frames)
    }
}
