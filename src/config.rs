//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Project config: `<project_dir>/timberman.toml`
//! 3. Environment variables: `TIMBERMAN_*` prefix, `__` between section and key
//! 4. CLI flags (applied by the command layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{AssetNames, TreePattern};
use crate::util::path::resolve_path;

/// Name of the per-project config file.
pub const CONFIG_FILE_NAME: &str = "timberman.toml";

/// Tree generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeConfig {
    /// Number of symbols; the page has `length - 1` steps
    pub length: usize,
    /// Fixed seed for reproducible pages (random when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Trunk shape
    pub pattern: TreePattern,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            length: 101,
            seed: None,
            pattern: TreePattern::default(),
        }
    }
}

/// Input and output locations, relative to the project directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    pub template_dir: PathBuf,
    pub template_name: String,
    /// Source gifs
    pub frames_dir: PathBuf,
    /// Per-run renamed copies; cleared on every run
    pub copies_dir: PathBuf,
    pub output_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            template_dir: PathBuf::from("templates"),
            template_name: "game.html".into(),
            frames_dir: PathBuf::from("static/game_frames"),
            copies_dir: PathBuf::from("static/game_frame_copies"),
            output_file: PathBuf::from("index.html"),
        }
    }
}

/// Unified configuration for timberman.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory relative paths are resolved against (not read from file)
    #[serde(skip)]
    pub project_dir: PathBuf,
    pub tree: TreeConfig,
    pub paths: PathsConfig,
    pub assets: AssetNames,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            tree: TreeConfig::default(),
            paths: PathsConfig::default(),
            assets: AssetNames::default(),
        }
    }
}

/// Get the path to the config file in a project directory.
pub fn project_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(CONFIG_FILE_NAME)
}

/// Load a TOML file; missing keys keep their defaults.
fn load_file_settings(path: &Path) -> Result<Settings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Directory holding `timberman.toml`; also the base
    ///   for relative paths
    pub fn load(project_dir: &Path) -> Result<Self, ApplicationError> {
        // 1. defaults, 2. project file
        let config_path = project_config_path(project_dir);
        let mut current = if config_path.exists() {
            load_file_settings(&config_path)?
        } else {
            Self::default()
        };
        current.project_dir = project_dir.to_path_buf();

        // 3. environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        Ok(current)
    }

    /// Apply TIMBERMAN_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TIMBERMAN")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("tree.length") {
            settings.tree.length = val.parse().map_err(|e| ApplicationError::Config {
                message: format!("TIMBERMAN_TREE__LENGTH={}: {}", val, e),
            })?;
        }
        if let Ok(val) = config.get_string("tree.seed") {
            settings.tree.seed = Some(val.parse().map_err(|e| ApplicationError::Config {
                message: format!("TIMBERMAN_TREE__SEED={}: {}", val, e),
            })?);
        }
        if let Ok(val) = config.get_string("tree.pattern") {
            settings.tree.pattern = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }

        let paths = &mut settings.paths;
        for (key, target) in [
            ("paths.template_dir", &mut paths.template_dir),
            ("paths.frames_dir", &mut paths.frames_dir),
            ("paths.copies_dir", &mut paths.copies_dir),
            ("paths.output_file", &mut paths.output_file),
        ] {
            if let Ok(val) = config.get_string(key) {
                *target = PathBuf::from(val);
            }
        }
        if let Ok(val) = config.get_string("paths.template_name") {
            paths.template_name = val;
        }

        if let Ok(val) = config.get_string("assets.naming") {
            settings.assets.naming = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }

        let assets = &mut settings.assets;
        for (key, target) in [
            ("assets.start", &mut assets.start),
            ("assets.main_left", &mut assets.main_left),
            ("assets.main_right", &mut assets.main_right),
            ("assets.main_neutral", &mut assets.main_neutral),
            ("assets.death_left", &mut assets.death_left),
            ("assets.death_right", &mut assets.death_right),
            ("assets.victory", &mut assets.victory),
        ] {
            if let Ok(val) = config.get_string(key) {
                *target = val;
            }
        }

        Ok(settings)
    }

    /// Resolve a configured path against the project directory.
    ///
    /// Handles `~`, `$VAR` and `${VAR}` syntax.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        resolve_path(&self.project_dir, path)
    }

    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.paths.template_dir)
            .join(&self.paths.template_name)
    }

    pub fn frames_dir(&self) -> PathBuf {
        self.resolve(&self.paths.frames_dir)
    }

    pub fn copies_dir(&self) -> PathBuf {
        self.resolve(&self.paths.copies_dir)
    }

    pub fn output_file(&self) -> PathBuf {
        self.resolve(&self.paths.output_file)
    }

    /// Reject layouts where clearing the copies directory would delete inputs.
    ///
    /// The copies directory must not equal or contain the frames directory
    /// or the template directory.
    pub fn validate_paths(&self) -> Result<(), ApplicationError> {
        let copies_dir = self.copies_dir();
        for (key, input) in [
            ("frames_dir", self.frames_dir()),
            ("template_dir", self.resolve(&self.paths.template_dir)),
        ] {
            if input.starts_with(&copies_dir) {
                return Err(ApplicationError::Config {
                    message: format!(
                        "paths.copies_dir {} would remove paths.{} {}",
                        copies_dir.display(),
                        key,
                        input.display()
                    ),
                });
            }
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# timberman configuration
#
# Locations (by precedence, lowest to highest):
#   Project: <project_dir>/timberman.toml
#   Env:     TIMBERMAN_* environment variables, e.g. TIMBERMAN_TREE__LENGTH=21
#   CLI:     --length, --seed

[tree]
# Number of tree symbols; the page gets length - 1 steps (minimum 2)
# length = 101

# Fixed seed for a reproducible page (random when unset)
# seed = 42

# "uniform": after a plain segment pick N, L or R
# "alternating": after a plain segment always pick a branch
# pattern = "uniform"

[paths]
# Relative paths are resolved against the project directory
# template_dir = "templates"
# template_name = "game.html"
# frames_dir = "static/game_frames"
# copies_dir = "static/game_frame_copies"   # cleared on every run!
# output_file = "index.html"

[assets]
# "symbol": one gif per symbol, named by the keys below
# "window": gifs named after three consecutive symbols (NLN, LNR, ...),
#           deaths as NLN_DEATH / LN_DEATH; start and victory still apply
# naming = "symbol"

# Basenames of the gifs in frames_dir (without .gif)
# start = "START"
# main_left = "LEFT"
# main_right = "RIGHT"
# main_neutral = "NEUTRAL"
# death_left = "LEFT_DEATH"
# death_right = "RIGHT_DEATH"
# victory = "VICTORY"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_matches_original_layout() {
        let settings = Settings::default();
        assert_eq!(settings.tree.length, 101);
        assert_eq!(settings.tree.seed, None);
        assert_eq!(settings.tree.pattern, TreePattern::Uniform);
        assert_eq!(settings.paths.frames_dir, PathBuf::from("static/game_frames"));
        assert_eq!(
            settings.paths.copies_dir,
            PathBuf::from("static/game_frame_copies")
        );
        assert_eq!(settings.paths.output_file, PathBuf::from("index.html"));
    }

    #[test]
    fn given_project_dir_when_resolving_paths_then_anchors_them() {
        let settings = Settings {
            project_dir: PathBuf::from("/site"),
            ..Settings::default()
        };
        assert_eq!(
            settings.template_path(),
            PathBuf::from("/site/templates/game.html")
        );
        assert_eq!(settings.copies_dir(), PathBuf::from("/site/static/game_frame_copies"));
        assert_eq!(settings.output_file(), PathBuf::from("/site/index.html"));
    }

    #[test]
    fn given_default_layout_when_validating_paths_then_ok() {
        assert!(Settings::default().validate_paths().is_ok());
    }

    #[test]
    fn given_copies_dir_containing_inputs_when_validating_paths_then_config_error() {
        for (copies_dir, key) in [
            ("static", "frames_dir"),
            ("static/game_frames", "frames_dir"),
            ("static/x/..", "frames_dir"),
            (".", "frames_dir"),
            ("templates", "template_dir"),
        ] {
            let mut settings = Settings {
                project_dir: PathBuf::from("/site"),
                ..Settings::default()
            };
            settings.paths.copies_dir = PathBuf::from(copies_dir);
            let err = settings.validate_paths().unwrap_err();
            assert!(
                matches!(&err, ApplicationError::Config { message } if message.contains(key)),
                "{}: {}",
                copies_dir,
                err
            );
        }
    }

    #[test]
    fn given_copies_dir_inside_frames_dir_when_validating_paths_then_ok() {
        let mut settings = Settings::default();
        settings.paths.copies_dir = PathBuf::from("static/game_frames/copies");
        assert!(settings.validate_paths().is_ok());
    }

    #[test]
    fn given_partial_toml_when_parsing_then_missing_keys_keep_defaults() {
        let settings: Settings = toml::from_str(
            r#"
[tree]
length = 9
pattern = "alternating"

[assets]
victory = "WIN"
"#,
        )
        .expect("parse partial config");

        assert_eq!(settings.tree.length, 9);
        assert_eq!(settings.tree.pattern, TreePattern::Alternating);
        assert_eq!(settings.assets.victory, "WIN");
        assert_eq!(settings.assets.start, "START");
        assert_eq!(settings.paths, PathsConfig::default());
    }

    #[test]
    fn given_settings_when_to_toml_then_parses_back() {
        let mut settings = Settings::default();
        settings.tree.seed = Some(7);
        let rendered = settings.to_toml().expect("serialize");
        let parsed: Settings = toml::from_str(&rendered).expect("parse");
        assert_eq!(parsed.tree, settings.tree);
        assert_eq!(parsed.assets, settings.assets);
    }

    #[test]
    fn given_template_when_parsing_then_yields_defaults() {
        let parsed: Settings = toml::from_str(&Settings::template()).expect("parse template");
        assert_eq!(parsed, Settings::default());
    }
}
