//! Step mapping: which button is correct at each position and which frame it plays

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Side, Symbol, TreeString};

/// How a step's main and death gif basenames are chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameNaming {
    /// One gif per symbol, taken from the [`AssetNames`] fields.
    #[default]
    Symbol,
    /// Gif named after the symbol window `tree[i..i + 3]`, e.g. `NLN`,
    /// `LNR`. The death gif is `<window>_DEATH` on a plain segment and
    /// `<first two symbols>_DEATH` on a branch, e.g. `NRN_DEATH`, `LN_DEATH`.
    Window,
}

impl FromStr for FrameNaming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "symbol" => Ok(FrameNaming::Symbol),
            "window" => Ok(FrameNaming::Window),
            other => Err(format!(
                "unknown frame naming {:?} (expected symbol or window)",
                other
            )),
        }
    }
}

/// Basenames (without `.gif`) of the source frames.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssetNames {
    /// Selects between the per-symbol names below and window names
    pub naming: FrameNaming,
    /// Shown before the first chop
    pub start: String,
    /// Chop animation when the safe side is left
    pub main_left: String,
    /// Chop animation when the safe side is right
    pub main_right: String,
    /// Chop animation on a plain trunk segment
    pub main_neutral: String,
    /// Death animation when chopping from the left
    pub death_left: String,
    /// Death animation when chopping from the right
    pub death_right: String,
    /// Shown after the last step
    pub victory: String,
}

impl Default for AssetNames {
    fn default() -> Self {
        Self {
            naming: FrameNaming::default(),
            start: "START".into(),
            main_left: "LEFT".into(),
            main_right: "RIGHT".into(),
            main_neutral: "NEUTRAL".into(),
            death_left: "LEFT_DEATH".into(),
            death_right: "RIGHT_DEATH".into(),
            victory: "VICTORY".into(),
        }
    }
}

impl AssetNames {
    fn main_for(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.main_left,
            Side::Right => &self.main_right,
        }
    }

    fn death_for(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.death_left,
            Side::Right => &self.death_right,
        }
    }
}

/// A button and the gif it leads to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub button: Side,
    pub gif: String,
}

/// One playable frame.
///
/// Field order is part of the template contract: `index`, `symbol`,
/// `correct`, `wrong`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub index: usize,
    pub symbol: Symbol,
    pub correct: Choice,
    pub wrong: Choice,
}

impl Step {
    /// Name of this step's copied main gif, e.g. `LEFT_3.gif`.
    pub fn frame_file_name(&self) -> String {
        frame_file_name(&self.correct.gif, self.index)
    }
}

/// Steps of one run; the victory frame is implied after the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Step>);

impl Sequence {
    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A main gif copied into the copies directory for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFrame {
    pub index: usize,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// `<basename>_<index>.gif`
pub fn frame_file_name(basename: &str, index: usize) -> String {
    format!("{}_{}.gif", basename, index)
}

/// Neutral pairing for plain trunk segments: chop left.
const NEUTRAL_SIDE: Side = Side::Left;

/// Stands in for the symbol after the final `N` when naming the last window.
const VICTORY_LOOKAHEAD: Symbol = Symbol::BranchLeft;

/// Main and death basenames for the window starting at `index`.
///
/// `index` must leave at least one symbol after it.
fn window_gifs(symbols: &[Symbol], index: usize) -> (String, String) {
    let current = symbols[index];
    let next = symbols[index + 1];
    let after = symbols.get(index + 2).copied().unwrap_or(VICTORY_LOOKAHEAD);
    let main = format!("{}{}{}", current, next, after);
    let death = if current.is_branch() {
        format!("{}{}_DEATH", current, next)
    } else {
        format!("{}_DEATH", main)
    };
    (main, death)
}

/// Derive one step per symbol, excluding the final (victory) position.
///
/// A branch on one side makes that side correct; the opposite side dies.
/// `N` always uses the neutral pairing. Gif names follow `assets.naming`.
pub fn build_sequence(tree: &TreeString, assets: &AssetNames) -> Sequence {
    let symbols = tree.symbols();
    let steps = symbols[..symbols.len() - 1]
        .iter()
        .enumerate()
        .map(|(index, &symbol)| {
            let (side, main_gif) = match symbol {
                Symbol::BranchLeft => (Side::Left, assets.main_for(Side::Left)),
                Symbol::BranchRight => (Side::Right, assets.main_for(Side::Right)),
                Symbol::NoBranch => (NEUTRAL_SIDE, assets.main_neutral.as_str()),
            };
            let wrong_side = side.opposite();
            let (correct_gif, wrong_gif) = match assets.naming {
                FrameNaming::Symbol => (
                    main_gif.to_string(),
                    assets.death_for(wrong_side).to_string(),
                ),
                FrameNaming::Window => window_gifs(symbols, index),
            };
            Step {
                index,
                symbol,
                correct: Choice {
                    button: side,
                    gif: correct_gif,
                },
                wrong: Choice {
                    button: wrong_side,
                    gif: wrong_gif,
                },
            }
        })
        .collect();
    Sequence(steps)
}
