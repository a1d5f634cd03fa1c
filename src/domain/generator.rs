//! Random tree generation
//!
//! A constrained-choice loop: the eligible symbols at each position depend
//! only on the previous symbol, so no backtracking is ever needed.

use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{
    build_sequence, AssetNames, DomainError, DomainResult, Sequence, Symbol, TreeString,
};

/// Shape of the generated trunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreePattern {
    /// After `N`, pick uniformly among `N`, `L` and `R`.
    #[default]
    Uniform,
    /// After `N`, always pick a branch: `N L N R N ...`.
    Alternating,
}

impl FromStr for TreePattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(TreePattern::Uniform),
            "alternating" => Ok(TreePattern::Alternating),
            other => Err(format!(
                "unknown tree pattern {:?} (expected uniform or alternating)",
                other
            )),
        }
    }
}

impl TreePattern {
    fn eligible_after(self, previous: Symbol) -> &'static [Symbol] {
        const AFTER_BRANCH: &[Symbol] = &[Symbol::NoBranch];
        const ANY: &[Symbol] = &[Symbol::NoBranch, Symbol::BranchLeft, Symbol::BranchRight];
        const BRANCHES: &[Symbol] = &[Symbol::BranchLeft, Symbol::BranchRight];

        if previous.is_branch() {
            return AFTER_BRANCH;
        }
        match self {
            TreePattern::Uniform => ANY,
            TreePattern::Alternating => BRANCHES,
        }
    }
}

/// Generate a random tree of `length` symbols.
///
/// Positions `0` and `length - 1` are always `N`. Fails with
/// [`DomainError::InvalidLength`] when `length < 2`.
pub fn generate_tree_string<R: Rng + ?Sized>(
    length: usize,
    pattern: TreePattern,
    rng: &mut R,
) -> DomainResult<TreeString> {
    if length < TreeString::MIN_LENGTH {
        return Err(DomainError::InvalidLength { length });
    }

    let mut symbols = Vec::with_capacity(length);
    symbols.push(Symbol::NoBranch);
    for _ in 1..length - 1 {
        let previous = symbols.last().copied().unwrap_or(Symbol::NoBranch);
        let next = pattern
            .eligible_after(previous)
            .choose(rng)
            .copied()
            .unwrap_or(Symbol::NoBranch);
        symbols.push(next);
    }
    symbols.push(Symbol::NoBranch);

    TreeString::new(symbols)
}

/// Produces tree strings and turns them into playable sequences.
pub struct SequenceGenerator<R> {
    rng: R,
    pattern: TreePattern,
}

impl SequenceGenerator<StdRng> {
    /// Reproducible generator: the same seed yields the same trees.
    pub fn seeded(seed: u64, pattern: TreePattern) -> Self {
        Self::new(StdRng::seed_from_u64(seed), pattern)
    }
}

impl<R: Rng> SequenceGenerator<R> {
    pub fn new(rng: R, pattern: TreePattern) -> Self {
        Self { rng, pattern }
    }

    pub fn generate_tree_string(&mut self, length: usize) -> DomainResult<TreeString> {
        let tree = generate_tree_string(length, self.pattern, &mut self.rng)?;
        debug!("generate_tree_string: length={}, tree={}", length, tree);
        Ok(tree)
    }

    pub fn build_sequence(&self, tree: &TreeString, assets: &AssetNames) -> Sequence {
        build_sequence(tree, assets)
    }
}
