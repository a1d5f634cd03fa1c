//! Tree symbols and the validated tree string

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Tree state at one position of the trunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    #[serde(rename = "N")]
    NoBranch,
    #[serde(rename = "L")]
    BranchLeft,
    #[serde(rename = "R")]
    BranchRight,
}

impl Symbol {
    pub fn is_branch(self) -> bool {
        !matches!(self, Symbol::NoBranch)
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::NoBranch => 'N',
            Symbol::BranchLeft => 'L',
            Symbol::BranchRight => 'R',
        }
    }

    pub fn from_char(c: char) -> DomainResult<Self> {
        match c {
            'N' => Ok(Symbol::NoBranch),
            'L' => Ok(Symbol::BranchLeft),
            'R' => Ok(Symbol::BranchRight),
            other => Err(DomainError::InvalidSymbol(other)),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Button identifier: the side the player chops from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Ordered symbols of one game run.
///
/// Always starts and ends with [`Symbol::NoBranch`] and never holds two
/// adjacent branch symbols. Construction validates both rules, so every
/// `TreeString` in circulation is playable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeString(Vec<Symbol>);

impl TreeString {
    /// Minimum length able to start and end with `NoBranch`.
    pub const MIN_LENGTH: usize = 2;

    pub fn new(symbols: Vec<Symbol>) -> DomainResult<Self> {
        if symbols.len() < Self::MIN_LENGTH {
            return Err(DomainError::InvalidLength {
                length: symbols.len(),
            });
        }
        if symbols.first() != Some(&Symbol::NoBranch) {
            return Err(DomainError::InvalidTree {
                reason: "first symbol must be N".to_string(),
            });
        }
        if symbols.last() != Some(&Symbol::NoBranch) {
            return Err(DomainError::InvalidTree {
                reason: "last symbol must be N".to_string(),
            });
        }
        if let Some(i) = symbols
            .windows(2)
            .position(|pair| pair[0].is_branch() && pair[1].is_branch())
        {
            return Err(DomainError::InvalidTree {
                reason: format!("adjacent branches at positions {} and {}", i, i + 1),
            });
        }
        Ok(Self(symbols))
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TreeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}

impl FromStr for TreeString {
    type Err = DomainError;

    /// Parse the character form, e.g. `"NLNRN"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols = s
            .trim()
            .chars()
            .map(Symbol::from_char)
            .collect::<DomainResult<Vec<_>>>()?;
        Self::new(symbols)
    }
}
