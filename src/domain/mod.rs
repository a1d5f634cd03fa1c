//! Domain layer: tree symbols, generation and step mapping
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod generator;
pub mod sequence;
pub mod symbol;

pub use error::{DomainError, DomainResult};
pub use generator::{generate_tree_string, SequenceGenerator, TreePattern};
pub use sequence::{
    build_sequence, frame_file_name, AssetNames, Choice, CopiedFrame, FrameNaming, Sequence, Step,
};
pub use symbol::{Side, Symbol, TreeString};
