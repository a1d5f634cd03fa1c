//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `FileSystem` boundary trait
//! but are themselves concrete structs, not traits.

mod frames;
mod game;
mod render;

pub use frames::FrameService;
pub use game::{GameReport, GameService};
pub use render::{RenderContext, RenderService};
