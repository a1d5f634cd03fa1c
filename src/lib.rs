//! Static HTML Timberman page generator.
//!
//! Generates a random tree, maps each position to a correct and a wrong
//! button with their gif frames, copies the frames, and renders a page that
//! plays the game with popovers only.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod util;
