//! # API Module
//!
//! The boundary handed to an external renderer: per-identity grids with
//! resolved colors and labels. Rendering itself (SVG, HTML, terminal) lives
//! outside this crate.

pub mod types;

pub use types::*;
