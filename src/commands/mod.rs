//! CLI commands for gradeshape

pub mod compress;
pub mod dispatch;
pub mod flatten;
pub mod input;
pub mod shape;
