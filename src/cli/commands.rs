//! Subcommands and their arguments

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level gradeshape commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compress a grade to the shape described by a report configuration
    Compress(CompressArgs),

    /// Flatten a grade to a single mark
    Flatten(FlattenArgs),

    /// Show the merged structure of one or more grades
    Shape(ShapeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CompressArgs {
    /// Grade file (JSON)
    pub grade: PathBuf,

    /// Report configuration (TOML) naming the target leaf paths
    #[arg(long, short)]
    pub target: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct FlattenArgs {
    /// Grade file (JSON)
    pub grade: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ShapeArgs {
    /// Grade files (JSON)
    #[arg(required = true)]
    pub grades: Vec<PathBuf>,

    /// Write the merged shape as a report configuration
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Report name stored with --save
    #[arg(long, requires = "save")]
    pub name: Option<String>,
}
