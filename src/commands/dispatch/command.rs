//! Command trait and context for dispatching commands

use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::commands;
use gradeshape_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    pub fn new(cli: &'a Cli, start: Instant) -> Self {
        Self { cli, start }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}

/// No-op command (when no subcommand is provided)
pub struct NoCommand;

impl Command for NoCommand {
    fn execute(&self, _ctx: &CommandContext) -> Result<()> {
        println!("gradeshape {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Compress detailed grades into coarser report shapes.");
        println!();
        println!("Run `gradeshape --help` for usage information.");
        Ok(())
    }
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let result = match self {
            Commands::Compress(args) => commands::compress::execute(ctx.cli, &args.grade, &args.target),
            Commands::Flatten(args) => commands::flatten::execute(ctx.cli, &args.grade),
            Commands::Shape(args) => commands::shape::execute(
                ctx.cli,
                &args.grades,
                args.save.as_deref(),
                args.name.clone(),
            ),
        };
        debug!(elapsed = ?ctx.start.elapsed(), "execute_command");
        result
    }
}
