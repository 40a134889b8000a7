use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use std::path::PathBuf;

/// Scaffold commit conventions, changelog scripts and git hooks into a JavaScript project.
#[derive(Debug, Parser)]
#[command(name = "commition", version, about)]
struct Cli {
    /// Converter to apply; prompts for one when omitted
    #[arg(value_name = "CONVERTER")]
    input: Vec<String>,

    /// Skip the clean working tree check and overwrite existing setup
    #[arg(long)]
    force: bool,

    /// Also install lint-staged and run it from a pre-commit hook
    #[arg(long)]
    lint_staged: bool,

    /// Path to the KDL settings file (default: ./commition.kdl when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> miette::Result<()> {
    let matches = Cli::command()
        .after_help(commition::converter_help())
        .get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    commition::init_logging(cli.verbose);
    commition::run(&commition::RunOptions {
        input: cli.input,
        force: cli.force,
        lint_staged: cli.lint_staged,
        config: cli.config,
    })?;
    Ok(())
}
