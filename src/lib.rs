pub mod command;
pub mod config;
pub mod converter;
pub mod error;
pub mod git;
pub mod manifest;
pub mod project;

pub(crate) mod cli;
pub(crate) mod report;

pub use cli::RunOptions;
pub use error::Error;

/// Run the tool for the parsed command line.
///
/// This bridges the binary crate (`main.rs`) to the library without exposing
/// `cli` internals. Embedders should call [`converter::dispatch`] directly.
pub fn run(options: &RunOptions) -> Result<(), Error> {
    cli::run::execute(options)
}

/// Install the stderr `tracing` subscriber; `verbose` counts `-v` flags.
pub fn init_logging(verbose: u8) {
    cli::logging::init(verbose)
}

/// Converter list for `--help`.
pub fn converter_help() -> String {
    let mut help = String::from("Converters:\n");
    for line in converter::choice_labels() {
        help.push_str("  ");
        help.push_str(&line);
        help.push('\n');
    }
    help
}
