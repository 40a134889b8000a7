use super::RunOptions;
use crate::command::SystemRunner;
use crate::config::Settings;
use crate::converter::{self, ConverterContext, Flags, TerminalPrompt};
use crate::error::Error;
use crate::{git, report};

const BANNER: &str = "COMMITION";

/// One full run: safety gate, converter selection, then the converter itself.
pub(crate) fn execute(options: &RunOptions) -> Result<(), Error> {
    report::banner(BANNER);

    let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
    let runner = SystemRunner;
    git::check_repository_clean(&runner, &cwd, options.force)?;

    let converter = converter::resolve(
        options.input.first().map(String::as_str),
        &TerminalPrompt,
    )?;
    let settings = Settings::discover(options.config.as_deref(), &cwd)?;
    tracing::debug!(cwd = %cwd.display(), input = ?options.input, "starting converter");
    report::info(&format!("Applying the {} converter.", converter.id));

    let ctx = ConverterContext {
        cwd,
        input: &options.input,
        flags: Flags {
            force: options.force,
            lint_staged: options.lint_staged,
        },
        settings: &settings,
        runner: &runner,
    };
    converter::dispatch(converter, &ctx)
}
