use std::path::Path;

use super::ConverterContext;
use crate::error::Error;
use crate::manifest::{Indent, ManifestDocument};
use crate::project::MANIFEST_FILE;
use crate::report;

const FILE_NAME: &str = ".editorconfig";

/// Write `.editorconfig` in the working directory.
///
/// Indentation follows `package.json` when there is one.
pub fn run(ctx: &ConverterContext<'_>) -> Result<(), Error> {
    let path = ctx.cwd().join(FILE_NAME);
    if path.exists() && !ctx.flags.force {
        report::warning(&format!(
            "{FILE_NAME} already exists, skipping. Use --force to overwrite it."
        ));
        return Ok(());
    }

    let indent = project_indent(ctx.cwd());
    std::fs::write(&path, render(&indent)).map_err(|e| Error::io(&path, e))?;
    report::success("installed .editorconfig file.");
    Ok(())
}

fn project_indent(cwd: &Path) -> Indent {
    let manifest = cwd.join(MANIFEST_FILE);
    if !manifest.is_file() {
        return Indent::default();
    }
    match ManifestDocument::read(&manifest) {
        Ok(doc) => doc.indent().clone(),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable manifest");
            Indent::default()
        }
    }
}

fn render(indent: &Indent) -> String {
    let style = if indent.is_tab() {
        "indent_style = tab".to_string()
    } else {
        format!("indent_style = space\nindent_size = {}", indent.width())
    };
    format!(
        "# https://editorconfig.org\n\
         root = true\n\
         \n\
         [*]\n\
         charset = utf-8\n\
         end_of_line = lf\n\
         {style}\n\
         insert_final_newline = true\n\
         trim_trailing_whitespace = true\n\
         \n\
         [*.md]\n\
         trim_trailing_whitespace = false\n\
         \n\
         [Makefile]\n\
         indent_style = tab\n"
    )
}
