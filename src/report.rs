//! User-facing progress lines.
//!
//! These go to stdout and are meant for people, unlike `tracing` output.

use colored::Colorize;

struct Symbols {
    info: &'static str,
    success: &'static str,
    warning: &'static str,
}

const UNICODE: Symbols = Symbols {
    info: "ℹ",
    success: "✔",
    warning: "⚠",
};

const FALLBACK: Symbols = Symbols {
    info: "i",
    success: "√",
    warning: "‼",
};

fn symbols() -> &'static Symbols {
    if unicode_supported() {
        &UNICODE
    } else {
        &FALLBACK
    }
}

/// Non-Windows terminals are assumed to render Unicode; on Windows only the
/// terminals known to do so get it.
fn unicode_supported() -> bool {
    if !cfg!(windows) {
        return true;
    }
    let var = |name: &str| std::env::var(name).ok();
    var("CI").is_some()
        || var("WT_SESSION").is_some()
        || var("TERM_PROGRAM").as_deref() == Some("vscode")
        || matches!(var("TERM").as_deref(), Some("xterm-256color" | "alacritty"))
}

pub fn banner(title: &str) {
    let line = "─".repeat(title.chars().count() + 4);
    println!();
    println!("  {}", line.blue());
    println!("  {}", format!("  {title}  ").bright_blue().bold());
    println!("  {}", line.blue());
    println!();
}

pub fn success(message: &str) {
    println!("{} {}", symbols().success.green(), message.bright_magenta());
}

pub fn info(message: &str) {
    println!("{} {}", symbols().info.blue(), message);
}

/// An advisory condition: something already exists or is being overwritten.
pub fn warning(message: &str) {
    println!("{} {}", symbols().warning.yellow(), message.bright_yellow());
}
