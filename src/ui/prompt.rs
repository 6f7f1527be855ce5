//! Interactive input helpers: confirmations, multi-line text, external editor.

use super::messages::warning;
use crate::errors::{AppError, AppResult};
use std::io::{self, BufRead, Write};
use std::process::Command;

/// Line that ends a multi-line text entry.
pub const END_OF_TEXT: &str = ".";

/// Ask a yes/no confirmation from the user
pub fn ask_confirmation<R: BufRead>(input: &mut R, prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    match input.read_line(&mut s) {
        Ok(n) if n > 0 => matches!(s.trim().to_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}

/// Read lines until a line containing only `.` (or EOF).
pub fn read_multiline<R: BufRead>(input: &mut R) -> AppResult<String> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line == END_OF_TEXT {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines.join("\n"))
}

/// Editor to use: requested one, else $VISUAL / $EDITOR, else a platform default.
pub fn pick_editor(requested: Option<&str>) -> String {
    requested
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

/// Let the user edit `text` in an external editor and return the result.
pub fn edit_in_editor(text: &str, editor: Option<&str>) -> AppResult<String> {
    let scratch = |e: std::io::Error| AppError::Config(format!("editor scratch file: {e}"));

    let mut tmp = tempfile::Builder::new()
        .prefix("rcopywriter-")
        .suffix(".txt")
        .tempfile()
        .map_err(scratch)?;
    tmp.write_all(text.as_bytes()).map_err(scratch)?;
    tmp.flush().map_err(scratch)?;

    let editor = pick_editor(editor);
    let status = Command::new(&editor)
        .arg(tmp.path())
        .status()
        .map_err(|e| AppError::Config(format!("cannot start editor '{editor}': {e}")))?;
    if !status.success() {
        return Err(AppError::Config(format!("editor '{editor}' exited with {status}")));
    }

    let edited = std::fs::read_to_string(tmp.path()).map_err(scratch)?;
    Ok(edited.trim_end_matches('\n').to_string())
}
