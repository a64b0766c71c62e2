//! Text helpers shared by the Leanpub rules.

use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

/// Fence line around literal blocks
pub const FENCE: &str = "~~~~~~~~";

/// Line marker for asides
pub const ASIDE_MARKER: &str = "A> ";

const TAB_WIDTH: usize = 8;

/// Escaped square brackets left around display math by the parser
static MATH_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[\[\]]").unwrap());

/// Remove the indentation common to all non-blank lines.
///
/// Tabs count as advancing to the next multiple of eight columns.
/// Whitespace-only lines become empty.
pub fn dedent(text: &str) -> String {
    let common = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(indentation)
        .min()
        .unwrap_or(0);

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                strip_columns(line, common)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn indentation(line: &str) -> usize {
    let mut column = 0;
    for c in line.chars() {
        match c {
            ' ' => column += 1,
            '\t' => column = (column / TAB_WIDTH + 1) * TAB_WIDTH,
            _ => break,
        }
    }
    column
}

fn strip_columns(line: &str, columns: usize) -> String {
    let mut column = 0;
    for (i, c) in line.char_indices() {
        if column >= columns {
            return line[i..].to_string();
        }
        match c {
            ' ' => column += 1,
            '\t' => {
                column = (column / TAB_WIDTH + 1) * TAB_WIDTH;
                if column > columns {
                    // Tab straddles the cut: keep the overshoot as spaces
                    return " ".repeat(column - columns) + &line[i + 1..];
                }
            }
            _ => return line[i..].to_string(),
        }
    }
    String::new()
}

/// Frame literal text between fences, dedented, ending in a newline
pub fn fenced(text: &str) -> String {
    let mut body = dedent(text);
    if !body.is_empty() && !body.ends_with('\n') {
        body.push('\n');
    }
    format!("{}\n{}{}", FENCE, body, FENCE)
}

/// Prefix every line of an assembled block, including its first and last
pub fn prefix_lines(block: &str, prefix: &str) -> String {
    block
        .split('\n')
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drop `\[` and `\]` from a math expression
pub fn strip_math_brackets(expression: &str) -> String {
    MATH_BRACKETS.replace_all(expression, "").into_owned()
}

/// Check whether a link path is absolute (`/...` or `~...`)
pub fn is_absolute_path(path: &str) -> bool {
    path.starts_with('/') || path.starts_with('~')
}

/// Expand `~` and resolve `.`/`..` in an absolute path without touching the
/// filesystem
pub fn expand_path(path: &str) -> String {
    let expanded = shellexpand::tilde(path);

    let mut normalized = PathBuf::new();
    for component in Path::new(&*expanded).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized.display().to_string()
}

/// Image target as written to the output: absolute paths expanded, relative
/// ones kept as authored
pub fn resolve_image_path(path: &str) -> String {
    if is_absolute_path(path) {
        expand_path(path)
    } else {
        path.to_string()
    }
}
