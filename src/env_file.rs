//! Loading of dotenv-style files into the process environment

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

/// Parse `KEY=VALUE` lines, skipping blanks and `#` comments
pub fn parse(content: &str) -> Vec<(String, String)> {
    let mut vars = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            vars.push((key.to_string(), parse_value(value.trim())));
        }
    }
    vars
}

/// Load `path` into the environment. Variables that are already set win.
pub fn load(path: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read env file {}", path.display()))?;

    let mut count = 0;
    for (key, value) in parse(&content) {
        if std::env::var_os(&key).is_some() {
            debug!("Keeping existing value for {}", key);
            continue;
        }
        if key.contains('\0') || value.contains('\0') {
            anyhow::bail!("Invalid entry {} in env file {}", key, path.display());
        }
        std::env::set_var(&key, value);
        count += 1;
    }
    Ok(count)
}

/// Quoted values keep everything up to the closing quote; double quotes also
/// expand `\n` and `\"`. Unquoted values end at a whitespace-led `#`.
fn parse_value(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix('"') {
        if let Some(end) = closing_quote(rest, '"') {
            return unescape(&rest[..end]);
        }
    } else if let Some(rest) = raw.strip_prefix('\'') {
        if let Some(end) = closing_quote(rest, '\'') {
            return rest[..end].to_string();
        }
    }

    let value = match raw.find(" #").or_else(|| raw.find("\t#")) {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    value.trim_end().to_string()
}

fn closing_quote(s: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices() {
        match c {
            '\\' if quote == '"' && !escaped => escaped = true,
            c if c == quote && !escaped => return Some(i),
            _ => escaped = false,
        }
    }
    None
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
