use std::borrow::Cow;
use std::collections::HashMap;
use std::io::BufRead;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{Error, Result};

static SINGLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A'(.*)'\z").unwrap());
static DOUBLE_QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\A"(.*)"\z"#).unwrap());
static ESCAPE_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\.").unwrap());
static UNESCAPE_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\([^$])").unwrap());
static EXPORT_TRIM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?:export\s+)?(.*?)\s*$").unwrap());
static VAR_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\\)?(\$)(\()?\{?([A-Z0-9_]+)?\}?").unwrap());

/// Parses one dotenv document into a fresh mapping.
///
/// Later lines overwrite earlier ones for the same key. Variable
/// references only see keys assigned on earlier lines of the same
/// document, so forward references expand to the empty string.
pub fn parse<R: BufRead>(reader: R) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    parse_into(reader, &mut vars)?;
    Ok(vars)
}

/// Parses one dotenv document into a caller-supplied mapping.
///
/// On [`Error::Format`] the mapping keeps every assignment made before
/// the failing line, which lets the caller decide whether to use the
/// partial result. A read failure aborts before anything is written.
///
/// Variable references are resolved against `vars` as it grows, so a
/// pre-populated mapping takes part in interpolation.
pub fn parse_into<R: BufRead>(reader: R, vars: &mut HashMap<String, String>) -> Result<()> {
    let lines = reader.lines().collect::<std::io::Result<Vec<String>>>()?;

    for (index, line) in lines.iter().enumerate() {
        if is_ignored_line(line) {
            continue;
        }

        let Some((key, value)) = parse_line(line, vars) else {
            return Err(Error::Format {
                lineno: index + 1,
                line: line.clone(),
            });
        };

        vars.insert(key, value);
    }

    Ok(())
}

/// A line is ignored iff it is blank or a comment after trimming.
fn is_ignored_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Returns `None` when the line has no `=` or `:` to split on.
fn parse_line(line: &str, vars: &HashMap<String, String>) -> Option<(String, String)> {
    let line = strip_comments(line);
    let (raw_key, raw_value) = split_key_value(&line)?;

    let key = EXPORT_TRIM.replace(raw_key, "${1}").into_owned();
    let value = decode_value(raw_value, vars);

    Some((key, value))
}

/// Drops a trailing `# ...` comment but keeps hashes inside quoted
/// spans.
///
/// Walks the `#`-split segments tracking an open-quote flag; a segment
/// containing exactly one `"` or exactly one `'` toggles it. This is a
/// heuristic, not a quote-aware tokenizer: a stray unbalanced quote
/// outside any real quoted field can misclassify the rest of the line.
fn strip_comments(line: &str) -> Cow<'_, str> {
    if !line.contains('#') {
        return Cow::Borrowed(line);
    }

    let mut quote_open = false;
    let mut kept: Vec<&str> = Vec::new();

    for segment in line.split('#') {
        if segment.matches('"').count() == 1 || segment.matches('\'').count() == 1 {
            if quote_open {
                quote_open = false;
                kept.push(segment);
            } else {
                quote_open = true;
            }
        }

        if kept.is_empty() || quote_open {
            kept.push(segment);
        }
    }

    Cow::Owned(kept.join("#"))
}

/// Splits on the first `:` when it precedes the first `=` (YAML-style
/// line), otherwise on the first `=`.
fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let first_equals = line.find('=');
    let first_colon = line.find(':');

    let split_at = match (first_equals, first_colon) {
        (Some(equals), Some(colon)) if colon < equals => colon,
        (None, Some(colon)) => colon,
        (Some(equals), _) => equals,
        (None, None) => return None,
    };

    Some((&line[..split_at], &line[split_at + 1..]))
}

fn decode_value(raw: &str, vars: &HashMap<String, String>) -> String {
    let trimmed = raw.trim_matches(' ');

    if trimmed.len() <= 1 {
        return trimmed.to_owned();
    }

    let single_quoted = SINGLE_QUOTED.is_match(trimmed);
    let double_quoted = DOUBLE_QUOTED.is_match(trimmed);

    // The wrap must be anchored on both ends; `KEY="value` keeps its
    // leading quote.
    let mut value = if single_quoted || double_quoted {
        trimmed[1..trimmed.len() - 1].to_owned()
    } else {
        trimmed.to_owned()
    };

    if double_quoted {
        value = decode_escapes(&value);
    }

    if !single_quoted {
        value = expand_variables(&value, vars);
    }

    value
}

/// Escape decoding for double-quoted values: `\n` and `\r` become real
/// line breaks, then every other pair collapses to its second character.
/// `\$` survives both passes so the interpolator can see it.
fn decode_escapes(value: &str) -> String {
    let value = ESCAPE_PAIR.replace_all(value, |caps: &Captures| match &caps[0][1..] {
        "n" => "\n".to_owned(),
        "r" => "\r".to_owned(),
        _ => caps[0].to_owned(),
    });

    UNESCAPE_CHAR.replace_all(&value, "${1}").into_owned()
}

/// Expands `$NAME` and `${NAME}` against the given mapping.
///
/// A reference escaped with a backslash, or followed by `(` (command
/// substitution is not supported), loses that first character and is
/// otherwise left alone. Unknown names expand to the empty string. A
/// bare `$` or `${}` passes through unchanged.
fn expand_variables(text: &str, vars: &HashMap<String, String>) -> String {
    VAR_REFERENCE
        .replace_all(text, |caps: &Captures| {
            if caps.get(1).is_some() || caps.get(3).is_some() {
                return caps[0][1..].to_owned();
            }

            if let Some(name) = caps.get(4) {
                return vars.get(name.as_str()).cloned().unwrap_or_default();
            }

            caps[0].to_owned()
        })
        .into_owned()
}
