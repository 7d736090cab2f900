//! Path string parser.
//!
//! Parsing runs in three passes: the text is split into recursive-descent groups on top-level
//! `..`, each group is split into compound segments on top-level `.`, and each compound segment
//! (such as `dimensions[2][3]`) is tokenised into one or more [`PathSegment`]s.

use tracing::trace;

use super::{JsonPath, PathError, PathSegment, RecursiveDescentSegment, UnionEntry};

/// Parses a path string.
///
/// The empty string and `$` both denote the root.
///
/// # Errors
///
/// Returns [`PathError::InvalidSegment`] for malformed segments and [`PathError::Unbalanced`] for
/// unterminated brackets or quotes.
///
/// ```
/// # use dynpath::path::{parse, PathSegment, UnionEntry};
/// let path = parse("$.a[1,'b']")?;
/// let segments: Vec<_> = path.segments().cloned().collect();
/// assert_eq!(segments, vec![
///     PathSegment::Root,
///     PathSegment::Key("a".into()),
///     PathSegment::Union(vec![UnionEntry::Index(1), UnionEntry::Key("b".into())]),
/// ]);
/// # Ok::<(), dynpath::path::PathError>(())
/// ```
pub fn parse(text: &str) -> Result<JsonPath, PathError> {
    if text.is_empty() {
        return Ok(JsonPath::from_groups(Vec::new()));
    }

    let mut groups = Vec::new();
    for (g, group_text) in split_top_level(text, text, "..")?.into_iter().enumerate() {
        if group_text.is_empty() {
            if g == 0 {
                groups.push(RecursiveDescentSegment::default());
                continue;
            }
            return Err(PathError::invalid_segment(
                text,
                "..",
                "recursive descent needs a target",
            ));
        }

        let mut segments = Vec::new();
        for (c, compound) in split_top_level(text, group_text, ".")?.into_iter().enumerate() {
            if compound.is_empty() {
                return Err(PathError::invalid_segment(text, group_text, "empty segment"));
            }
            let allow_root = g == 0 && c == 0;
            tokenize_compound(text, compound, allow_root, &mut segments)?;
        }
        groups.push(RecursiveDescentSegment::new(segments));
    }

    trace!(path = text, groups = groups.len(), "parsed path");
    Ok(JsonPath::from_groups(groups))
}

/// Splits `part` on `sep` wherever it occurs outside brackets and quotes.
fn split_top_level<'a>(path: &str, part: &'a str, sep: &str) -> Result<Vec<&'a str>, PathError> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    let mut i = 0;

    while i < part.len() {
        let Some(c) = part[i..].chars().next() else {
            break;
        };
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            i += c.len_utf8();
            continue;
        }
        match c {
            '\'' | '"' if depth > 0 => quote = Some(c),
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1).ok_or(PathError::Unbalanced {
                    path: path.to_string(),
                    delimiter: ']',
                })?;
            }
            _ if depth == 0 && part[i..].starts_with(sep) => {
                pieces.push(&part[start..i]);
                i += sep.len();
                start = i;
                continue;
            }
            _ => {}
        }
        i += c.len_utf8();
    }

    if let Some(q) = quote {
        return Err(PathError::Unbalanced {
            path: path.to_string(),
            delimiter: q,
        });
    }
    if depth > 0 {
        return Err(PathError::Unbalanced {
            path: path.to_string(),
            delimiter: '[',
        });
    }
    pieces.push(&part[start..]);
    Ok(pieces)
}

/// Tokenises a compound segment such as `name[0]['x']` into its segments.
fn tokenize_compound(
    path: &str,
    compound: &str,
    allow_root: bool,
    out: &mut Vec<PathSegment>,
) -> Result<(), PathError> {
    let bare_end = compound.find('[').unwrap_or(compound.len());
    let bare = &compound[..bare_end];
    if !bare.is_empty() {
        out.push(parse_bare(path, bare, allow_root)?);
    }

    let mut rest = &compound[bare_end..];
    while !rest.is_empty() {
        if !rest.starts_with('[') {
            return Err(PathError::invalid_segment(
                path,
                compound,
                "unexpected text after ']'",
            ));
        }
        let close = find_closing_bracket(rest).ok_or(PathError::Unbalanced {
            path: path.to_string(),
            delimiter: '[',
        })?;
        out.push(parse_bracket(path, &rest[1..close])?);
        rest = &rest[close + 1..];
    }
    Ok(())
}

fn parse_bare(path: &str, bare: &str, allow_root: bool) -> Result<PathSegment, PathError> {
    match bare {
        "$" if allow_root => Ok(PathSegment::Root),
        "$" => Err(PathError::invalid_segment(
            path,
            bare,
            "'$' may only start a path",
        )),
        "*" => Ok(PathSegment::Wildcard),
        _ if bare.contains(['\'', '"', ']', ' ']) => Err(PathError::invalid_segment(
            path,
            bare,
            "keys containing quotes, spaces or brackets must use ['...'] notation",
        )),
        _ => Ok(PathSegment::Key(bare.to_string())),
    }
}

/// Finds the byte offset of the `]` closing the bracket that opens `text`.
fn find_closing_bracket(text: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (i, c) in text.char_indices().skip(1) {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == ']' => return Some(i),
            None => {}
        }
    }
    None
}

/// Parses the contents of one `[...]` selector.
fn parse_bracket(path: &str, content: &str) -> Result<PathSegment, PathError> {
    let trimmed = content.trim();
    let invalid = |reason: &str| PathError::invalid_segment(path, format!("[{content}]"), reason);

    if trimmed.is_empty() {
        return Err(invalid("empty selector"));
    }
    if trimmed == "*" {
        return Ok(PathSegment::Wildcard);
    }

    let entries = split_outside_quotes(trimmed, ',');
    if entries.len() > 1 {
        let union = entries
            .into_iter()
            .map(|entry| {
                let entry = entry.trim();
                let parsed = if entry.starts_with(['\'', '"']) {
                    unquote(entry).map(UnionEntry::Key)
                } else {
                    entry.parse::<usize>().ok().map(UnionEntry::Index)
                };
                parsed.ok_or_else(|| invalid("union entries must be quoted keys or indices"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(PathSegment::Union(union));
    }

    if trimmed.starts_with(['\'', '"']) {
        return unquote(trimmed)
            .map(PathSegment::Key)
            .ok_or_else(|| invalid("malformed quoted key"));
    }

    let parts = split_outside_quotes(trimmed, ':');
    if parts.len() > 1 {
        if parts.len() > 3 {
            return Err(invalid("a slice has at most three parts"));
        }
        let mut bounds = [None; 3];
        for (slot, part) in bounds.iter_mut().zip(&parts) {
            let part = part.trim();
            if !part.is_empty() {
                *slot = Some(
                    part.parse::<i64>()
                        .map_err(|_| invalid("slice bounds must be integers"))?,
                );
            }
        }
        let [start, end, step] = bounds;
        if start.is_none() && end.is_none() && step.is_none() {
            return Ok(PathSegment::Wildcard);
        }
        return Ok(PathSegment::Slice { start, end, step });
    }

    match trimmed.parse::<i64>() {
        Ok(index) if index >= 0 => Ok(PathSegment::Index(index as usize)),
        Ok(_) => Err(invalid("negative index; use a slice such as [-1:]")),
        Err(_) => Err(invalid("expected an index, slice, union, '*' or quoted key")),
    }
}

fn split_outside_quotes(text: &str, sep: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match quote {
            Some(_) if escaped => escaped = false,
            Some(_) if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == sep => {
                pieces.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            None => {}
        }
    }
    pieces.push(&text[start..]);
    pieces
}

/// Strips matching quotes and resolves `\` escapes. Returns `None` unless the whole text is one
/// quoted string.
fn unquote(text: &str) -> Option<String> {
    let mut chars = text.chars();
    let quote = chars.next()?;
    let mut out = String::new();
    let mut escaped = false;
    let mut closed = false;
    for c in chars {
        if closed {
            return None;
        }
        if escaped {
            out.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            closed = true;
        } else {
            out.push(c);
        }
    }
    closed.then_some(out)
}
