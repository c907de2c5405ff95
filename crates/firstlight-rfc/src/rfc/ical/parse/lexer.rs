//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Handles line unfolding and splitting content lines into name, parameters
//! and value.

/// Splits feed text into logical lines, merging folded continuations.
///
/// Accepts CRLF, bare CR and bare LF line endings. Lines starting with SP/HTAB
/// are continuations of the previous line; per RFC 5545 §3.1 unfolding removes
/// the line break and that single whitespace character (no space is inserted).
/// Blank lines carry no content and are dropped.
#[must_use]
pub fn unfold(input: &str) -> Vec<String> {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");
    let mut lines: Vec<String> = Vec::new();

    for line in normalized.split('\n') {
        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some(prev) = lines.last_mut() {
                prev.push_str(continuation);
            } else {
                lines.push(continuation.to_string());
            }
        } else if !line.is_empty() {
            lines.push(line.to_string());
        }
    }

    lines
}

/// One content line split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine<'a> {
    /// Property name, as written.
    pub name: &'a str,
    /// Raw parameter text between the name and the value colon, without the
    /// leading `;`. Empty when the property has no parameters.
    pub params: &'a str,
    /// Everything after the value colon.
    pub value: &'a str,
}

impl ContentLine<'_> {
    /// Returns `true` if the property name matches, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Returns the value of the named parameter, ignoring ASCII case on the
    /// name. Surrounding double quotes are stripped.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        split_params(self.params).find_map(|param| {
            let (key, value) = param.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case(name)
                .then(|| value.trim().trim_matches('"'))
        })
    }
}

/// Splits `name *(";" param) ":" value` into its parts.
///
/// Colons and semicolons inside double-quoted parameter values are not treated
/// as separators. Returns `None` when the line has no value colon or no name.
#[must_use]
pub fn split_content_line(line: &str) -> Option<ContentLine<'_>> {
    let mut in_quotes = false;
    let mut name_end = None;

    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes && name_end.is_none() => name_end = Some(i),
            ':' if !in_quotes => {
                let name_end = name_end.unwrap_or(i);
                let name = &line[..name_end];
                if name.is_empty() {
                    return None;
                }
                let params = if name_end < i {
                    &line[name_end + 1..i]
                } else {
                    ""
                };
                return Some(ContentLine {
                    name,
                    params,
                    value: &line[i + 1..],
                });
            }
            _ => {}
        }
    }

    None
}

/// Iterates `;`-separated parameters, honouring double quotes.
fn split_params(params: &str) -> impl Iterator<Item = &str> {
    let mut in_quotes = false;
    params
        .split(move |c: char| {
            if c == '"' {
                in_quotes = !in_quotes;
            }
            c == ';' && !in_quotes
        })
        .filter(|param| !param.is_empty())
}
