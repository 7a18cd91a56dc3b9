use regex::Regex;
use std::sync::LazyLock;

/// Conventional header: optional `[tag] ` prefix, then `type(scope):`.
/// Group 1 is the type, group 2 the scope including parentheses.
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\[.+\]\s)??(\w+)(\(\S+\))?:").expect("conventional header regex")
});

/// Type and scope extracted from a conventional commit header line
#[derive(Debug, PartialEq, Eq)]
pub struct ConventionalHeader<'a> {
    pub r#type: &'a str,
    pub scope: Option<&'a str>,
}

/// Parse the conventional header at the start of a single line.
///
/// Accepts `type: ...`, `type(scope): ...` and `[label] type(scope): ...`.
/// Returns `None` for prose lines.
pub fn parse_header(line: &str) -> Option<ConventionalHeader<'_>> {
    let captures = HEADER_RE.captures(line)?;
    let r#type = captures.get(1)?.as_str();
    let scope = captures.get(2).map(|m| {
        let raw = m.as_str();
        &raw[1..raw.len() - 1]
    });

    Some(ConventionalHeader { r#type, scope })
}

/// Whether the line is shaped like a conventional commit header
pub fn is_conventional(line: &str) -> bool {
    HEADER_RE.is_match(line)
}

/// Remove the conventional header from the line, keeping the description
pub fn strip_header(line: &str) -> String {
    HEADER_RE.replace(line, "").into_owned()
}
