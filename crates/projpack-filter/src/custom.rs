//! Include/exclude token matching.
//!
//! Tokens are short and glob-free. A token's shape decides how it is
//! compared, tried in this order:
//!
//! 1. `*.ext`: the path's extension equals `.ext`
//! 2. `name.ext` (exactly one dot, both sides non-blank): the file name equals the token
//! 3. anything else: some `/`-separated segment equals the token
//!
//! All comparisons are case-insensitive.
//!
//! A token that has the `name.ext` shape is never compared against directory
//! segments, so `v1.2` will not match `v1.2/notes.txt`.

/// How a token is compared against a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternShape<'a> {
    /// `*.ext`; holds `.ext`.
    Extension(&'a str),
    /// `name.ext`; compared to the last segment.
    FileName(&'a str),
    /// Compared to every segment.
    Segment(&'a str),
}

impl<'a> PatternShape<'a> {
    /// Decide which tier `pattern` belongs to.
    pub fn classify(pattern: &'a str) -> Self {
        if pattern.starts_with("*.") {
            return PatternShape::Extension(&pattern[1..]);
        }

        let mut parts = pattern.split('.');
        let looks_like_file = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(ext), None) => !name.trim().is_empty() && !ext.trim().is_empty(),
            _ => false,
        };

        if looks_like_file {
            PatternShape::FileName(pattern)
        } else {
            PatternShape::Segment(pattern)
        }
    }

    fn matches(self, path: &str) -> bool {
        match self {
            PatternShape::Extension(ext) => eq_ignore_case(extension(file_name(path)), ext),
            PatternShape::FileName(name) => eq_ignore_case(file_name(path), name),
            PatternShape::Segment(seg) => path.split('/').any(|s| eq_ignore_case(s, seg)),
        }
    }
}

/// Does `pattern` match `path`?
pub fn matches(path: &str, pattern: &str) -> bool {
    PatternShape::classify(pattern).matches(&crate::normalize(path))
}

/// Does any of `patterns` match `path`?
pub fn matches_any<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    let path = crate::normalize(path);
    patterns
        .iter()
        .any(|p| PatternShape::classify(p.as_ref()).matches(&path))
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        a.eq_ignore_ascii_case(b)
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension including the leading dot, or `""`.
///
/// A dot in last position yields no extension; a leading dot counts
/// (`.gitignore` has extension `.gitignore`).
fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) if idx + 1 < name.len() => &name[idx..],
        _ => "",
    }
}
