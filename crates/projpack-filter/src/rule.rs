//! Gitignore-dialect rules.
//!
//! Each raw line compiles to one anchored, case-insensitive regex:
//!
//! - leading `!` negates the rule
//! - leading `/` anchors it at the scan root (otherwise it may start at any
//!   segment boundary)
//! - trailing `/` makes it a directory rule that shadows everything below
//! - `*` matches within one segment, `?` matches one non-`/` character
//!
//! Matching is done against a path and each of its ancestor directories, so
//! a rule naming a directory also covers the files inside it. Directory rules
//! only ever match through an ancestor, never the candidate file itself.

use regex::{Regex, RegexBuilder};
use tracing::debug;

/// Characters escaped before wildcard substitution.
const ESCAPED: &[char] = &['.', '^', '$', '+', '=', ':', '{', '}', '(', ')', '|', '\\'];

/// Matches zero or more characters within one path segment.
const STAR: &str = "[^/]*";
/// Matches exactly one character within a path segment.
const QUESTION: &str = "[^/]";

const ROOT_PREFIX: &str = "^";
const ANYWHERE_PREFIX: &str = "^(?:.*/)?";
const DIRECTORY_SUFFIX: &str = "(?:/.*)?$";
const EXACT_SUFFIX: &str = "$";

/// A compiled ignore rule.
#[derive(Debug, Clone)]
pub struct IgnoreRule {
    /// Glob body with the `!`, `/` prefix and `/` suffix removed.
    pattern: String,
    negated: bool,
    root_anchored: bool,
    directory_only: bool,
    /// `None` when the expression could not be built; such a rule never matches.
    matcher: Option<Regex>,
}

impl IgnoreRule {
    /// Compile one trimmed, non-empty, non-comment line.
    pub fn compile(line: &str) -> Self {
        let mut body = line;

        let negated = match body.strip_prefix('!') {
            Some(rest) => {
                body = rest;
                true
            }
            None => false,
        };

        let root_anchored = match body.strip_prefix('/') {
            Some(rest) => {
                body = rest;
                true
            }
            None => false,
        };

        let directory_only = match body.strip_suffix('/') {
            Some(rest) => {
                body = rest;
                true
            }
            None => false,
        };

        let expr = to_regex(body, root_anchored, directory_only);
        let matcher = match RegexBuilder::new(&expr).case_insensitive(true).build() {
            Ok(re) => Some(re),
            Err(e) => {
                debug!("Ignore pattern {:?} never matches: {}", line, e);
                None
            }
        };

        Self {
            pattern: body.to_string(),
            negated,
            root_anchored,
            directory_only,
            matcher,
        }
    }

    /// Glob body left after stripping the flags.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// True for `!` rules, which re-include a path.
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// True when the line started with `/`.
    pub fn is_root_anchored(&self) -> bool {
        self.root_anchored
    }

    /// True when the line ended with `/`.
    pub fn is_directory_only(&self) -> bool {
        self.directory_only
    }

    /// The compiled expression, if it built.
    pub fn regex(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }

    /// Does this rule apply to `path` (relative, any separator)?
    pub fn matches(&self, path: &str) -> bool {
        self.matches_normalized(&crate::normalize(path))
    }

    fn matches_normalized(&self, path: &str) -> bool {
        let Some(re) = &self.matcher else {
            return false;
        };

        let ancestor_hit = path
            .match_indices('/')
            .any(|(idx, _)| idx > 0 && re.is_match(&path[..idx]));

        ancestor_hit || (!self.directory_only && re.is_match(path))
    }
}

/// Translate a glob body into a full anchored expression.
fn to_regex(body: &str, root_anchored: bool, directory_only: bool) -> String {
    let mut expr = String::with_capacity(body.len() * 2 + 16);
    expr.push_str(if root_anchored {
        ROOT_PREFIX
    } else {
        ANYWHERE_PREFIX
    });

    let mut buf = [0u8; 4];
    for ch in body.chars() {
        match ch {
            '*' => expr.push_str(STAR),
            '?' => expr.push_str(QUESTION),
            c if ESCAPED.contains(&c) => expr.push_str(&regex::escape(c.encode_utf8(&mut buf))),
            c => expr.push(c),
        }
    }

    expr.push_str(if directory_only {
        DIRECTORY_SUFFIX
    } else {
        EXACT_SUFFIX
    });
    expr
}

/// Last-match-wins fold over `rules`.
///
/// Every rule is evaluated; each match sets the result to `!negated`.
pub fn is_ignored(path: &str, rules: &[IgnoreRule]) -> bool {
    let path = crate::normalize(path);
    rules.iter().fold(false, |ignored, rule| {
        if rule.matches_normalized(&path) {
            !rule.negated
        } else {
            ignored
        }
    })
}

/// An ordered rule list, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    rules: Vec<IgnoreRule>,
}

impl IgnoreRules {
    /// Create an empty rule list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every line, keeping order.
    pub fn compile<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            rules: lines
                .into_iter()
                .map(|line| IgnoreRule::compile(line.as_ref()))
                .collect(),
        }
    }

    /// Is `path` ignored by these rules?
    pub fn is_ignored(&self, path: &str) -> bool {
        is_ignored(path, &self.rules)
    }

    /// Rules in declaration order.
    pub fn as_slice(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(lines: &[&str]) -> IgnoreRules {
        IgnoreRules::compile(lines)
    }

    #[test]
    fn test_compile_flags() {
        let rule = IgnoreRule::compile("!/build/");
        assert!(rule.is_negated());
        assert!(rule.is_root_anchored());
        assert!(rule.is_directory_only());
        assert_eq!(rule.pattern(), "build");

        let rule = IgnoreRule::compile("*.log");
        assert!(!rule.is_negated());
        assert!(!rule.is_root_anchored());
        assert!(!rule.is_directory_only());
        assert_eq!(rule.pattern(), "*.log");
    }

    #[test]
    fn test_compiled_expression_shape() {
        let re = |line: &str| IgnoreRule::compile(line).regex().unwrap().as_str().to_string();

        assert_eq!(re("*.log"), r"^(?:.*/)?[^/]*\.log$");
        assert_eq!(re("/build"), "^build$");
        assert_eq!(re("bin/"), "^(?:.*/)?bin(?:/.*)?$");
        assert_eq!(re("file?.txt"), r"^(?:.*/)?file[^/]\.txt$");
        assert_eq!(re("a+b(c)"), r"^(?:.*/)?a\+b\(c\)$");
    }

    #[test]
    fn test_compile_is_idempotent() {
        let a = IgnoreRule::compile("!/src/*.rs/");
        let b = IgnoreRule::compile("!/src/*.rs/");
        assert_eq!(a.regex().unwrap().as_str(), b.regex().unwrap().as_str());
        assert_eq!(a.pattern(), b.pattern());
    }

    #[test]
    fn test_last_match_wins() {
        let rules = rules(&["bin/", "!bin/special.dll"]);
        assert!(!rules.is_ignored("bin/special.dll"));
        assert!(rules.is_ignored("bin/other.dll"));
    }

    #[test]
    fn test_later_rule_re_ignores() {
        let rules = rules(&["*.dll", "!keep.dll", "keep.dll"]);
        assert!(rules.is_ignored("keep.dll"));
    }

    #[test]
    fn test_negation_without_prior_ignore_is_noop() {
        let rules = rules(&["!readme.md"]);
        assert!(!rules.is_ignored("readme.md"));
        assert!(!rules.is_ignored("src/main.rs"));
    }

    #[test]
    fn test_root_anchoring() {
        let anchored = rules(&["/build"]);
        assert!(anchored.is_ignored("build/x.txt"));
        assert!(!anchored.is_ignored("sub/build/x.txt"));

        let floating = rules(&["build"]);
        assert!(floating.is_ignored("build/x.txt"));
        assert!(floating.is_ignored("sub/build/x.txt"));
    }

    #[test]
    fn test_directory_pattern_shadows_descendants() {
        let rules = rules(&["bin/"]);
        assert!(rules.is_ignored("bin/a.dll"));
        assert!(rules.is_ignored("bin/sub/b.dll"));
        assert!(rules.is_ignored("src/bin/c.dll"));
        assert!(!rules.is_ignored("bin"));
        assert!(!rules.is_ignored("binary/a.dll"));
        assert!(!rules.is_ignored("robin/a.dll"));
        assert!(!rules.is_ignored("bin.txt"));
    }

    #[test]
    fn test_star_stays_within_segment() {
        let rules = rules(&["/folder/*.log"]);
        assert!(rules.is_ignored("folder/anyfile.log"));
        assert!(!rules.is_ignored("folder/nested/anyfile.log"));
    }

    #[test]
    fn test_question_mark_is_single_char() {
        let rules = rules(&["file?.txt"]);
        assert!(rules.is_ignored("file1.txt"));
        assert!(!rules.is_ignored("file12.txt"));
        assert!(!rules.is_ignored("file.txt"));
    }

    #[test]
    fn test_case_insensitive() {
        let rules = rules(&["*.EXE", "Obj/"]);
        assert!(rules.is_ignored("MyApp.exe"));
        assert!(rules.is_ignored("obj/Debug/x.o"));
    }

    #[test]
    fn test_dot_is_literal() {
        let rules = rules(&["a.b"]);
        assert!(rules.is_ignored("a.b"));
        assert!(!rules.is_ignored("axb"));
    }

    #[test]
    fn test_exact_relative_path() {
        let rules = rules(&["obj/temp.txt"]);
        assert!(rules.is_ignored("obj/temp.txt"));
        assert!(rules.is_ignored("nested/obj/temp.txt"));
        assert!(!rules.is_ignored("obj/temp.txt.bak"));
    }

    #[test]
    fn test_backslash_paths_are_normalized() {
        let rules = rules(&["bin/"]);
        assert!(rules.is_ignored(r"bin\Debug\file.dll"));
    }

    #[test]
    fn test_malformed_pattern_never_matches() {
        let rule = IgnoreRule::compile("foo[");
        assert!(rule.regex().is_none());
        assert!(!rule.matches("foo["));
        assert!(!is_ignored("foo[", &[rule]));
    }

    #[test]
    fn test_special_characters_compile() {
        for line in ["a^b", "c$d", "{x}", "(y)", "p|q", "k=v", "dr:ive", r"back\slash"] {
            assert!(IgnoreRule::compile(line).regex().is_some(), "{line}");
        }
        assert!(rules(&["p|q"]).is_ignored("p|q"));
        assert!(!rules(&["p|q"]).is_ignored("p"));
    }

    #[test]
    fn test_empty_rules_ignore_nothing() {
        assert!(!IgnoreRules::new().is_ignored("anything/at/all.txt"));
        assert!(!is_ignored("x", &[]));
    }
}
