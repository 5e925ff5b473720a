//! The three-stage filtering pipeline.
//!
//! Stages run in a fixed order: ignore rules, then includes, then excludes.
//! Each stage is a stable filter, so survivors keep their input order.
//! An empty rule or pattern list skips its stage entirely.

use crate::custom::matches_any;
use crate::rule::{is_ignored, IgnoreRule, IgnoreRules};
use tracing::debug;

/// Everything one filtering run needs.
#[derive(Debug, Clone, Default)]
pub struct FilterRequest {
    /// Relative, `/`-separated candidate file paths.
    pub paths: Vec<String>,
    /// Compiled rules in declaration order.
    pub ignore_rules: IgnoreRules,
    /// Keep only paths matching one of these; empty keeps everything.
    pub include_patterns: Vec<String>,
    /// Drop paths matching one of these.
    pub exclude_patterns: Vec<String>,
}

impl FilterRequest {
    /// Run the pipeline over this request's paths.
    pub fn apply(&self) -> FilterResult {
        filter(
            &self.paths,
            self.ignore_rules.as_slice(),
            &self.include_patterns,
            &self.exclude_patterns,
        )
    }
}

/// How many paths were left after each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageCounts {
    pub candidates: usize,
    pub after_ignore: usize,
    pub after_include: usize,
    pub after_exclude: usize,
}

/// Surviving paths, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResult {
    pub paths: Vec<String>,
    pub counts: StageCounts,
}

impl FilterResult {
    /// Consume the result, keeping only the paths.
    pub fn into_paths(self) -> Vec<String> {
        self.paths
    }

    /// Number of surviving paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True when nothing survived.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Run all three stages over `paths`.
pub fn filter<S, P>(
    paths: &[S],
    ignore_rules: &[IgnoreRule],
    include_patterns: &[P],
    exclude_patterns: &[P],
) -> FilterResult
where
    S: AsRef<str>,
    P: AsRef<str>,
{
    let mut counts = StageCounts {
        candidates: paths.len(),
        ..Default::default()
    };

    let mut survivors: Vec<&str> = paths.iter().map(|p| p.as_ref()).collect();

    if !ignore_rules.is_empty() {
        survivors.retain(|p| !is_ignored(p, ignore_rules));
    }
    counts.after_ignore = survivors.len();

    if !include_patterns.is_empty() {
        survivors.retain(|p| matches_any(p, include_patterns));
    }
    counts.after_include = survivors.len();

    if !exclude_patterns.is_empty() {
        survivors.retain(|p| !matches_any(p, exclude_patterns));
    }
    counts.after_exclude = survivors.len();

    debug!(
        "Filtered {} candidates: {} after ignore rules, {} after includes, {} after excludes",
        counts.candidates, counts.after_ignore, counts.after_include, counts.after_exclude
    );

    FilterResult {
        paths: survivors.into_iter().map(str::to_string).collect(),
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    const NONE: [&str; 0] = [];

    #[test]
    fn test_identity_with_no_rules() {
        let paths = ["b.txt", "a/c.rs", "z"];
        let result = filter(&paths, &[], &NONE, &NONE);
        assert_eq!(result.paths, strings(&paths));
        assert_eq!(result.counts.after_exclude, 3);
    }

    #[test]
    fn test_include_then_exclude_scenario() {
        let paths = [
            "folder/a.cs",
            "folder/b.exe",
            "temp/cs/file.txt",
            "app.config",
            "readme.md",
        ];
        let result = filter(
            &paths,
            &[],
            &["*.cs", "readme.md"],
            &["*.exe", "app.config"],
        );
        assert_eq!(result.paths, strings(&["folder/a.cs", "readme.md"]));
        assert_eq!(
            result.counts,
            StageCounts {
                candidates: 5,
                after_ignore: 5,
                after_include: 2,
                after_exclude: 2,
            }
        );
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let result = filter(&["a.cs"], &[], &["*.cs"], &["a.cs"]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_gitignore_negation_scenario() {
        let rules = IgnoreRules::compile(["bin/", "!bin/SpecialFile.dll"]);
        let paths = ["bin/file1.dll", "bin/SpecialFile.dll", "src/app.js"];
        let result = filter(&paths, rules.as_slice(), &NONE, &NONE);
        assert_eq!(result.paths, strings(&["bin/SpecialFile.dll", "src/app.js"]));
        assert_eq!(result.counts.after_ignore, 2);
    }

    #[test]
    fn test_request_apply_runs_every_stage() {
        let request = FilterRequest {
            paths: strings(&[
                "bin/out.dll",
                "src/main.cs",
                "src/gen/auto.cs",
                "docs/readme.md",
            ]),
            ignore_rules: IgnoreRules::compile(["bin/"]),
            include_patterns: strings(&["*.cs", "*.md"]),
            exclude_patterns: strings(&["gen"]),
        };

        let result = request.apply();
        assert_eq!(result.paths, strings(&["src/main.cs", "docs/readme.md"]));
        assert_eq!(result.counts.after_ignore, 3);
        assert_eq!(result.counts.after_include, 3);
        assert_eq!(result.counts.after_exclude, 2);
    }

    #[test]
    fn test_order_is_preserved() {
        let paths = ["z.cs", "a.cs", "m.txt", "b.cs"];
        let result = filter(&paths, &[], &["*.cs"], &NONE);
        assert_eq!(result.into_paths(), strings(&["z.cs", "a.cs", "b.cs"]));
    }

    #[test]
    fn test_empty_paths() {
        let paths: [&str; 0] = [];
        let rules = IgnoreRules::compile(["*"]);
        let result = filter(&paths, rules.as_slice(), &["*.cs"], &["x"]);
        assert!(result.is_empty());
        assert_eq!(result.counts, StageCounts::default());
    }
}
