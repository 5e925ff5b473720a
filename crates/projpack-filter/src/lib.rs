//! projpack-filter: Path filtering engine.
//!
//! Decides which candidate paths survive into the packed output. Two
//! independent layers are applied in a fixed order: gitignore-dialect
//! rules (with anchoring, directory patterns and last-match-wins negation),
//! then the user's include and exclude token lists.
//!
//! Everything here is pure: no filesystem access, no global state.

pub mod custom;
pub mod pipeline;
pub mod rule;

pub use custom::{matches, matches_any, PatternShape};
pub use pipeline::{filter, FilterRequest, FilterResult, StageCounts};
pub use rule::{is_ignored, IgnoreRule, IgnoreRules};

/// Convert host separators to `/`.
pub(crate) fn normalize(path: &str) -> std::borrow::Cow<'_, str> {
    if path.contains('\\') {
        std::borrow::Cow::Owned(path.replace('\\', "/"))
    } else {
        std::borrow::Cow::Borrowed(path)
    }
}
