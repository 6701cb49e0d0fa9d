//! Repair pass for a known level-editor bug.
//!
//! Some editor versions dropped the comma after short values, producing
//! `"row": 0 "beat": 2`. The pattern below recognizes the values that were
//! affected (small integers, short `[0-3, ...]` lists, short alphanumeric
//! strings) and puts the comma back.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static MISSING_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"": ([0-9]|[1-9][0-9]|100|\[[0-3](?:, [0-3])*\]|"[a-zA-Z0-9]*") ""#)
        .expect("missing-comma pattern is valid")
});

/// Insert the commas the editor forgot.
pub(crate) fn repair_missing_commas(source: &str) -> Cow<'_, str> {
    let repaired = MISSING_COMMA_RE.replace_all(source, r#"": $1, ""#);
    if matches!(repaired, Cow::Owned(_)) {
        debug!("repaired missing commas");
    }
    repaired
}
