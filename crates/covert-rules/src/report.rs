//! Round-end summary text.

use crate::localization::{self, Localizer};

/// Append the round's codewords to `summary` as a new line.
///
/// Existing text is never touched. Nothing is appended when no codewords
/// were used.
pub fn append_round_end_codewords<L: Localizer + ?Sized>(
    summary: &mut String,
    localizer: &L,
    codewords: &[String],
) {
    if codewords.is_empty() {
        return;
    }
    let joined = codewords.join(", ");
    summary.push('\n');
    summary.push_str(&localizer.get_string(
        localization::ROUND_END_CODEWORDS,
        &[("codewords", joined.as_str())],
    ));
}
