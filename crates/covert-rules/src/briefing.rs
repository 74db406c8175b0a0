//! Briefing composition.
//!
//! Pure functions: the same sponsor, codewords and unlock code always
//! produce byte-identical text.

use covert_types::UplinkCode;

use crate::localization::{self, Localizer};

/// Render an unlock code for display, e.g. `A#-C-D#`.
///
/// Notes are hyphen-joined and the spoken `sharp` suffix is replaced by
/// `#`, which cannot be read out over voice channels.
pub fn render_code(code: &UplinkCode) -> String {
    code.notes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("-")
        .replace("sharp", "#")
}

/// The localized codeword line.
pub fn codewords_line<L: Localizer + ?Sized>(loc: &L, codewords: &[String]) -> String {
    let joined = codewords.join(", ");
    loc.get_string(localization::CODEWORDS_SHORT, &[("codewords", joined.as_str())])
}

/// The localized unlock code line.
pub fn uplink_code_line<L: Localizer + ?Sized>(loc: &L, code: &UplinkCode) -> String {
    let rendered = render_code(code);
    loc.get_string(localization::UPLINK_CODE_SHORT, &[("code", rendered.as_str())])
}

/// Compose the full briefing sent to a new traitor.
///
/// One line each, in order: the greeting naming `sponsor` (or the unknown
/// placeholder), the codewords, and the unlock code when one was issued.
pub fn compose_briefing<L: Localizer + ?Sized>(
    loc: &L,
    sponsor: Option<&str>,
    codewords: &[String],
    code: Option<&UplinkCode>,
) -> String {
    let corporation = sponsor.map_or_else(
        || loc.get_string(localization::ISSUER_UNKNOWN, &[]),
        str::to_owned,
    );

    let mut text = loc.get_string(localization::GREETING, &[("corporation", corporation.as_str())]);
    text.push('\n');
    text.push_str(&codewords_line(loc, codewords));
    text.push('\n');
    if let Some(code) = code {
        text.push_str(&uplink_code_line(loc, code));
        text.push('\n');
    }
    text
}
