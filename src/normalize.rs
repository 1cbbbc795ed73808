//! Text normalization for answer comparison
//!
//! This module canonicalizes free text so that player guesses can be
//! compared against the configured answer list without being tripped up
//! by punctuation, diacritics, common Arabic spelling variants, or the
//! definite article. Both the board's answers and every submission go
//! through the same transformation, so comparison is a plain string
//! equality check.

/// Checks whether a character survives the stripping pass
///
/// Kept characters are Arabic base letters (the consonant/vowel ranges,
/// excluding combining diacritics), Arabic-Indic digits, ASCII
/// alphanumerics, and plain space. Everything else, punctuation and
/// diacritical marks included, is removed.
fn is_kept(c: char) -> bool {
    matches!(c,
        '\u{0621}'..='\u{063A}'
        | '\u{0641}'..='\u{064A}'
        | '\u{0660}'..='\u{0669}'
    ) || c.is_ascii_alphanumeric()
        || c == ' '
}

/// Folds Arabic spelling variants onto a canonical character
///
/// The three hamza-bearing alef forms become plain alef, tāʼ marbūṭah
/// becomes hāʼ, and alef maksūrah becomes yāʼ. All other characters pass
/// through unchanged.
fn fold(c: char) -> char {
    match c {
        'آ' | 'إ' | 'أ' => 'ا',
        'ة' => 'ه',
        'ى' => 'ي',
        _ => c,
    }
}

/// Normalizes free text into its canonical comparison form
///
/// The steps run in a fixed order: trim surrounding whitespace, strip
/// characters outside the accepted set, fold spelling variants, and
/// finally strip one leading definite article ("ال") when the remaining
/// text is longer than three characters. The prefix is stripped at most
/// once per call; the result is not re-scanned.
///
/// Empty and whitespace-only input normalize to the empty string.
///
/// # Arguments
///
/// * `input` - The raw text to normalize
///
/// # Returns
///
/// The canonical form of `input` as a new `String`
pub fn normalize(input: &str) -> String {
    let folded: String = input
        .trim()
        .chars()
        .filter(|c| is_kept(*c))
        .map(fold)
        .collect();

    let mut chars = folded.chars();
    if chars.next() == Some('ا') && chars.next() == Some('ل') && folded.chars().count() > 3 {
        chars.as_str().to_string()
    } else {
        folded
    }
}
