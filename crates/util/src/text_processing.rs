//! # Text Processing Utilities
//!
//! Pure label derivations used by the navigation rail:
//!
//! - [`derive_initials`] reduces a project name to its badge label.
//! - [`format_count`] compresses a counter into a compact display string.
//!
//! Both functions are total. They allocate a fresh `String` on every call
//! and keep no state between calls.

/// Label returned for names that are empty after trimming.
pub const EMPTY_INITIALS: &str = "??";

/// Account label shown when no organization is selected.
pub const NO_ORG_INITIALS: &str = "@";

const THOUSAND: u64 = 1_000;

/// Derives the badge label for a project name.
///
/// The name is trimmed and split on runs of whitespace. Two or more words
/// yield the first character of each of the first two words; a single word
/// yields its first two characters (or one, for one-character names). The
/// result is uppercased. Blank names yield [`EMPTY_INITIALS`].
///
/// Characters are Unicode scalar values, not grapheme clusters, so names in
/// scripts that rely on combining marks may be cut between a base character
/// and its mark. Uppercasing is not locale-sensitive and may expand a single
/// character (`ß` becomes `SS`).
///
/// # Example
/// ```rust
/// use rail_util::derive_initials;
///
/// assert_eq!(derive_initials("Acme Corp"), "AC");
/// assert_eq!(derive_initials("acme"), "AC");
/// assert_eq!(derive_initials("   "), "??");
/// ```
pub fn derive_initials(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return EMPTY_INITIALS.to_string();
    }

    let mut words = trimmed.split_whitespace();
    let first = words.next().unwrap_or(trimmed);
    let picked: String = match words.next() {
        Some(second) => first.chars().take(1).chain(second.chars().take(1)).collect(),
        None => first.chars().take(2).collect(),
    };
    picked.to_uppercase()
}

/// Formats a non-negative count for compact display.
///
/// - Below 1000 the plain decimal form is returned (`999` → `"999"`).
/// - From 10 000 upward the thousands are truncated (`12345` → `"12k"`).
/// - In between `count / 1000` is shown with one decimal (`4500` → `"4.5k"`).
///
/// The decimal is rounded the way a host `toFixed(1)` does on the `f64`
/// quotient: the tenth nearest to the binary value wins and exact ties go up.
/// So `1250` → `"1.3k"`, while `1150` → `"1.1k"` because `1.15` is stored
/// slightly below the midpoint.
///
/// # Example
/// ```rust
/// use rail_util::format_count;
///
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(9950), "9.9k");
/// assert_eq!(format_count(12_480), "12k");
/// ```
pub fn format_count(count: u64) -> String {
    if count < THOUSAND {
        return count.to_string();
    }

    let whole_thousands = count / THOUSAND;
    if whole_thousands >= 10 {
        return format!("{whole_thousands}k");
    }

    let lower_tenths = count / 100;
    let round_up = match count % 100 {
        0..50 => false,
        50 => !is_below_midpoint(count as f64 / THOUSAND as f64, lower_tenths),
        _ => true,
    };
    let tenths = lower_tenths + u64::from(round_up);
    format!("{}.{}k", tenths / 10, tenths % 10)
}

/// Whether the exact binary value of `value` lies below `(tenths + 0.5) / 10`.
///
/// `value` must be a positive normal `f64` below 16, which keeps every
/// product inside `u128`.
fn is_below_midpoint(value: f64, tenths: u64) -> bool {
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32 - 1075;
    let mantissa = u128::from((bits & ((1 << 52) - 1)) | (1 << 52));
    // value = mantissa * 2^exponent, midpoint = (2 * tenths + 1) / 20
    let scaled_value = mantissa * 20;
    let scaled_midpoint = u128::from(2 * tenths + 1) << exponent.unsigned_abs();
    scaled_value < scaled_midpoint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_use_sentinel() {
        assert_eq!(derive_initials(""), "??");
        assert_eq!(derive_initials("   "), "??");
        assert_eq!(derive_initials("\t\n"), "??");
    }

    #[test]
    fn two_words_take_first_letters() {
        assert_eq!(derive_initials("Acme Corp"), "AC");
        assert_eq!(derive_initials("  vibe   kanban board "), "VK");
        assert_eq!(derive_initials("design\tsystem"), "DS");
    }

    #[test]
    fn single_word_takes_two_letters() {
        assert_eq!(derive_initials("acme"), "AC");
        assert_eq!(derive_initials("X"), "X");
        assert_eq!(derive_initials(" q "), "Q");
    }

    #[test]
    fn output_is_always_uppercase() {
        for name in ["alpha beta", "ALPHA BETA", "aLpHa bEtA"] {
            assert_eq!(derive_initials(name), "AB");
        }
    }

    #[test]
    fn non_ascii_names_use_scalar_values() {
        assert_eq!(derive_initials("été"), "ÉT");
        assert_eq!(derive_initials("日本 語"), "日語");
        assert_eq!(derive_initials("ß"), "SS");
    }

    #[test]
    fn derivation_is_repeatable() {
        let first = derive_initials("Acme Corp");
        let second = derive_initials("Acme Corp");
        assert_eq!(first, second);
    }

    #[test]
    fn small_counts_are_verbatim() {
        for n in [0_u64, 1, 42, 500, 999] {
            assert_eq!(format_count(n), n.to_string());
        }
    }

    #[test]
    fn thousands_with_one_decimal() {
        assert_eq!(format_count(1000), "1.0k");
        assert_eq!(format_count(1005), "1.0k");
        assert_eq!(format_count(4500), "4.5k");
        assert_eq!(format_count(9949), "9.9k");
    }

    #[test]
    fn one_decimal_follows_binary_quotient() {
        // 1.05 is stored above its midpoint, 1.15, 1.45 and 9.95 below.
        assert_eq!(format_count(1050), "1.1k");
        assert_eq!(format_count(1150), "1.1k");
        assert_eq!(format_count(1450), "1.4k");
        assert_eq!(format_count(9950), "9.9k");
        assert_eq!(format_count(1249), "1.2k");
        assert_eq!(format_count(9999), "10.0k");
    }

    #[test]
    fn exact_ties_round_up() {
        assert_eq!(format_count(1250), "1.3k");
        assert_eq!(format_count(1750), "1.8k");
        assert_eq!(format_count(2500), "2.5k");
    }

    #[test]
    fn agrees_with_float_formatting_off_ties() {
        for count in (1000..10_000).filter(|count| count % 100 != 50) {
            let expected = format!("{:.1}k", count as f64 / 1000.0);
            assert_eq!(format_count(count), expected, "count {count}");
        }
    }

    #[test]
    fn ten_thousand_and_up_truncates() {
        assert_eq!(format_count(10_000), "10k");
        assert_eq!(format_count(12_345), "12k");
        assert_eq!(format_count(19_999), "19k");
        assert_eq!(format_count(1_234_567), "1234k");
    }
}
