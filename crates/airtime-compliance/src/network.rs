//! Phone number normalization and carrier classification.
//!
//! Carrier detection must stay synchronous and infallible: it feeds both
//! display and the compliance gate's degraded path, so an unmapped prefix
//! classifies as `"Unknown"` rather than erroring.

/// Length of a normalized South African mobile number (no country code,
/// no leading zero).
pub const LOCAL_NUMBER_LEN: usize = 9;

/// Static dialing-prefix table for the major national carriers.
///
/// Keys are the three-digit local dialing prefix (leading zero included).
const PREFIX_TABLE: &[(&str, &str)] = &[
    // Vodacom
    ("082", "Vodacom"),
    ("072", "Vodacom"),
    ("079", "Vodacom"),
    ("071", "Vodacom"),
    // MTN
    ("083", "MTN"),
    ("073", "MTN"),
    ("078", "MTN"),
    ("063", "MTN"),
    ("060", "MTN"),
    // Cell C
    ("084", "Cell C"),
    ("074", "Cell C"),
    ("076", "Cell C"),
    ("061", "Cell C"),
    ("062", "Cell C"),
    // Telkom Mobile
    ("081", "Telkom Mobile"),
    ("067", "Telkom Mobile"),
    ("065", "Telkom Mobile"),
];

/// Carrier name for unmapped prefixes.
pub const UNKNOWN_CARRIER: &str = "Unknown";

/// Normalize a freely-formatted number to local form.
///
/// Strips every non-digit, then the `27` country code, else one leading
/// zero. Total: malformed input yields a short or garbled digit string,
/// validity is checked separately.
///
/// ```
/// use airtime_compliance::network::normalize;
/// assert_eq!(normalize("082 123 4567"), "821234567");
/// assert_eq!(normalize("+27821234567"), "821234567");
/// assert_eq!(normalize("821234567"), "821234567");
/// ```
pub fn normalize(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if let Some(rest) = digits.strip_prefix("27") {
        rest.to_string()
    } else if let Some(rest) = digits.strip_prefix('0') {
        rest.to_string()
    } else {
        digits
    }
}

/// Best-guess carrier for a number in any accepted format.
///
/// Tolerates already-normalized, zero-prefixed, and international input.
/// Numbers whose dialing prefix is not in the table yield
/// [`UNKNOWN_CARRIER`].
pub fn classify(raw: &str) -> &'static str {
    let local = normalize(raw);
    match dialing_prefix(&local) {
        Some(prefix) => PREFIX_TABLE
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, carrier)| *carrier)
            .unwrap_or(UNKNOWN_CARRIER),
        None => UNKNOWN_CARRIER,
    }
}

/// Whether the number is a plausible South African mobile number:
/// normalized length and a dialing prefix in the carrier table.
pub fn is_valid_mobile(raw: &str) -> bool {
    let local = normalize(raw);
    local.len() == LOCAL_NUMBER_LEN && classify(&local) != UNKNOWN_CARRIER
}

/// Full international form (`+27...`) of a number in any accepted format.
pub fn to_international(raw: &str) -> String {
    format!("+27{}", normalize(raw))
}

/// Restore the three-digit dialing prefix (`0` + first two local digits).
fn dialing_prefix(local: &str) -> Option<String> {
    if local.len() < 2 {
        return None;
    }
    local.get(..2).map(|two| format!("0{}", two))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_leading_zero() {
        assert_eq!(normalize("0821234567"), "821234567");
    }

    #[test]
    fn test_normalize_strips_country_code() {
        assert_eq!(normalize("27821234567"), "821234567");
        assert_eq!(normalize("+27 82 123 4567"), "821234567");
    }

    #[test]
    fn test_normalize_passes_through_local_form() {
        assert_eq!(normalize("821234567"), "821234567");
    }

    #[test]
    fn test_normalize_strips_punctuation() {
        assert_eq!(normalize("(082) 123-4567"), "821234567");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["0821234567", "+27761234567", "831234567", "123", ""] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", raw);
        }
    }

    #[test]
    fn test_normalize_is_total_on_garbage() {
        assert_eq!(normalize("not a number"), "");
        assert_eq!(normalize("12"), "12");
    }

    #[test]
    fn test_classify_vodacom() {
        assert_eq!(classify("0821234567"), "Vodacom");
        assert_eq!(classify("821234567"), "Vodacom");
        assert_eq!(classify("+27721234567"), "Vodacom");
    }

    #[test]
    fn test_classify_all_carriers() {
        assert_eq!(classify("0831234567"), "MTN");
        assert_eq!(classify("0761234567"), "Cell C");
        assert_eq!(classify("0811234567"), "Telkom Mobile");
    }

    #[test]
    fn test_classify_unmapped_prefix_is_unknown() {
        assert_eq!(classify("0901234567"), UNKNOWN_CARRIER);
        assert_eq!(classify(""), UNKNOWN_CARRIER);
        assert_eq!(classify("1"), UNKNOWN_CARRIER);
    }

    #[test]
    fn test_is_valid_mobile() {
        assert!(is_valid_mobile("0821234567"));
        assert!(is_valid_mobile("+27761234567"));
        assert!(!is_valid_mobile("123"));
        assert!(!is_valid_mobile("0901234567")); // right length, bad prefix
        assert!(!is_valid_mobile("08212345678")); // too long
    }

    #[test]
    fn test_to_international() {
        assert_eq!(to_international("0821234567"), "+27821234567");
        assert_eq!(to_international("27821234567"), "+27821234567");
    }
}
