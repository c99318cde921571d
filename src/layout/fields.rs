use chrono::{Days, NaiveDate};

use crate::foundation::error::{PassError, PassResult};

/// Days between "today" and the default expiry date.
pub const DEFAULT_EXPIRY_DAYS: u64 = 14;
const IDENTIFIER_DIGITS: usize = 20;
const IDENTIFIER_MAX: u128 = 99_999_999_999_999_999_999;

/// Map half-width ASCII `!`..`~` to their full-width forms; everything else is unchanged.
pub fn to_full_width(text: &str) -> String {
    text.chars()
        .map(|c| {
            if ('!'..='~').contains(&c) {
                char::from_u32(u32::from(c) + 0xFEE0).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Card identifier: either a numeric id to be grouped, or text drawn verbatim.
///
/// In JSON an integer is numeric and a string is text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum Identifier {
    Numeric(u128),
    Text(String),
}

impl<'de> serde::Deserialize<'de> for Identifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        // Numbers keep their source text, so ids past u64 still parse exactly.
        match <serde_json::Value as serde::Deserialize>::deserialize(deserializer)? {
            serde_json::Value::Number(n) => {
                n.to_string().parse::<u128>().map(Identifier::Numeric).map_err(|_| {
                    D::Error::custom(format!(
                        "identifier must be a non-negative integer, got {n}"
                    ))
                })
            }
            serde_json::Value::String(s) => Ok(Identifier::Text(s)),
            other => Err(D::Error::custom(format!(
                "identifier must be an integer or a string, got {other}"
            ))),
        }
    }
}

impl Default for Identifier {
    fn default() -> Self {
        Identifier::Text(String::new())
    }
}

impl Identifier {
    /// Integers parse as numeric ids, anything else stays text.
    pub fn parse(s: &str) -> Self {
        match s.parse::<u128>() {
            Ok(n) => Identifier::Numeric(n),
            Err(_) => Identifier::Text(s.to_string()),
        }
    }

    /// Text as drawn on the card; `raw` skips grouping for numeric ids.
    pub fn display(&self, raw: bool) -> PassResult<String> {
        match self {
            Identifier::Numeric(n) if !raw => format_identifier(*n),
            Identifier::Numeric(n) => Ok(n.to_string()),
            Identifier::Text(s) => Ok(s.clone()),
        }
    }
}

/// Zero-pad to 20 digits and split into five groups of four, separated by two spaces.
pub fn format_identifier(id: u128) -> PassResult<String> {
    if id > IDENTIFIER_MAX {
        return Err(PassError::invalid_input(format!(
            "identifier '{id}' has more than {IDENTIFIER_DIGITS} digits; pass it as raw text instead"
        )));
    }
    let digits = format!("{id:020}");
    let groups: Vec<&str> = (0..IDENTIFIER_DIGITS)
        .step_by(4)
        .map(|i| &digits[i..i + 4])
        .collect();
    Ok(groups.join("  "))
}

/// Normalize an expiry date to `YYYY/MM/DD`; `None` means `today + 14 days`.
pub fn normalize_date(input: Option<&str>, today: NaiveDate) -> PassResult<String> {
    let date = match input {
        None => today
            .checked_add_days(Days::new(DEFAULT_EXPIRY_DAYS))
            .ok_or_else(|| PassError::invalid_input("expiry date out of range"))?,
        Some(s) => ["%Y%m%d", "%Y-%m-%d", "%Y/%m/%d"]
            .iter()
            .filter(|_| !s.contains(char::is_whitespace))
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
            .ok_or_else(|| PassError::invalid_input(format!("invalid date: {s}")))?,
    };
    Ok(date.format("%Y/%m/%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_width_maps_printable_ascii_only() {
        assert_eq!(to_full_width("maimai"), "ｍａｉｍａｉ");
        assert_eq!(to_full_width("A~!"), "Ａ～！");
        assert_eq!(to_full_width("a b"), "ａ ｂ");
        assert_eq!(to_full_width("でらっくす"), "でらっくす");
    }

    #[test]
    fn identifier_groups_twenty_digits() {
        assert_eq!(
            format_identifier(12345678901234567890).unwrap(),
            "1234  5678  9012  3456  7890"
        );
        assert_eq!(
            format_identifier(42).unwrap(),
            "0000  0000  0000  0000  0042"
        );
    }

    #[test]
    fn identifier_over_twenty_digits_is_invalid() {
        assert!(matches!(
            format_identifier(100_000_000_000_000_000_000),
            Err(PassError::InvalidInput(_))
        ));
    }

    #[test]
    fn identifier_parse_and_display() {
        assert_eq!(Identifier::parse("0042"), Identifier::Numeric(42));
        assert_eq!(
            Identifier::parse("ABCD-1234"),
            Identifier::Text("ABCD-1234".into())
        );
        assert_eq!(Identifier::Numeric(42).display(true).unwrap(), "42");
        assert_eq!(Identifier::default().display(false).unwrap(), "");
    }

    #[test]
    fn json_identifier_keeps_every_twenty_digit_value() {
        let id: Identifier = serde_json::from_str("99999999999999999999").unwrap();
        assert_eq!(id, Identifier::Numeric(99_999_999_999_999_999_999));
        assert_eq!(
            id.display(false).unwrap(),
            "9999  9999  9999  9999  9999"
        );

        let id: Identifier = serde_json::from_str("18446744073709551616").unwrap();
        assert_eq!(id, Identifier::Numeric(u128::from(u64::MAX) + 1));

        let id: Identifier = serde_json::from_str("42").unwrap();
        assert_eq!(id, Identifier::Numeric(42));

        let id: Identifier = serde_json::from_str(r#""0042""#).unwrap();
        assert_eq!(id, Identifier::Text("0042".into()));
    }

    #[test]
    fn json_identifier_rejects_negative_and_fractional_numbers() {
        assert!(serde_json::from_str::<Identifier>("-5").is_err());
        assert!(serde_json::from_str::<Identifier>("1.5").is_err());
        assert!(serde_json::from_str::<Identifier>("true").is_err());
    }

    #[test]
    fn dates_normalize_from_all_accepted_forms() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        for input in ["20250101", "2025-01-01", "2025/01/01"] {
            assert_eq!(normalize_date(Some(input), today).unwrap(), "2025/01/01");
        }
    }

    #[test]
    fn absent_date_is_two_weeks_out() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(normalize_date(None, today).unwrap(), "2025/01/08");
    }

    #[test]
    fn malformed_date_is_invalid() {
        let today = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        for input in [
            "2025.01.01",
            "20251301",
            "tomorrow",
            " 2025-01-01 ",
            "2025-01-01\n",
            " 20250101",
        ] {
            assert!(matches!(
                normalize_date(Some(input), today),
                Err(PassError::InvalidInput(_))
            ));
        }
    }
}
