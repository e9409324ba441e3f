use std::fmt;
use std::sync::LazyLock;
use regex::Regex;

/// Returned when a zip code cannot be repaired. No real US zip code is all zeros.
pub const UNKNOWN_ZIP: &str = "00000";

static ZIP5_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5}$").unwrap());
static ZIP9_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{5}-[0-9]{4}$").unwrap());
/// a 4-digit zip stored as a float, i.e. `2115.0` for `02115`
static TRUNCATED_FLOAT_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]{4})\.0$").unwrap());

/// A zip code cell as it comes out of a spreadsheet or CSV
#[derive(Debug, Clone, PartialEq)]
pub enum ZipValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Missing,
}

impl ZipValue {
    /// string form of the value, floats keep their fractional part (`2115.0`)
    fn to_text(&self) -> Option<String> {
        match self {
            ZipValue::Text(text) => Some(text.clone()),
            ZipValue::Integer(value) => Some(value.to_string()),
            ZipValue::Float(value) => Some(format!("{:?}", value)),
            ZipValue::Missing => None,
        }
    }
}

impl From<&str> for ZipValue {
    fn from(value: &str) -> Self {
        ZipValue::Text(value.to_string())
    }
}

impl From<String> for ZipValue {
    fn from(value: String) -> Self {
        ZipValue::Text(value)
    }
}

impl From<&String> for ZipValue {
    fn from(value: &String) -> Self {
        ZipValue::Text(value.clone())
    }
}

impl From<i64> for ZipValue {
    fn from(value: i64) -> Self {
        ZipValue::Integer(value)
    }
}

impl From<i32> for ZipValue {
    fn from(value: i32) -> Self {
        ZipValue::Integer(value.into())
    }
}

impl From<u32> for ZipValue {
    fn from(value: u32) -> Self {
        ZipValue::Integer(value.into())
    }
}

impl From<f64> for ZipValue {
    fn from(value: f64) -> Self {
        ZipValue::Float(value)
    }
}

impl From<&NormalizedZip> for ZipValue {
    fn from(zip: &NormalizedZip) -> Self {
        ZipValue::Text(zip.0.clone())
    }
}

impl From<NormalizedZip> for ZipValue {
    fn from(zip: NormalizedZip) -> Self {
        ZipValue::Text(zip.0)
    }
}

impl<T: Into<ZipValue>> From<Option<T>> for ZipValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ZipValue::Missing, Into::into)
    }
}

/// A zip code in `12345` or `12345-6789` form, or [`UNKNOWN_ZIP`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedZip(String);

impl NormalizedZip {
    pub fn unknown() -> Self {
        Self(UNKNOWN_ZIP.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == UNKNOWN_ZIP
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// the 5-digit part
    pub fn zip5(&self) -> &str {
        &self.0[..5]
    }

    /// the 4-digit add-on, if any
    pub fn plus4(&self) -> Option<&str> {
        self.0.get(6..)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedZip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedZip {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for NormalizedZip {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for NormalizedZip {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Repair a raw zip code into `12345` or `12345-6789` form.
///
/// Values that cannot be repaired become [`UNKNOWN_ZIP`]. Already-normalized values are
/// returned unchanged, so normalizing twice is the same as normalizing once.
pub fn normalize(raw: impl Into<ZipValue>) -> NormalizedZip {
    let Some(text) = raw.into().to_text() else {
        return NormalizedZip::unknown();
    };
    let zip = text.trim().replace(' ', "");
    if zip.is_empty() {
        return NormalizedZip::unknown();
    }

    if ZIP5_REG.is_match(&zip) || ZIP9_REG.is_match(&zip) {
        return NormalizedZip(zip);
    }
    if let Some(caps) = TRUNCATED_FLOAT_REG.captures(&zip) {
        return NormalizedZip(format!("0{}", &caps[1]));
    }

    let len = zip.chars().count();
    let repaired = match len {
        // leading zeros lost to a numeric column
        0..=4 if zip.chars().all(|c| c.is_ascii_digit()) => {
            Some(format!("{:0>5}", zip)).filter(|zip| ZIP5_REG.is_match(zip))
        }
        6..=9 => {
            Some(zip.chars().take(5).collect::<String>()).filter(|zip| ZIP5_REG.is_match(zip))
        }
        // assumes a one-character separator after the first five digits
        11.. => {
            let head = zip.chars().take(5).collect::<String>();
            let tail = zip.chars().skip(6).collect::<String>();
            Some(format!("{}-{}", head, tail)).filter(|zip| ZIP9_REG.is_match(zip))
        }
        _ => None,
    };
    repaired.map_or_else(NormalizedZip::unknown, NormalizedZip)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_zips_pass_through() {
        assert_eq!(normalize("02115"), "02115");
        assert_eq!(normalize("99999"), "99999");
        assert_eq!(normalize("02115-1234"), "02115-1234");
        assert_eq!(normalize(" 02115 "), "02115");
        assert_eq!(normalize("021 15"), "02115");
    }

    #[test]
    fn restores_leading_zeros() {
        assert_eq!(normalize("2115"), "02115");
        assert_eq!(normalize("1"), "00001");
        assert_eq!(normalize("12"), "00012");
        assert_eq!(normalize(2115), "02115");
        assert_eq!(normalize(2115u32), "02115");
    }

    #[test]
    fn repairs_float_artifact() {
        assert_eq!(normalize("2115.0"), "02115");
        assert_eq!(normalize(2115.0), "02115");
        assert_eq!(normalize(2115.5), UNKNOWN_ZIP);
    }

    #[test]
    fn truncates_medium_lengths() {
        assert_eq!(normalize("021150000"), "02115");
        assert_eq!(normalize("021151"), "02115");
        assert_eq!(normalize(21150000), "21150");
        assert_eq!(normalize("0211x1234"), UNKNOWN_ZIP);
    }

    #[test]
    fn long_values_need_a_four_digit_tail() {
        assert_eq!(normalize("0211500001234"), UNKNOWN_ZIP);
        assert_eq!(normalize("02115-1234-99"), UNKNOWN_ZIP);
        assert_eq!(normalize("12345678901"), UNKNOWN_ZIP);
    }

    #[test]
    fn unrepairable_values_are_unknown() {
        assert_eq!(normalize(None::<&str>), UNKNOWN_ZIP);
        assert_eq!(normalize(ZipValue::Missing), UNKNOWN_ZIP);
        assert_eq!(normalize(""), UNKNOWN_ZIP);
        assert_eq!(normalize("   "), UNKNOWN_ZIP);
        assert_eq!(normalize("abcde"), UNKNOWN_ZIP);
        assert_eq!(normalize("1a"), UNKNOWN_ZIP);
        assert_eq!(normalize("0211512345"), UNKNOWN_ZIP);
        assert_eq!(normalize(f64::NAN), UNKNOWN_ZIP);
        assert_eq!(normalize("ма021"), UNKNOWN_ZIP);
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        for raw in ["2115", "2115.0", "021150000", "02115-1234", "junk", ""] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn zip_parts() {
        let zip = normalize("02115-1234");
        assert_eq!(zip.zip5(), "02115");
        assert_eq!(zip.plus4(), Some("1234"));
        assert_eq!(normalize("2115").plus4(), None);
        assert!(normalize("x").is_unknown());
        assert!(!normalize("02115").is_unknown());
        assert_eq!(normalize("2115").to_string(), "02115");
    }
}
