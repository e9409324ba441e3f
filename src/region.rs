use crate::zip::ZipValue;

/// Massachusetts zip codes, 01001 to 02791
pub const MASSACHUSETTS: ZipRange = ZipRange::new("Massachusetts", 1001, 2791);

/// An inclusive range of 5-digit zip codes, compared numerically
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZipRange {
    name: &'static str,
    low: i64,
    high: i64,
}

impl ZipRange {
    pub const fn new(name: &'static str, low: i64, high: i64) -> Self {
        Self { name, low, high }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// whether the zip falls in this range; values that are not numbers never do
    ///
    /// The `+4` part of a `12345-6789` zip is ignored.
    pub fn contains(&self, zip: impl Into<ZipValue>) -> bool {
        zip_number(&zip.into())
            .is_some_and(|number| (self.low..=self.high).contains(&number))
    }
}

/// Whether a zip code is a Massachusetts one.
///
/// Meant for values already passed through [`crate::zip::normalize`]; the unknown
/// marker `00000` reads as 0 and is never in range.
pub fn in_massachusetts(zip: impl Into<ZipValue>) -> bool {
    MASSACHUSETTS.contains(zip)
}

/// numeric value of a zip, falling back to the part before the first hyphen
fn zip_number(zip: &ZipValue) -> Option<i64> {
    match zip {
        ZipValue::Integer(number) => Some(*number),
        ZipValue::Float(number) if number.is_finite() => Some(number.trunc() as i64),
        ZipValue::Float(_) | ZipValue::Missing => None,
        ZipValue::Text(text) => parse_number(text)
            .or_else(|| text.split_once('-').and_then(|(zip5, _)| parse_number(zip5))),
    }
}

fn parse_number(text: &str) -> Option<i64> {
    text.trim().parse().ok()
}
