use std::sync::LazyLock;
use regex::Regex;
use crate::address::vocab::{Vocabulary, STREET_SUFFIXES, UNIT_DESIGNATORS};

mod model;
pub mod vocab;

pub use model::ParsedAddress;

static NON_ADDRESS_CHAR_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").unwrap());
static WHITESPACE_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static LONG_ZIP_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{5}-\d{4}\b").unwrap());
static SHORT_ZIP_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{5}\b").unwrap());

/// digits with at most one trailing letter, i.e. `123`, `221b`
static STREET_NUMBER_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[a-zA-Z]?$").unwrap());
/// digits with any trailing letters, or a lone letter
static UNIT_NUMBER_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+[a-zA-Z]*$|^[a-zA-Z]$").unwrap());

/// Split a free-text address into street number, name, suffix and unit.
///
/// Never fails: components that cannot be identified are left as `None`.
/// Each step consumes the token it matched, so later steps only see what is left:
///
/// 1. the first token shaped like a street number, scanning left to right
/// 2. the last token shaped like a unit number, scanning right to left
/// 3. the first unit designator (`apt`, `suite`, ...), prepended to the unit number
/// 4. the first street suffix (`st`, `ave`, ...)
/// 5. everything else is the street name
///
/// A zip code embedded in the address is removed before tokenizing and is not returned.
pub fn parse(address: &str) -> ParsedAddress {
    let cleaned = clean(address);
    let remainder = strip_zip(&cleaned);
    let mut tokens = remainder.split_whitespace().collect::<Vec<_>>();

    let street_number = take_first(&mut tokens, |token| STREET_NUMBER_REG.is_match(token));
    let unit = take_last(&mut tokens, |token| UNIT_NUMBER_REG.is_match(token));
    let designator = take_first_in(&mut tokens, &UNIT_DESIGNATORS);
    let street_suffix = take_first_in(&mut tokens, &STREET_SUFFIXES);

    let unit_number = match (designator, unit) {
        (Some(designator), Some(unit)) => Some(format!("{} {}", designator, unit)),
        (Some(designator), None) => Some(designator.to_string()),
        (None, unit) => unit.map(str::to_string),
    };
    let street_name = if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    };

    ParsedAddress {
        street_number: street_number.map(str::to_string),
        street_name,
        street_suffix: street_suffix.map(str::to_string),
        unit_number,
    }
}

/// drop punctuation, collapse whitespace and lowercase
fn clean(address: &str) -> String {
    let stripped = NON_ADDRESS_CHAR_REG.replace_all(address, "");
    WHITESPACE_REG.replace_all(&stripped, " ")
        .trim()
        .to_ascii_lowercase()
}

/// cut out the first zip code found, long form preferred
fn strip_zip(address: &str) -> String {
    let zip = LONG_ZIP_REG.find(address)
        .or_else(|| SHORT_ZIP_REG.find(address));
    match zip {
        Some(zip) => format!("{}{}", &address[..zip.start()], &address[zip.end()..]).trim().to_string(),
        None => address.to_string(),
    }
}

fn take_first<'a>(tokens: &mut Vec<&'a str>, matches: impl Fn(&str) -> bool) -> Option<&'a str> {
    let idx = tokens.iter().position(|token| matches(*token))?;
    Some(tokens.remove(idx))
}

fn take_last<'a>(tokens: &mut Vec<&'a str>, matches: impl Fn(&str) -> bool) -> Option<&'a str> {
    let idx = tokens.iter().rposition(|token| matches(*token))?;
    Some(tokens.remove(idx))
}

fn take_first_in(tokens: &mut Vec<&str>, vocabulary: &Vocabulary) -> Option<&'static str> {
    let idx = tokens.iter().position(|token| vocabulary.contains(token))?;
    vocabulary.get(tokens.remove(idx))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(number: Option<&str>, name: Option<&str>, suffix: Option<&str>, unit: Option<&str>) -> ParsedAddress {
        ParsedAddress {
            street_number: number.map(str::to_string),
            street_name: name.map(str::to_string),
            street_suffix: suffix.map(str::to_string),
            unit_number: unit.map(str::to_string),
        }
    }

    #[test]
    fn full_street_line() {
        assert_eq!(
            parse("123 Main St Apt 4B 02115"),
            parsed(Some("123"), Some("main"), Some("st"), Some("apt 4b")),
        );
    }

    #[test]
    fn city_and_state_stay_in_the_name() {
        assert_eq!(
            parse("123 Main St Apt 4B, Boston, MA 02115"),
            parsed(Some("123"), Some("main boston ma"), Some("st"), Some("apt 4b")),
        );
    }

    #[test]
    fn number_and_name_only() {
        assert_eq!(parse("45 Elm"), parsed(Some("45"), Some("elm"), None, None));
    }

    #[test]
    fn empty_and_punctuation_only() {
        assert_eq!(parse(""), ParsedAddress::default());
        assert_eq!(parse("   "), ParsedAddress::default());
        assert_eq!(parse("#, -- !?"), ParsedAddress::default());
    }

    #[test]
    fn zip_alone_is_consumed() {
        assert_eq!(parse("02115"), ParsedAddress::default());
    }

    #[test]
    fn street_number_wins_over_unit_number() {
        assert_eq!(parse("123"), parsed(Some("123"), None, None, None));
    }

    #[test]
    fn letter_unit_with_designator() {
        assert_eq!(
            parse("12 Oak Street Unit B"),
            parsed(Some("12"), Some("oak"), Some("street"), Some("unit b")),
        );
    }

    #[test]
    fn designator_without_unit_number() {
        assert_eq!(
            parse("9 Pine Rd Suite"),
            parsed(Some("9"), Some("pine"), Some("rd"), Some("suite")),
        );
    }

    #[test]
    fn unit_number_without_designator() {
        assert_eq!(
            parse("77 Mass. Ave. C"),
            parsed(Some("77"), Some("mass"), Some("ave"), Some("c")),
        );
    }

    #[test]
    fn leading_unit_is_taken_as_street_number() {
        // `7` is the first number-shaped token, so the house number falls to the unit scan
        assert_eq!(
            parse("Apt 7, 221B Baker St"),
            parsed(Some("7"), Some("baker"), Some("st"), Some("apt 221b")),
        );
    }

    #[test]
    fn hash_designator_is_stripped_with_punctuation() {
        assert_eq!(
            parse("100 Main #5"),
            parsed(Some("100"), Some("main"), None, Some("5")),
        );
    }

    #[test]
    fn first_suffix_in_token_order_wins() {
        assert_eq!(
            parse("North Main St"),
            parsed(None, Some("main st"), Some("north"), None),
        );
    }

    #[test]
    fn only_first_designator_is_taken() {
        assert_eq!(
            parse("1 Federal Street Floor Suite 3"),
            parsed(Some("1"), Some("federal suite"), Some("street"), Some("floor 3")),
        );
    }

    #[test]
    fn hyphenated_zip_is_not_extracted() {
        // the hyphen is stripped first, leaving a nine digit token
        assert_eq!(
            parse("10 Elm St 02115-1234"),
            parsed(Some("10"), Some("elm"), Some("st"), Some("021151234")),
        );
    }

    #[test]
    fn zip_must_stand_alone() {
        assert_eq!(
            parse("123456 Main"),
            parsed(Some("123456"), Some("main"), None, None),
        );
    }

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(
            parse("  5\tHigh \n  Street  "),
            parsed(Some("5"), Some("high"), Some("street"), None),
        );
    }

    #[test]
    fn clean_keeps_only_ascii_alphanumerics() {
        assert_eq!(clean("  12-B, Café  Row "), "12b caf row");
    }

    #[test]
    fn strip_zip_removes_first_match() {
        assert_eq!(strip_zip("10 elm 02115 02115"), "10 elm  02115");
        assert_eq!(strip_zip("102115 elm 02115"), "102115 elm");
        assert_eq!(strip_zip("10 elm"), "10 elm");
    }

    #[test]
    fn zip_digits_inside_house_number_are_kept() {
        assert_eq!(
            parse("102115 Elm 02115"),
            parsed(Some("102115"), Some("elm"), None, None),
        );
    }
}
