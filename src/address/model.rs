use serde::Serialize;

/// Structured form of a free-text street address
///
/// Every present field is a non-empty, trimmed, lowercase string.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParsedAddress {
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub street_suffix: Option<String>,
    /// designator and number, i.e. `apt 4b`, or either one alone
    pub unit_number: Option<String>,
}

impl ParsedAddress {
    /// present fields in address order: number, name, suffix, unit
    pub fn components(&self) -> impl Iterator<Item = &str> {
        [&self.street_number, &self.street_name, &self.street_suffix, &self.unit_number]
            .into_iter()
            .filter_map(|field| field.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.components().next().is_none()
    }

    /// the present components joined back into one line
    pub fn street_line(&self) -> String {
        self.components().collect::<Vec<_>>().join(" ")
    }
}
