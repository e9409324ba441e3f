//! Split free-text US street addresses into their parts and repair zip codes
//! mangled by spreadsheets.
//!
//! [`address::parse`], [`zip::normalize`] and [`region::in_massachusetts`] are pure and
//! never fail: anything they cannot make sense of comes back as `None`, the `00000`
//! zip, or `false`. [`record`] applies them to every row of a CSV file.

pub mod address;
pub mod record;
pub mod region;
pub mod zip;

pub use address::{parse, ParsedAddress};
pub use region::{in_massachusetts, ZipRange, MASSACHUSETTS};
pub use zip::{normalize, NormalizedZip, ZipValue, UNKNOWN_ZIP};
