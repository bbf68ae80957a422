//! Suburb records and their CSV layout.
//!
//! Data rows hold ten fields in a fixed order; the first row of a file is a
//! header and is not interpreted. Fields are matched by position, not by the
//! header's names.

use std::fmt;

use serde::de::Deserializer;
use serde::Deserialize;

/// One row of suburb reference data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Suburb {
    /// Dataset-specific record code.
    #[serde(deserialize_with = "leading_int")]
    pub comp_code: i32,
    /// Official suburb code.
    #[serde(deserialize_with = "leading_int")]
    pub suburb_code: i32,
    /// Official suburb name.
    pub suburb_name: String,
    /// Year the data refers to.
    #[serde(deserialize_with = "leading_int")]
    pub year: i32,
    /// Official state code.
    #[serde(deserialize_with = "leading_int")]
    pub state_code: i32,
    /// Official state name.
    pub state_name: String,
    /// Official local government area code. Rows listing several codes keep
    /// the first.
    #[serde(deserialize_with = "leading_int")]
    pub lga_code: i32,
    /// Official local government area name.
    pub lga_name: String,
    /// Latitude in decimal degrees.
    #[serde(deserialize_with = "leading_float")]
    pub latitude: f32,
    /// Longitude in decimal degrees.
    #[serde(deserialize_with = "leading_float")]
    pub longitude: f32,
}

/// Parses the integer at the start of a field, ignoring anything after it.
/// A field with no leading integer reads as 0.
fn leading_int<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let s = raw.trim_start();
    let digits_end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(s.len(), |(i, _)| i);
    Ok(s[..digits_end].parse().unwrap_or(0))
}

/// Parses the longest number at the start of a field. A field with no
/// leading number reads as 0.
fn leading_float<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let s = raw.trim();
    Ok((1..=s.len())
        .rev()
        .filter(|&end| s.is_char_boundary(end))
        .find_map(|end| s[..end].parse().ok())
        .unwrap_or(0.0))
}

/// Which text field a record is indexed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyField {
    /// Official suburb name.
    #[default]
    Suburb,
    /// Official state name.
    State,
    /// Official local government area name.
    Lga,
}

impl KeyField {
    /// Zero-based CSV column holding this field.
    pub fn column(&self) -> usize {
        match self {
            KeyField::Suburb => 2,
            KeyField::State => 5,
            KeyField::Lga => 7,
        }
    }

    /// The field of `suburb` this selects.
    pub fn of<'a>(&self, suburb: &'a Suburb) -> &'a str {
        match self {
            KeyField::Suburb => &suburb.suburb_name,
            KeyField::State => &suburb.state_name,
            KeyField::Lga => &suburb.lga_name,
        }
    }
}

impl fmt::Display for Suburb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} -->", self.suburb_name)?;
        write!(
            f,
            "COMP20003 Code: {}, \
             Official Code Suburb: {}, \
             Official Name Suburb: {}, \
             Year: {}, \
             Official Code State: {}, \
             Official Name State: {}, \
             Official Code Local Government Area: {}, \
             Official Name Local Government Area: {}, \
             Latitude: {:.6}, \
             Longitude: {:.6}",
            self.comp_code,
            self.suburb_code,
            self.suburb_name,
            self.year,
            self.state_code,
            self.state_name,
            self.lga_code,
            self.lga_name,
            self.latitude,
            self.longitude,
        )
    }
}
