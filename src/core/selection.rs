//! Year and data-layer selection types shared by the UI and the scene.

use std::fmt;

pub const FIRST_YEAR: u16 = 2001;
pub const LAST_YEAR: u16 = 2024;

/// A year inside the covered data range. Construction clamps, stepping wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Year(u16);

impl Year {
    pub const FIRST: Year = Year(FIRST_YEAR);
    pub const LAST: Year = Year(LAST_YEAR);

    /// Number of years in the range.
    pub const COUNT: u16 = LAST_YEAR - FIRST_YEAR + 1;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(FIRST_YEAR as i32, LAST_YEAR as i32) as u16)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// Step by `delta` years, wrapping around both ends of the range.
    pub fn offset_wrapping(self, delta: i32) -> Self {
        let index = (self.0 - FIRST_YEAR) as i32;
        let wrapped = (index + delta).rem_euclid(Self::COUNT as i32);
        Self(FIRST_YEAR + wrapped as u16)
    }

    pub fn next_wrapping(self) -> Self {
        self.offset_wrapping(1)
    }

    pub fn all() -> impl Iterator<Item = Year> {
        (FIRST_YEAR..=LAST_YEAR).map(Year)
    }
}

impl Default for Year {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visualization layer selected in the UI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Land cover, relief, clouds and atmosphere together.
    #[default]
    Earth,
    Land,
    Bump,
    Atmosphere,
}

impl DataType {
    pub const ALL: [DataType; 4] = [
        DataType::Earth,
        DataType::Land,
        DataType::Bump,
        DataType::Atmosphere,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DataType::Earth => "Earth",
            DataType::Land => "Land",
            DataType::Bump => "Bump",
            DataType::Atmosphere => "Atmosphere",
        }
    }
}
