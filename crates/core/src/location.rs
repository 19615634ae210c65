//! Board locations and the human-readable location codec.
//!
//! A [`Location`] can only be built through a checked constructor or the
//! parser, so every value in circulation is on the 8x8 grid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::result::Result;

const FILES: &[u8; 8] = b"ABCDEFGH";

/// A square on the 8x8 board.
///
/// `file` is the column (`A`..`H` → 0..7) and `rank` the row (`1`..`8` → 0..7).
/// The default is `A1`.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Location {
    file: u8,
    rank: u8,
}

impl Location {
    /// Number of files and ranks on the board.
    pub const SIZE: u8 = 8;

    /// Build a location from zero-based grid coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if either axis is outside `0..=7`.
    pub const fn new(file: u8, rank: u8) -> Result<Self> {
        if file < Self::SIZE && rank < Self::SIZE {
            Ok(Self { file, rank })
        } else {
            Err(Error::out_of_bounds(file, rank))
        }
    }

    /// Zero-based column.
    #[must_use]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Zero-based row.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Every square on the board, rank by rank starting at `A1`.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::SIZE).flat_map(|rank| (0..Self::SIZE).map(move |file| Self { file, rank }))
    }

    fn file_letter(self) -> char {
        FILES
            .get(usize::from(self.file))
            .map_or('?', |letter| char::from(*letter))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_letter(), u16::from(self.rank) + 1)
    }
}

impl FromStr for Location {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let mut chars = input.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(Error::invalid_location(
                input,
                "expected a file letter followed by a rank digit, e.g. D2",
            ));
        };

        let file = match file.to_ascii_uppercase() {
            letter @ 'A'..='H' => letter as u8 - b'A',
            _ => {
                return Err(Error::invalid_location(
                    input,
                    format!("file '{file}' is not in A-H"),
                ));
            }
        };

        let rank = match rank {
            digit @ '1'..='8' => digit as u8 - b'1',
            _ => {
                return Err(Error::invalid_location(
                    input,
                    format!("rank '{rank}' is not in 1-8"),
                ));
            }
        };

        Self::new(file, rank)
    }
}

impl TryFrom<String> for Location {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Location> for String {
    fn from(location: Location) -> Self {
        location.to_string()
    }
}

/// A parsed request to move whatever stands on `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    /// Square the moving piece currently occupies.
    pub from: Location,
    /// Destination square.
    pub to: Location,
}

impl MoveRequest {
    /// Parse a pair of human-entered locations.
    ///
    /// # Errors
    ///
    /// Returns the codec error for whichever side fails to parse first.
    pub fn parse(from: &str, to: &str) -> Result<Self> {
        Ok(Self {
            from: from.parse()?,
            to: to.parse()?,
        })
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
