use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The accreditation boards a school can be listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Board {
    #[serde(rename = "CBSE")]
    Cbse,
    #[serde(rename = "ICSE")]
    Icse,
    #[serde(rename = "IB")]
    Ib,
    #[serde(rename = "Cambridge")]
    Cambridge,
    #[serde(rename = "State Board")]
    StateBoard,
}

impl Board {
    pub const ALL: [Board; 5] = [
        Board::Cbse,
        Board::Icse,
        Board::Ib,
        Board::Cambridge,
        Board::StateBoard,
    ];

    /// The label stored in the `board` column and shown in the form selector.
    pub fn as_str(&self) -> &'static str {
        match self {
            Board::Cbse => "CBSE",
            Board::Icse => "ICSE",
            Board::Ib => "IB",
            Board::Cambridge => "Cambridge",
            Board::StateBoard => "State Board",
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Board {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::ALL
            .into_iter()
            .find(|board| board.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidBoard(s.to_string()))
    }
}
