//! Board square representation.

use crate::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced when building a [`Square`] from user input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SquareError {
    #[error("invalid file '{0}': expected a-h")]
    InvalidFile(char),

    #[error("invalid rank {0}: expected 1-8")]
    InvalidRank(u8),

    #[error("invalid square '{0}'")]
    InvalidNotation(String),
}

/// A file (column), a to h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    /// All files, a first.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// File at zero-based `index`, if below 8.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// File named by a letter, either case.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() {
            Self::from_index(c as u8 - b'a')
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row), 1 to 8. `R1` is White's home rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
    R8,
}

impl Rank {
    /// All ranks, rank 1 first.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Rank at zero-based `index`, if below 8.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Rank named by a digit '1' to '8'.
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_digit() && c != '0' {
            Self::from_index(c as u8 - b'1')
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// The number printed on the board edge, 1 to 8.
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A square on the chess board, indexed 0-63.
///
/// Squares are indexed in little-endian rank-file mapping:
/// - a1 = 0, b1 = 1, ..., h1 = 7
/// - a2 = 8, ..., h8 = 63
///
/// Serialized as its algebraic name ("e4").
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 8 + file.index())
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Creates a square from a file letter (case-insensitive) and a rank number 1-8.
    pub fn from_file_rank(file: char, rank: u8) -> Result<Self, SquareError> {
        let file = match File::from_char(file) {
            Some(f) => f,
            None => return Err(SquareError::InvalidFile(file)),
        };
        if rank < 1 || rank > 8 {
            return Err(SquareError::InvalidRank(rank));
        }
        match Rank::from_index(rank - 1) {
            Some(r) => Ok(Square::new(file, r)),
            None => Err(SquareError::InvalidRank(rank)),
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Parses a square from algebraic notation, reporting what was wrong.
    pub fn parse(s: &str) -> Result<Self, SquareError> {
        Self::from_algebraic(s).ok_or_else(|| SquareError::InvalidNotation(s.to_string()))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        match File::from_index(self.0 % 8) {
            Some(f) => f,
            None => unreachable!(),
        }
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        match Rank::from_index(self.0 / 8) {
            Some(r) => r,
            None => unreachable!(),
        }
    }

    /// Returns the square offset by the given number of files and ranks,
    /// or `None` if that falls off the board.
    #[inline]
    pub const fn relative(self, d_file: i8, d_rank: i8) -> Option<Self> {
        let file = (self.0 % 8) as i8 + d_file;
        let rank = (self.0 / 8) as i8 + d_rank;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            None
        } else {
            Some(Square((rank * 8 + file) as u8))
        }
    }

    /// Returns the compact `10 * file + rank` encoding, both 1-based (a1 = 11, h8 = 88).
    #[inline]
    pub const fn packed(self) -> u8 {
        (self.file().index() + 1) * 10 + self.rank().number()
    }

    /// Returns the color of the tile; a1 is dark.
    #[inline]
    pub const fn tile_color(self) -> Color {
        let digits = self.packed() / 10 + self.packed() % 10;
        if digits % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    // Squares the castling rules refer to
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

impl std::str::FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::parse(s)
    }
}

impl TryFrom<String> for Square {
    type Error = SquareError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Square::parse(&s)
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> String {
        sq.to_algebraic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn file_and_rank_chars() {
        assert_eq!(File::from_char('c'), Some(File::C));
        assert_eq!(File::from_char('H'), Some(File::H));
        assert_eq!(File::from_char('i'), None);
        assert_eq!(File::from_char('1'), None);
        assert_eq!(Rank::from_char('8'), Some(Rank::R8));
        assert_eq!(Rank::from_char('0'), None);
        assert_eq!(Rank::from_char('9'), None);
        for file in File::ALL {
            assert_eq!(File::from_char(file.to_char()), Some(file));
        }
        for rank in Rank::ALL {
            assert_eq!(Rank::from_char(rank.to_char()), Some(rank));
        }
    }

    #[test]
    fn square_new() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(e4.index(), 28);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(
            Square::from_algebraic("e4"),
            Some(Square::new(File::E, Rank::R4))
        );
        assert_eq!(Square::from_algebraic("H8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_from_file_rank() {
        assert_eq!(Square::from_file_rank('e', 4), Square::parse("e4"));
        assert_eq!(Square::from_file_rank('E', 4), Square::parse("e4"));
        assert_eq!(
            Square::from_file_rank('i', 4),
            Err(SquareError::InvalidFile('i'))
        );
        assert_eq!(
            Square::from_file_rank('a', 0),
            Err(SquareError::InvalidRank(0))
        );
        assert_eq!(
            Square::from_file_rank('a', 9),
            Err(SquareError::InvalidRank(9))
        );
    }

    #[test]
    fn square_parse_error() {
        assert_eq!(
            Square::parse("z9"),
            Err(SquareError::InvalidNotation("z9".to_string()))
        );
        assert_eq!("c6".parse::<Square>().unwrap().to_algebraic(), "c6");
    }

    #[test]
    fn square_relative() {
        let e4 = Square::parse("e4").unwrap();
        assert_eq!(e4.relative(1, 2), Square::from_algebraic("f6"));
        assert_eq!(e4.relative(-4, -3), Some(Square::A1));
        assert_eq!(Square::A1.relative(-1, 0), None);
        assert_eq!(Square::H8.relative(0, 1), None);
        assert_eq!(Square::H1.relative(1, 0), None);
    }

    #[test]
    fn square_packed() {
        assert_eq!(Square::A1.packed(), 11);
        assert_eq!(Square::H8.packed(), 88);
        assert_eq!(Square::parse("e4").unwrap().packed(), 54);
    }

    #[test]
    fn tile_colors_match_a_real_board() {
        assert_eq!(Square::A1.tile_color(), Color::Black);
        assert_eq!(Square::H1.tile_color(), Color::White);
        assert_eq!(Square::A8.tile_color(), Color::White);
        assert_eq!(Square::H8.tile_color(), Color::Black);
        assert_eq!(Square::D1.tile_color(), Color::White);
        assert_eq!(Square::E1.tile_color(), Color::Black);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::A1.to_algebraic(), "a1");
        assert_eq!(Square::H8.to_algebraic(), "h8");
        assert_eq!(Square::new(File::E, Rank::R4).to_algebraic(), "e4");
    }

    #[test]
    fn square_serde_as_string() {
        let e4 = Square::parse("e4").unwrap();
        assert_eq!(serde_json::to_string(&e4).unwrap(), "\"e4\"");
        let back: Square = serde_json::from_str("\"e4\"").unwrap();
        assert_eq!(back, e4);
        assert!(serde_json::from_str::<Square>("\"e9\"").is_err());
    }

    proptest! {
        #[test]
        fn neighbouring_tiles_alternate(index in 0u8..64) {
            let sq = Square::from_index(index).unwrap();
            if let Some(right) = sq.relative(1, 0) {
                prop_assert_ne!(sq.tile_color(), right.tile_color());
            }
            if let Some(up) = sq.relative(0, 1) {
                prop_assert_ne!(sq.tile_color(), up.tile_color());
            }
        }

        #[test]
        fn relative_is_reversible(index in 0u8..64, df in -7i8..=7, dr in -7i8..=7) {
            let sq = Square::from_index(index).unwrap();
            if let Some(moved) = sq.relative(df, dr) {
                prop_assert_eq!(moved.relative(-df, -dr), Some(sq));
            }
        }
    }
}
