use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use crate::grid::{Point, GRID_HEIGHT, GRID_WIDTH, NUM_TILES};

#[derive(Error, Debug, Eq, PartialEq)]
pub enum TileParseError {
    #[error("string is the wrong length")]
    WrongLength,
    #[error("string ends with an invalid letter")]
    InvalidLetter,
    #[error("string starts with an invalid number")]
    InvalidNumber,
    #[error("row {0} has no letter")]
    InvalidRow(i8),
}

/// One of the 108 board cells, numbered row-major from the top left.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Tile(u8);

impl Tile {
    pub fn new(x: i8, y: i8) -> Self {
        debug_assert!(Point { x, y }.is_in_bounds(), "tile out of bounds ({x}, {y})");
        Self(y as u8 * GRID_WIDTH + x as u8)
    }

    pub fn from_point(pt: Point) -> Option<Self> {
        if pt.is_in_bounds() {
            Some(Self::new(pt.x, pt.y))
        } else {
            None
        }
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        if idx < NUM_TILES {
            Some(Self(idx as u8))
        } else {
            None
        }
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn pos(&self) -> Point {
        Point {
            x: (self.0 % GRID_WIDTH) as i8,
            y: (self.0 / GRID_WIDTH) as i8,
        }
    }

    /// Every tile on the board, in board order.
    pub fn all() -> impl Iterator<Item = Tile> {
        (0..NUM_TILES as u8).map(Tile)
    }
}

impl TryFrom<&str> for Tile {
    type Error = TileParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.len() < 2 || value.len() > 3 || !value.is_ascii() {
            return Err(TileParseError::WrongLength);
        }

        let (column, row) = value.split_at(value.len() - 1);

        let y = row.chars().next().ok_or(TileParseError::InvalidLetter).and_then(map_letter_to_i8)?;

        // no sign and no leading zero
        if column.starts_with('0') || !column.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TileParseError::InvalidNumber);
        }

        let x = i8::from_str(column).map_err(|_| TileParseError::InvalidNumber)?;

        if x < 1 || x > GRID_WIDTH as i8 {
            return Err(TileParseError::InvalidNumber);
        }

        if y > GRID_HEIGHT as i8 {
            return Err(TileParseError::InvalidLetter);
        }

        Ok(Tile::new(x - 1, y - 1))
    }
}

impl Debug for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_string().as_str())
    }
}

impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let pt = self.pos();
        if let Ok(y) = map_i8_to_letter(pt.y + 1) {
            f.write_fmt(format_args!("{}{}", pt.x + 1, y))
        } else {
            f.write_fmt(format_args!("{}?", pt.x + 1))
        }
    }
}

pub fn map_letter_to_i8(letter: char) -> Result<i8, TileParseError> {
    match letter {
        'A'..='Z' => {
            Ok((letter as u8 - b'A') as i8 + 1)
        }
        _ => Err(TileParseError::InvalidLetter)
    }
}

pub fn map_i8_to_letter(value: i8) -> Result<char, TileParseError> {
    match value {
        1..=26 => {
            Ok((b'A' + (value - 1) as u8) as char)
        }
        _ => Err(TileParseError::InvalidRow(value))
    }
}

/// Builds a [`Tile`] from a literal such as `"1A"`, panicking on a bad literal.
/// Intended for tests and fixtures.
#[macro_export]
macro_rules! tile {
    ($tile:literal) => {
        $crate::tile::Tile::try_from($tile).expect("a valid tile string")
    };
}
