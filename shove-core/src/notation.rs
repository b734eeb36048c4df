//! Text forms: `P1`, `S`/`M`/`L`, squares as `c3`, placements as `L@c3`.

use std::fmt;
use std::str::FromStr;

use crate::error::NotationError;
use crate::{Placement, Player, Pos, Size};

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0 + 1)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Size::Small => 'S',
            Size::Medium => 'M',
            Size::Large => 'L',
        };
        write!(f, "{}", c)
    }
}

impl FromStr for Size {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Size, NotationError> {
        match s {
            "S" | "s" | "1" => Ok(Size::Small),
            "M" | "m" | "2" => Ok(Size::Medium),
            "L" | "l" | "3" => Ok(Size::Large),
            "" => Err(NotationError::Empty),
            other => Err(NotationError::Size(other.to_string())),
        }
    }
}

/// File letter for the column, rank number for the row (`a1` is row 0, col 0).
impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from_u32(u32::from(b'a') + u32::from(self.col)).unwrap_or('?');
        write!(f, "{}{}", file, self.row as u16 + 1)
    }
}

impl FromStr for Pos {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Pos, NotationError> {
        let bad = || NotationError::Square(s.to_string());
        let mut chars = s.chars();
        let file = chars.next().ok_or(NotationError::Empty)?;
        if !file.is_ascii_lowercase() {
            return Err(bad());
        }
        let rank: u16 = chars.as_str().parse().map_err(|_| bad())?;
        if rank == 0 || rank > 26 {
            return Err(bad());
        }
        Ok(Pos::new(rank as u8 - 1, file as u8 - b'a'))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.size, self.to)
    }
}

impl FromStr for Placement {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Placement, NotationError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(NotationError::Empty);
        }
        let (size, to) = s
            .split_once('@')
            .ok_or_else(|| NotationError::Placement(s.to_string()))?;
        Ok(Placement {
            size: size.parse()?,
            to: to.parse()?,
        })
    }
}
