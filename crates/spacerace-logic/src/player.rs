//! The two sides of the space race.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Player {
    Usa = 0,
    Soviet = 1,
}

impl Player {
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Usa),
            1 => Some(Self::Soviet),
            _ => None,
        }
    }

    /// Prefix used in voice clip file names.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Self::Usa => "usa",
            Self::Soviet => "sov",
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Self::Usa => Self::Soviet,
            Self::Soviet => Self::Usa,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_roundtrip() {
        for i in 0..2u8 {
            let p = Player::from_u8(i).unwrap();
            assert_eq!(p as u8, i);
        }
        assert!(Player::from_u8(2).is_none());
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::Usa.opponent(), Player::Soviet);
        assert_eq!(Player::Soviet.opponent().opponent(), Player::Soviet);
    }
}
