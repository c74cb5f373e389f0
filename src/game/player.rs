use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PLAYER1_COLOR: &str = "red";
pub const DEFAULT_PLAYER2_COLOR: &str = "yellow";

/// Identity of one of the two seats. Never changes during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    One,
    Two,
}

impl PlayerId {
    /// Get the other player
    pub fn other(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// Player number as shown to users (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<PlayerId> {
        match number {
            1 => Some(PlayerId::One),
            2 => Some(PlayerId::Two),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            PlayerId::One => 0,
            PlayerId::Two => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// A seat plus its display color. The color is opaque to the rules engine;
/// the presentation layer decides how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub color: String,
}

impl Player {
    pub fn new(id: PlayerId, color: impl Into<String>) -> Self {
        Player {
            id,
            color: color.into(),
        }
    }
}

/// The pair of players in a session, indexable by [`PlayerId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Players {
    seats: [Player; 2],
}

impl Players {
    pub fn new(player1_color: impl Into<String>, player2_color: impl Into<String>) -> Self {
        Players {
            seats: [
                Player::new(PlayerId::One, player1_color),
                Player::new(PlayerId::Two, player2_color),
            ],
        }
    }

    pub fn get(&self, id: PlayerId) -> &Player {
        &self.seats[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.seats[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter()
    }
}

impl Default for Players {
    fn default() -> Self {
        Players::new(DEFAULT_PLAYER1_COLOR, DEFAULT_PLAYER2_COLOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_player() {
        assert_eq!(PlayerId::One.other(), PlayerId::Two);
        assert_eq!(PlayerId::Two.other(), PlayerId::One);
    }

    #[test]
    fn test_player_number_roundtrip() {
        for id in [PlayerId::One, PlayerId::Two] {
            assert_eq!(PlayerId::from_number(id.number()), Some(id));
        }
        assert_eq!(PlayerId::from_number(0), None);
        assert_eq!(PlayerId::from_number(3), None);
    }

    #[test]
    fn test_player_display() {
        assert_eq!(PlayerId::Two.to_string(), "player 2");
    }

    #[test]
    fn test_players_indexing() {
        let mut players = Players::new("blue", "green");
        assert_eq!(players.get(PlayerId::One).color, "blue");
        assert_eq!(players.get(PlayerId::Two).id, PlayerId::Two);

        players.get_mut(PlayerId::Two).color = "purple".to_string();
        assert_eq!(players.get(PlayerId::Two).color, "purple");
        assert_eq!(players.iter().count(), 2);
    }
}
