//! Trick counters and single-seat objectives

use std::fmt;

use super::types::*;

/// Direction of a strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Goal {
    Minimize,
    Maximize,
}

/// Objective of a player: push one seat's trick count up or down
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Strategy {
    pub seat: Seat,
    pub goal: Goal,
}

impl Strategy {
    pub const fn new(seat: Seat, goal: Goal) -> Self {
        Strategy { seat, goal }
    }

    pub const fn minimize(seat: Seat) -> Self {
        Strategy::new(seat, Goal::Minimize)
    }

    pub const fn maximize(seat: Seat) -> Self {
        Strategy::new(seat, Goal::Maximize)
    }

    /// All strategies, seat by seat, minimizing first
    pub fn all() -> impl Iterator<Item = Strategy> {
        (0..NUM_SEATS).flat_map(|seat| [Strategy::minimize(seat), Strategy::maximize(seat)])
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.goal {
            Goal::Minimize => "min",
            Goal::Maximize => "max",
        };
        write!(f, "{}{}", verb, self.seat)
    }
}

/// Tricks won so far, one counter per seat
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score {
    tricks: [u8; NUM_SEATS],
}

impl Score {
    pub const fn new() -> Self {
        Score {
            tricks: [0; NUM_SEATS],
        }
    }

    pub const fn from_tricks(tricks: [u8; NUM_SEATS]) -> Self {
        Score { tricks }
    }

    #[inline]
    pub fn seat(&self, seat: Seat) -> u8 {
        self.tricks[seat]
    }

    #[inline]
    pub fn set_seat(&mut self, seat: Seat, tricks: u8) {
        self.tricks[seat] = tricks;
    }

    /// Credit one trick to the seat. Counts saturate at `u8::MAX`.
    #[inline]
    pub fn increment_seat(&mut self, seat: Seat) {
        self.tricks[seat] = self.tricks[seat].saturating_add(1);
    }

    /// Number of tricks counted across all seats
    pub fn total(&self) -> usize {
        self.tricks.iter().map(|&t| t as usize).sum()
    }

    /// Check if this score is strictly better than `other` for the strategy.
    ///
    /// Only the strategy's seat is compared.
    #[inline]
    pub fn is_higher_under(&self, other: &Score, strategy: Strategy) -> bool {
        let mine = self.tricks[strategy.seat];
        let theirs = other.tricks[strategy.seat];
        match strategy.goal {
            Goal::Minimize => mine < theirs,
            Goal::Maximize => mine > theirs,
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {})",
            self.tricks[0], self.tricks[1], self.tricks[2]
        )
    }
}
