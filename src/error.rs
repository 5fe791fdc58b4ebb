//! Errors raised while building or driving a game state

use thiserror::Error;

use super::cards::Card;
use super::types::Seat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
    #[error("pack holds at most {max} cards but {found} were given")]
    PackOverflow { found: usize, max: usize },
    #[error("card {0} is present in both packs")]
    OverlappingPacks(Card),
    #[error("unknown card cannot take part in a search")]
    UnknownCard,
    #[error("seat {0} is out of range")]
    InvalidSeat(Seat),
    #[error("seat {seat} cannot play {card}")]
    IllegalMove { seat: Seat, card: Card },
    #[error("cannot parse card from '{0}'")]
    ParseCard(String),
}

pub type Result<T> = std::result::Result<T, Error>;
