//! Card representation
//!
//! A card is packed into one byte: suit in the high nibble, rank in the low nibble.
//! The natural integer order is therefore "suit first, then rank", which is the
//! order every pack is kept sorted in.

use std::fmt;
use std::str::FromStr;

use super::error::Error;
use super::types::*;

const SUIT_SHIFT: u8 = 4;
const RANK_MASK: u8 = 0x0f;

/// A single card
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u8);

impl Card {
    /// Placeholder for a card that is not known yet. Never part of a search state.
    pub const UNKNOWN: Card = Card::new(UNKNOWN_SUIT, UNKNOWN_RANK);

    /// Make a card from suit and rank
    #[inline]
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Card((((suit as u8) & RANK_MASK) << SUIT_SHIFT) | ((rank as u8) & RANK_MASK))
    }

    /// Get suit of the card
    #[inline]
    pub fn suit(self) -> Suit {
        (self.0 >> SUIT_SHIFT) as Suit
    }

    /// Get rank of the card
    #[inline]
    pub fn rank(self) -> Rank {
        (self.0 & RANK_MASK) as Rank
    }

    /// Get raw packed value
    #[inline]
    pub fn value(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_unknown(self) -> bool {
        self.suit() >= NUM_SUITS || self.rank() >= NUM_RANKS
    }

    /// Check whether this card beats `reference` in a trick.
    ///
    /// A trump beats any non-trump; otherwise only a higher card of the
    /// reference's suit wins. A card of a third suit never wins.
    #[inline]
    pub fn beats(self, reference: Card, trump: Option<Suit>) -> bool {
        if let Some(trump) = trump {
            if self.suit() == trump {
                return reference.suit() != trump || self.rank() > reference.rank();
            }
            if reference.suit() == trump {
                return false;
            }
        }
        self.suit() == reference.suit() && self.rank() > reference.rank()
    }
}

impl Default for Card {
    fn default() -> Self {
        Card::UNKNOWN
    }
}

/// Relative position (0..3) of the card that takes a completed trick.
///
/// `cards` are in play order, `cards[0]` being the lead. Each card is compared
/// with the card winning so far.
pub fn calc_trick_winner(cards: &[Card; NUM_SEATS], trump: Option<Suit>) -> usize {
    let mut winner = 0;
    for (i, &card) in cards.iter().enumerate().skip(1) {
        if card.beats(cards[winner], trump) {
            winner = i;
        }
    }
    winner
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "??");
        }
        write!(f, "{}{}", rank_name(self.rank()), suit_symbol(self.suit()))
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FromStr for Card {
    type Err = Error;

    /// Parse rank symbol followed by suit symbol, e.g. "Q♠", "1$", "10H", "AS".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text == "??" {
            return Ok(Card::UNKNOWN);
        }
        let body = text.strip_prefix("10").map(|rest| ("1", rest));
        let (rank_str, suit_str) = match body {
            Some(split) => split,
            None => {
                let mut chars = text.char_indices();
                match (chars.next(), chars.next()) {
                    (Some(_), Some((idx, _))) => text.split_at(idx),
                    _ => return Err(Error::ParseCard(s.to_string())),
                }
            }
        };

        let mut rank_chars = rank_str.chars();
        let mut suit_chars = suit_str.chars();
        match (
            rank_chars.next(),
            rank_chars.next(),
            suit_chars.next(),
            suit_chars.next(),
        ) {
            (Some(r), None, Some(su), None) => match (char_to_rank(r), char_to_suit(su)) {
                (Some(rank), Some(suit)) => Ok(Card::new(suit, rank)),
                _ => Err(Error::ParseCard(s.to_string())),
            },
            _ => Err(Error::ParseCard(s.to_string())),
        }
    }
}
