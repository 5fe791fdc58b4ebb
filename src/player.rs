//! A seat's hand together with its objective

use std::fmt;

use super::cards::Card;
use super::pack::CardPack;
use super::score::Strategy;
use super::types::*;

/// Player: remaining hand plus strategy. Copied by value on every transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Player {
    hand: CardPack,
    strategy: Strategy,
}

impl Player {
    pub fn new(hand: CardPack, strategy: Strategy) -> Self {
        Player { hand, strategy }
    }

    #[inline]
    pub fn hand(&self) -> &CardPack {
        &self.hand
    }

    #[inline]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    #[inline]
    pub fn has_cards(&self) -> bool {
        !self.hand.is_empty()
    }

    #[inline]
    pub(crate) fn remove_card(&mut self, card: Card) -> bool {
        self.hand.remove(card)
    }

    /// Get playable cards for this player.
    ///
    /// A follower must play the led suit if possible, otherwise a trump if possible,
    /// otherwise anything. The leader (`lead == None`) may play anything: the
    /// must-trump rule binds the second and third hands only, never the lead.
    pub fn valid_moves(&self, lead: Option<Suit>, trump: Option<Suit>) -> CardPack {
        let Some(lead) = lead else {
            return self.hand;
        };

        // Must follow suit if possible
        if self.hand.has_suit(lead) {
            return self.hand.subset(lead);
        }

        // Then must trump
        if let Some(trump) = trump {
            if self.hand.has_suit(trump) {
                return self.hand.subset(trump);
            }
        }

        self.hand
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.strategy, self.hand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(hand: &str) -> Player {
        Player::new(hand.parse().unwrap(), Strategy::maximize(0))
    }

    #[test]
    fn test_leader_plays_anything() {
        let p = player("7♠ 9♣ K♥");
        assert_eq!(p.valid_moves(None, Some(HEART)), *p.hand());
    }

    #[test]
    fn test_must_follow_suit() {
        let p = player("7♠ 9♠ 9♣ K♥");
        assert_eq!(p.valid_moves(Some(SPADE), Some(HEART)).to_string(), "7♠ 9♠");
    }

    #[test]
    fn test_must_trump_when_void() {
        let p = player("9♣ 8♥ K♥");
        assert_eq!(p.valid_moves(Some(SPADE), Some(HEART)).to_string(), "8♥ K♥");
    }

    #[test]
    fn test_discard_anything_when_void_without_trump() {
        let p = player("9♣ 8♦");
        assert_eq!(p.valid_moves(Some(SPADE), Some(HEART)), *p.hand());
        assert_eq!(p.valid_moves(Some(SPADE), None), *p.hand());
    }

    #[test]
    fn test_remove_card_shrinks_hand() {
        let mut p = player("9♣ 8♦");
        assert!(p.remove_card(Card::new(CLUB, NINE)));
        assert!(!p.remove_card(Card::new(CLUB, NINE)));
        assert_eq!(p.hand().len(), 1);
        assert!(p.has_cards());
    }
}
