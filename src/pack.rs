//! Card pack - sorted, fixed-capacity card list
//!
//! Uses a fixed-size array of cards plus a length, no heap allocation.
//! The array is always sorted ascending and holds each real card at most once;
//! only the unknown placeholder may repeat.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};
use std::str::FromStr;

use rand::Rng;

use super::cards::Card;
use super::error::{Error, Result};
use super::types::*;

/// Sorted pack of up to `MAX_CARDS` cards
#[derive(Clone, Copy)]
pub struct CardPack {
    cards: [Card; MAX_CARDS],
    len: u8,
}

impl CardPack {
    /// Create empty pack
    #[inline]
    pub const fn new() -> Self {
        CardPack {
            cards: [Card::UNKNOWN; MAX_CARDS],
            len: 0,
        }
    }

    /// Build a pack from arbitrary cards, sorting them.
    ///
    /// Fails on overflow or when a real card is listed twice.
    pub fn try_from_cards(cards: &[Card]) -> Result<Self> {
        if cards.len() > MAX_CARDS {
            return Err(Error::PackOverflow {
                found: cards.len(),
                max: MAX_CARDS,
            });
        }
        let mut pack = CardPack::new();
        pack.cards[..cards.len()].copy_from_slice(cards);
        pack.len = cards.len() as u8;
        pack.cards[..cards.len()].sort_unstable();

        for pair in pack.as_slice().windows(2) {
            if pair[0] == pair[1] && !pair[0].is_unknown() {
                return Err(Error::DuplicateCard(pair[0]));
            }
        }
        Ok(pack)
    }

    /// The full 32-card deck, 7 to Ace in every suit
    pub fn preferans_deck() -> Self {
        let mut pack = CardPack::new();
        for suit in 0..NUM_SUITS {
            for rank in PREFERANS_RANKS {
                pack.cards[pack.len()] = Card::new(suit, rank);
                pack.len += 1;
            }
        }
        pack
    }

    /// Count number of cards
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Card] {
        &self.cards[..self.len()]
    }

    /// Get card by index (0 = lowest)
    #[inline]
    pub fn card(&self, i: usize) -> Card {
        self.as_slice()[i]
    }

    #[inline]
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Card>> {
        self.as_slice().iter().copied()
    }

    /// Check if a card is present
    #[inline]
    pub fn has_card(&self, card: Card) -> bool {
        self.as_slice().binary_search(&card).is_ok()
    }

    /// Check if any card of the suit is present
    #[inline]
    pub fn has_suit(&self, suit: Suit) -> bool {
        suit < NUM_SUITS && self.iter().any(|card| card.suit() == suit)
    }

    pub fn has_unknown_cards(&self) -> bool {
        self.iter().any(Card::is_unknown)
    }

    /// Insert a single card, keeping the pack sorted
    pub fn insert(&mut self, card: Card) -> Result<()> {
        let pos = match self.as_slice().binary_search(&card) {
            Ok(_) if !card.is_unknown() => return Err(Error::DuplicateCard(card)),
            Ok(pos) | Err(pos) => pos,
        };
        if self.len() == MAX_CARDS {
            return Err(Error::PackOverflow {
                found: MAX_CARDS + 1,
                max: MAX_CARDS,
            });
        }
        let len = self.len();
        self.cards.copy_within(pos..len, pos + 1);
        self.cards[pos] = card;
        self.len += 1;
        Ok(())
    }

    /// Remove a single card. Returns false if the card was not in the pack.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.as_slice().binary_search(&card) {
            Ok(pos) => {
                let len = self.len();
                self.cards.copy_within(pos + 1..len, pos);
                self.cards[len - 1] = Card::UNKNOWN;
                self.len -= 1;
                true
            }
            Err(_) => false,
        }
    }

    /// Get cards in a specific suit
    pub fn subset(&self, suit: Suit) -> CardPack {
        let mut res = CardPack::new();
        for card in self.iter().filter(|card| card.suit() == suit) {
            res.cards[res.len()] = card;
            res.len += 1;
        }
        res
    }

    /// Pack holding a single card
    pub fn single(card: Card) -> Self {
        let mut pack = CardPack::new();
        pack.cards[0] = card;
        pack.len = 1;
        pack
    }

    /// Union of two disjoint packs. Fails if a card is present in both.
    pub fn checked_union(&self, other: &CardPack) -> Result<CardPack> {
        if let Some(card) = self
            .iter()
            .find(|&card| !card.is_unknown() && other.has_card(card))
        {
            return Err(Error::OverlappingPacks(card));
        }
        if self.len() + other.len() > MAX_CARDS {
            return Err(Error::PackOverflow {
                found: self.len() + other.len(),
                max: MAX_CARDS,
            });
        }
        Ok(self.merge_disjoint(other))
    }

    /// Merge two sorted packs already known to be disjoint
    pub(crate) fn merge_disjoint(&self, other: &CardPack) -> CardPack {
        let mut res = CardPack::new();
        let (left, right) = (self.as_slice(), other.as_slice());
        let (mut i, mut j) = (0, 0);
        while i < left.len() || j < right.len() {
            let take_left = match (left.get(i), right.get(j)) {
                (Some(l), Some(r)) => l <= r,
                (Some(_), None) => true,
                _ => false,
            };
            let next = if take_left {
                i += 1;
                left[i - 1]
            } else {
                j += 1;
                right[j - 1]
            };
            res.cards[res.len()] = next;
            res.len += 1;
        }
        res
    }

    /// Cards of this pack that are not present in `other`
    pub fn difference(&self, other: &CardPack) -> CardPack {
        let mut res = CardPack::new();
        for card in self.iter().filter(|&card| !other.has_card(card)) {
            res.cards[res.len()] = card;
            res.len += 1;
        }
        res
    }

    /// Check whether two cards are equivalent with respect to this pack.
    ///
    /// Equivalent cards share a suit and sit next to each other here, so no card of
    /// this pack ranks strictly between them.
    pub fn are_equivalent(&self, left: Card, right: Card) -> bool {
        if left.suit() != right.suit() {
            return false;
        }
        let cards = self.as_slice();
        match (cards.binary_search(&left), cards.binary_search(&right)) {
            (Ok(l), Ok(r)) => l.abs_diff(r) == 1,
            _ => false,
        }
    }

    /// Collapse runs of equivalent cards down to the highest card of each run.
    ///
    /// `reference` is the set of cards still live this trick; it must contain every card
    /// of this pack.
    pub fn filter_out_equivalent(&mut self, reference: &CardPack) {
        let len = self.len();
        if len <= 1 {
            return;
        }

        let mut kept = 0;
        for idx in 0..len - 1 {
            let card = self.cards[idx];
            if reference.are_equivalent(card, self.cards[idx + 1]) {
                continue;
            }
            self.cards[kept] = card;
            kept += 1;
        }
        self.cards[kept] = self.cards[len - 1];
        kept += 1;

        for slot in &mut self.cards[kept..len] {
            *slot = Card::UNKNOWN;
        }
        self.len = kept as u8;
    }

    /// Move `count` randomly chosen cards out of this pack into a new one.
    ///
    /// Asking for more cards than the pack holds extracts all of them.
    pub fn extract_random_cards<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> CardPack {
        let count = count.min(self.len());
        let mut extracted = CardPack::new();
        for idx in rand::seq::index::sample(rng, self.len(), count).iter() {
            extracted.cards[extracted.len()] = self.cards[idx];
            extracted.len += 1;
        }
        let n = extracted.len();
        extracted.cards[..n].sort_unstable();

        *self = self.difference(&extracted);
        extracted
    }
}

impl Default for CardPack {
    fn default() -> Self {
        CardPack::new()
    }
}

impl PartialEq for CardPack {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for CardPack {}

impl Hash for CardPack {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

/// Packs order by card count first, then card by card.
impl Ord for CardPack {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len
            .cmp(&other.len)
            .then_with(|| self.as_slice().cmp(other.as_slice()))
    }
}

impl PartialOrd for CardPack {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for CardPack {
    type Output = Result<CardPack>;

    fn add(self, rhs: CardPack) -> Self::Output {
        self.checked_union(&rhs)
    }
}

impl Sub for CardPack {
    type Output = CardPack;

    fn sub(self, rhs: CardPack) -> Self::Output {
        self.difference(&rhs)
    }
}

impl<'a> IntoIterator for &'a CardPack {
    type Item = Card;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Card>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for CardPack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for CardPack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardPack({})", self)
    }
}

impl FromStr for CardPack {
    type Err = Error;

    /// Parse whitespace separated cards, e.g. "J♠ Q♠ 7♣"
    fn from_str(s: &str) -> Result<Self> {
        let cards = s
            .split_whitespace()
            .map(str::parse::<Card>)
            .collect::<Result<Vec<_>>>()?;
        CardPack::try_from_cards(&cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pack(s: &str) -> CardPack {
        s.parse().expect("valid pack")
    }

    #[test]
    fn test_pack_sorted_on_build() {
        let p = pack("A♥ 7♠ K♣ 8♠");
        assert_eq!(p.len(), 4);
        assert_eq!(p.to_string(), "7♠ 8♠ K♣ A♥");
    }

    #[test]
    fn test_pack_rejects_duplicates_and_overflow() {
        assert_eq!(
            "7♠ 7♠".parse::<CardPack>(),
            Err(Error::DuplicateCard(Card::new(SPADE, SEVEN)))
        );
        let many = vec![Card::UNKNOWN; MAX_CARDS + 1];
        assert!(matches!(
            CardPack::try_from_cards(&many),
            Err(Error::PackOverflow { .. })
        ));
        // Unknown placeholders may repeat
        let p = CardPack::try_from_cards(&[Card::UNKNOWN, Card::UNKNOWN]).unwrap();
        assert!(p.has_unknown_cards());
    }

    #[test]
    fn test_pack_insert_remove() {
        let mut p = pack("7♠ A♥");
        p.insert(Card::new(CLUB, JACK)).unwrap();
        assert_eq!(p.to_string(), "7♠ J♣ A♥");
        assert!(p.insert(Card::new(CLUB, JACK)).is_err());

        assert!(p.remove(Card::new(SPADE, SEVEN)));
        assert!(!p.remove(Card::new(SPADE, SEVEN)));
        assert_eq!(p.to_string(), "J♣ A♥");
    }

    #[test]
    fn test_pack_subset_and_suits() {
        let p = pack("7♠ 9♠ 8♦ A♥");
        assert_eq!(p.subset(SPADE).to_string(), "7♠ 9♠");
        assert!(p.subset(CLUB).is_empty());
        assert!(p.has_suit(DIAMOND));
        assert!(!p.has_suit(CLUB));
        assert!(!p.has_suit(UNKNOWN_SUIT));
        assert!(p.has_card(Card::new(HEART, ACE)));
    }

    #[test]
    fn test_pack_union() {
        let a = pack("7♠ K♦");
        let b = pack("8♠ A♥");
        let u = (a + b).unwrap();
        assert_eq!(u.to_string(), "7♠ 8♠ K♦ A♥");

        let c = pack("K♦");
        assert_eq!(
            a + c,
            Err(Error::OverlappingPacks(Card::new(DIAMOND, KING)))
        );
    }

    #[test]
    fn test_pack_difference() {
        let a = pack("7♠ 8♠ K♦ A♥");
        let b = pack("8♠ A♥ Q♣");
        assert_eq!((a - b).to_string(), "7♠ K♦");
    }

    #[test]
    fn test_pack_order_count_first() {
        let short = pack("A♥");
        let long = pack("7♠ 8♠");
        assert!(short < long);
        assert!(pack("7♠ 9♠") < pack("8♠ 9♠"));
        assert_eq!(pack("7♠ 9♠").cmp(&pack("9♠ 7♠")), Ordering::Equal);
    }

    #[test]
    fn test_are_equivalent() {
        let reference = pack("7♠ 8♠ 1♠ A♠ 7♣");
        let seven = Card::new(SPADE, SEVEN);
        let eight = Card::new(SPADE, EIGHT);
        let ten = Card::new(SPADE, TEN);
        let ace = Card::new(SPADE, ACE);

        assert!(reference.are_equivalent(seven, eight));
        assert!(reference.are_equivalent(eight, ten));
        assert!(reference.are_equivalent(ten, ace));
        assert!(!reference.are_equivalent(seven, ten));
        // Different suits are never equivalent even when adjacent
        assert!(!reference.are_equivalent(ace, Card::new(CLUB, SEVEN)));
        // Cards missing from the reference are not equivalent
        assert!(!reference.are_equivalent(ace, Card::new(SPADE, NINE)));
    }

    #[test]
    fn test_are_equivalent_symmetric() {
        let reference = pack("7♠ 8♠ 1♠ A♠ 7♣ 9♣ J♦");
        let cards: Vec<Card> = reference.iter().collect();
        for &a in &cards {
            for &b in &cards {
                assert_eq!(reference.are_equivalent(a, b), reference.are_equivalent(b, a));
            }
        }
    }

    #[test]
    fn test_filter_out_equivalent() {
        // 9♠ sits between 8♠ and 1♠ in the live cards, Q♠ between J♠ and K♠
        let reference = pack("7♠ 8♠ 9♠ 1♠ J♠ K♠ Q♠ A♠ 7♣ 8♣");
        let mut hand = pack("7♠ 8♠ 1♠ J♠ K♠ A♠ 7♣ 8♣");
        hand.filter_out_equivalent(&reference);
        assert_eq!(hand.to_string(), "8♠ J♠ A♠ 8♣");
    }

    #[test]
    fn test_filter_keeps_small_packs() {
        let reference = pack("7♠ 8♠");
        let mut empty = CardPack::new();
        empty.filter_out_equivalent(&reference);
        assert!(empty.is_empty());

        let mut single = pack("8♠");
        single.filter_out_equivalent(&reference);
        assert_eq!(single.to_string(), "8♠");
    }

    #[test]
    fn test_filter_is_idempotent() {
        let reference = pack("7♠ 8♠ 9♠ 1♠ J♠ Q♠ K♠ A♠ 7♦ 9♦ 1♦ J♦");
        let mut hand = pack("7♠ 8♠ 1♠ Q♠ K♠ 7♦ 9♦ J♦");
        hand.filter_out_equivalent(&reference);
        let once = hand;
        hand.filter_out_equivalent(&reference);
        assert_eq!(hand, once);
        assert_eq!(once.to_string(), "8♠ 1♠ K♠ 9♦ J♦");
    }

    #[test]
    fn test_preferans_deck() {
        let deck = CardPack::preferans_deck();
        assert_eq!(deck.len(), MAX_CARDS);
        assert_eq!(deck.subset(HEART).len(), 8);
        assert_eq!(deck.card(0), Card::new(SPADE, SEVEN));
        assert_eq!(deck.card(MAX_CARDS - 1), Card::new(HEART, ACE));
    }

    #[test]
    fn test_extract_random_cards() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut deck = CardPack::preferans_deck();
        let hand = deck.extract_random_cards(10, &mut rng);
        assert_eq!(hand.len(), 10);
        assert_eq!(deck.len(), MAX_CARDS - 10);
        assert!((hand + deck).is_ok());
        assert!(hand.as_slice().windows(2).all(|w| w[0] < w[1]));

        let rest = deck.extract_random_cards(100, &mut rng);
        assert_eq!(rest.len(), MAX_CARDS - 10);
        assert!(deck.is_empty());
    }
}
