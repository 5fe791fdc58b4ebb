//! Best continuation from a decision point

use std::fmt;

use super::cards::Card;
use super::score::{Score, Strategy};

/// Result of solving a state: final score and the line of play leading to it.
///
/// A leaf carries only a score. An aggregator folds in the solved children of a
/// decision point and keeps the one its strategy prefers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path {
    score: Score,
    /// Moves in reverse play order, so prefixing a move is a push
    moves: Vec<Card>,
    strategy: Option<Strategy>,
    valid: bool,
}

impl Path {
    /// Placeholder returned when nothing is known about a state
    pub fn invalid() -> Self {
        Path {
            score: Score::new(),
            moves: Vec::new(),
            strategy: None,
            valid: false,
        }
    }

    /// Terminal result: no moves left to make
    pub fn leaf(score: Score) -> Self {
        Path {
            score,
            moves: Vec::new(),
            strategy: None,
            valid: true,
        }
    }

    /// Decision point; invalid until the first sub-path is added
    pub fn aggregator(strategy: Strategy) -> Self {
        Path {
            score: Score::new(),
            moves: Vec::new(),
            strategy: Some(strategy),
            valid: false,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.valid && self.strategy.is_none()
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn strategy(&self) -> Option<Strategy> {
        self.strategy
    }

    /// Moves in play order
    pub fn moves(&self) -> impl DoubleEndedIterator<Item = Card> + ExactSizeIterator + '_ {
        self.moves.iter().rev().copied()
    }

    /// Number of moves on the path
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The move to make now
    #[inline]
    pub fn first_move(&self) -> Option<Card> {
        self.moves.last().copied()
    }

    /// Fold in the solved continuation reached by playing `card`.
    ///
    /// The first continuation is always taken; later ones replace it only when their
    /// score is strictly better for this path's strategy.
    pub fn add_sub_path(&mut self, card: Card, sub_path: &Path) {
        debug_assert!(sub_path.is_valid(), "folding an unsolved sub-path");
        debug_assert!(self.strategy.is_some(), "only aggregators take sub-paths");

        let adopt = match self.strategy {
            _ if !self.valid => true,
            Some(strategy) => sub_path.score.is_higher_under(&self.score, strategy),
            None => false,
        };
        if adopt {
            self.store_optimal_path(card, sub_path);
        }
    }

    fn store_optimal_path(&mut self, card: Card, sub_path: &Path) {
        self.score = sub_path.score;
        self.moves.clear();
        self.moves.extend_from_slice(&sub_path.moves);
        self.moves.push(card);
        self.valid = true;
    }
}

impl Default for Path {
    fn default() -> Self {
        Path::invalid()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.valid {
            return write!(f, "<unsolved>");
        }
        write!(f, "{}", self.score)?;
        for card in self.moves() {
            write!(f, " {}", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn leaf(tricks: [u8; 3]) -> Path {
        Path::leaf(Score::from_tricks(tricks))
    }

    #[test]
    fn test_validity() {
        assert!(!Path::invalid().is_valid());
        assert!(!Path::aggregator(Strategy::maximize(0)).is_valid());
        let l = leaf([1, 0, 0]);
        assert!(l.is_valid());
        assert!(l.is_leaf());
        assert!(l.is_empty());
        assert_eq!(l.first_move(), None);
    }

    #[test]
    fn test_first_sub_path_is_adopted() {
        let mut path = Path::aggregator(Strategy::minimize(2));
        let card = Card::new(SPADE, ACE);
        path.add_sub_path(card, &leaf([0, 0, 5]));
        assert!(path.is_valid());
        assert!(!path.is_leaf());
        assert_eq!(path.score(), Score::from_tricks([0, 0, 5]));
        assert_eq!(path.first_move(), Some(card));
    }

    #[test]
    fn test_maximize_picks_highest_seat_score() {
        let mut path = Path::aggregator(Strategy::maximize(1));
        let candidates = [
            (Card::new(SPADE, SEVEN), [3, 2, 5]),
            (Card::new(CLUB, EIGHT), [0, 6, 4]),
            (Card::new(DIAMOND, NINE), [6, 4, 0]),
            (Card::new(HEART, ACE), [9, 1, 0]),
        ];
        for (card, tricks) in candidates {
            path.add_sub_path(card, &leaf(tricks));
        }
        assert_eq!(path.score(), Score::from_tricks([0, 6, 4]));
        assert_eq!(path.first_move(), Some(Card::new(CLUB, EIGHT)));
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_ties_keep_earlier_path() {
        let mut path = Path::aggregator(Strategy::minimize(0));
        path.add_sub_path(Card::new(SPADE, SEVEN), &leaf([1, 2, 0]));
        path.add_sub_path(Card::new(SPADE, EIGHT), &leaf([1, 0, 2]));
        assert_eq!(path.first_move(), Some(Card::new(SPADE, SEVEN)));
        assert_eq!(path.score(), Score::from_tricks([1, 2, 0]));
    }

    #[test]
    fn test_moves_are_prefixed() {
        let mut inner = Path::aggregator(Strategy::maximize(0));
        inner.add_sub_path(Card::new(HEART, KING), &leaf([1, 0, 0]));

        let mut outer = Path::aggregator(Strategy::minimize(0));
        outer.add_sub_path(Card::new(SPADE, SEVEN), &inner);

        let moves: Vec<_> = outer.moves().collect();
        assert_eq!(moves, vec![Card::new(SPADE, SEVEN), Card::new(HEART, KING)]);
        assert_eq!(outer.to_string(), "(1, 0, 0) 7♠ K♥");
    }
}
