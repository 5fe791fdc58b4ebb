//! Game state: three hands, the trick in progress and the running score
//!
//! The trick state machine lives here. A state is a value: cloning it copies the
//! players, while the pack of cards live this trick is shared between every state
//! derived inside the same trick.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use super::cards::{calc_trick_winner, Card};
use super::error::{Error, Result};
use super::pack::CardPack;
use super::player::Player;
use super::score::{Score, Strategy};
use super::types::*;

/// Everything that identifies a state for the transposition table.
///
/// Field order is the comparison order: cards on the table (count, then cards),
/// hands, strategies, active seat, score, trump, leading suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey {
    table_len: u8,
    table: [Card; NUM_SEATS],
    hands: [CardPack; NUM_SEATS],
    strategies: [Strategy; NUM_SEATS],
    active: Seat,
    score: Score,
    trump: Option<Suit>,
    lead: Option<Suit>,
}

#[derive(Clone, Debug)]
pub struct GameState {
    players: [Player; NUM_SEATS],
    active: Seat,
    trump: Option<Suit>,
    lead: Option<Suit>,
    /// Cards of the current trick in play order; unused slots hold `Card::UNKNOWN`
    table: [Card; NUM_SEATS],
    table_len: usize,
    score: Score,
    /// Cards live this trick, created by the trick's first state
    live: Option<Rc<CardPack>>,
}

impl GameState {
    /// Create a state at the start of a deal: seat 0 to lead, no trump, zero score.
    ///
    /// Hands must be disjoint and hold real cards only, and every strategy must
    /// name one of the three seats.
    pub fn new(players: [Player; NUM_SEATS]) -> Result<Self> {
        let mut all = CardPack::new();
        for player in &players {
            if player.strategy().seat >= NUM_SEATS {
                return Err(Error::InvalidSeat(player.strategy().seat));
            }
            if player.hand().has_unknown_cards() {
                return Err(Error::UnknownCard);
            }
            all = all.checked_union(player.hand())?;
        }

        Ok(GameState {
            players,
            active: 0,
            trump: None,
            lead: None,
            table: [Card::UNKNOWN; NUM_SEATS],
            table_len: 0,
            score: Score::new(),
            live: None,
        })
    }

    /// Create a state from three hands and their strategies
    pub fn from_hands(hands: [CardPack; NUM_SEATS], strategies: [Strategy; NUM_SEATS]) -> Result<Self> {
        let players = [
            Player::new(hands[0], strategies[0]),
            Player::new(hands[1], strategies[1]),
            Player::new(hands[2], strategies[2]),
        ];
        GameState::new(players)
    }

    /// Set trump suit. Anything outside the four suits means no trump.
    pub fn with_trump(mut self, trump: Option<Suit>) -> Self {
        self.trump = trump.filter(|&suit| suit < NUM_SUITS);
        self
    }

    /// Set the score the deal resumes from
    pub fn with_score(mut self, score: Score) -> Self {
        self.score = score;
        self
    }

    pub fn with_active_player(mut self, seat: Seat) -> Result<Self> {
        self.set_active_player(seat)?;
        Ok(self)
    }

    pub fn set_active_player(&mut self, seat: Seat) -> Result<()> {
        if seat >= NUM_SEATS {
            return Err(Error::InvalidSeat(seat));
        }
        self.active = seat;
        Ok(())
    }

    #[inline]
    pub fn active_player(&self) -> Seat {
        self.active
    }

    #[inline]
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat]
    }

    #[inline]
    pub fn players(&self) -> &[Player; NUM_SEATS] {
        &self.players
    }

    #[inline]
    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }

    /// Suit of the first card of the current trick, if any
    #[inline]
    pub fn lead_suit(&self) -> Option<Suit> {
        self.lead
    }

    /// Cards of the current trick in play order
    #[inline]
    pub fn table(&self) -> &[Card] {
        &self.table[..self.table_len]
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    /// No more moves: the player to act holds no cards
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !self.players[self.active].has_cards()
    }

    /// Cards still in play: all three hands plus the current trick
    pub fn cards_left(&self) -> CardPack {
        let mut all = CardPack::new();
        for player in &self.players {
            all = all.merge_disjoint(player.hand());
        }
        for &card in self.table() {
            all = all.merge_disjoint(&CardPack::single(card));
        }
        all
    }

    /// Shared snapshot of the cards live this trick, if the trick has started one
    #[inline]
    pub fn live_cards(&self) -> Option<&Rc<CardPack>> {
        self.live.as_ref()
    }

    /// Take the live-cards snapshot for a trick that has not started yet.
    ///
    /// Every state cloned from this one until the trick completes shares it.
    pub(crate) fn start_trick(&mut self) {
        if self.table_len == 0 {
            self.live = Some(Rc::new(self.cards_left()));
        }
    }

    /// Cards the active player may legally play, before equivalence pruning
    pub fn legal_moves(&self) -> CardPack {
        self.players[self.active].valid_moves(self.lead, self.trump)
    }

    /// Legal moves with equivalent cards collapsed against the live cards of the trick
    pub fn active_player_valid_moves(&self) -> CardPack {
        let mut moves = self.legal_moves();
        match &self.live {
            Some(live) => moves.filter_out_equivalent(live),
            None => moves.filter_out_equivalent(&self.cards_left()),
        }
        moves
    }

    /// Play a card for the active player, checking that the move is legal
    pub fn play(&mut self, card: Card) -> Result<()> {
        if !self.legal_moves().has_card(card) {
            return Err(Error::IllegalMove {
                seat: self.active,
                card,
            });
        }
        self.apply(card);
        Ok(())
    }

    /// State transition for a card known to be legal
    pub(crate) fn apply(&mut self, card: Card) {
        let removed = self.players[self.active].remove_card(card);
        debug_assert!(removed, "seat {} does not hold {}", self.active, card);

        self.table[self.table_len] = card;
        self.table_len += 1;
        self.active = next_seat(self.active);

        // First card of a trick always fixes the leading suit
        if self.table_len == 1 {
            self.lead = Some(card.suit());
        }

        if self.table_len == NUM_SEATS {
            // Three moves later the turn is back with the leader
            let leader = self.active;
            let winner = (leader + calc_trick_winner(&self.table, self.trump)) % NUM_SEATS;
            self.score.increment_seat(winner);

            self.table = [Card::UNKNOWN; NUM_SEATS];
            self.table_len = 0;
            self.lead = None;
            self.live = None;
            self.active = winner;
        }
    }

    /// Cache key for this state
    pub fn key(&self) -> StateKey {
        StateKey {
            table_len: self.table_len as u8,
            table: self.table,
            hands: [
                *self.players[0].hand(),
                *self.players[1].hand(),
                *self.players[2].hand(),
            ],
            strategies: [
                self.players[0].strategy(),
                self.players[1].strategy(),
                self.players[2].strategy(),
            ],
            active: self.active,
            score: self.score,
            trump: self.trump,
            lead: self.lead,
        }
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for GameState {}

impl Ord for GameState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for GameState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (seat, player) in self.players.iter().enumerate() {
            writeln!(f, "{}: {}", seat, player)?;
        }
        if let Some(trump) = self.trump {
            writeln!(f, "Trump: {}", suit_name(trump))?;
        }
        if self.table_len > 0 {
            write!(f, "Table:")?;
            for card in self.table() {
                write!(f, " {}", card)?;
            }
            writeln!(f)?;
        }
        write!(f, "Score: {} Active player: {}", self.score, self.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    fn hands_of(s: &GameState) -> [CardPack; NUM_SEATS] {
        [*s.player(0).hand(), *s.player(1).hand(), *s.player(2).hand()]
    }

    fn state(p0: &str, p1: &str, p2: &str) -> GameState {
        GameState::from_hands(
            [p0.parse().unwrap(), p1.parse().unwrap(), p2.parse().unwrap()],
            [Strategy::maximize(0), Strategy::minimize(0), Strategy::minimize(0)],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_overlapping_hands() {
        let err = GameState::from_hands(
            ["7♠ 8♠".parse().unwrap(), "8♠".parse().unwrap(), CardPack::new()],
            [Strategy::maximize(0); NUM_SEATS],
        )
        .unwrap_err();
        assert_eq!(err, Error::OverlappingPacks(card("8♠")));
    }

    #[test]
    fn test_new_rejects_unknown_cards() {
        let hand = CardPack::try_from_cards(&[Card::UNKNOWN]).unwrap();
        let err = GameState::from_hands(
            [hand, CardPack::new(), CardPack::new()],
            [Strategy::maximize(0); NUM_SEATS],
        )
        .unwrap_err();
        assert_eq!(err, Error::UnknownCard);
    }

    #[test]
    fn test_new_rejects_strategy_seat_out_of_range() {
        let err = GameState::from_hands(
            ["7♠".parse().unwrap(), "8♠".parse().unwrap(), "9♠".parse().unwrap()],
            [Strategy::maximize(0), Strategy::minimize(NUM_SEATS), Strategy::minimize(0)],
        )
        .unwrap_err();
        assert_eq!(err, Error::InvalidSeat(NUM_SEATS));
    }

    #[test]
    fn test_set_active_player_range() {
        let mut s = state("7♠", "8♠", "9♠");
        assert!(s.set_active_player(2).is_ok());
        assert_eq!(s.active_player(), 2);
        assert_eq!(s.set_active_player(3), Err(Error::InvalidSeat(3)));
        assert_eq!(s.active_player(), 2);
    }

    #[test]
    fn test_trick_state_machine() {
        let mut s = state("7♠ A♥", "8♠ K♥", "9♠ Q♥");
        assert_eq!(s.lead_suit(), None);

        s.play(card("7♠")).unwrap();
        assert_eq!(s.lead_suit(), Some(SPADE));
        assert_eq!(s.active_player(), 1);
        assert_eq!(s.table(), &[card("7♠")]);

        s.play(card("8♠")).unwrap();
        assert_eq!(s.table().len(), 2);
        assert_eq!(s.active_player(), 2);

        s.play(card("9♠")).unwrap();
        assert!(s.table().is_empty());
        assert_eq!(s.lead_suit(), None);
        assert_eq!(s.score(), Score::from_tricks([0, 0, 1]));
        // Winner leads the next trick
        assert_eq!(s.active_player(), 2);
    }

    #[test]
    fn test_winner_seat_is_relative_to_leader() {
        let mut s = state("7♦ 8♣", "A♦ 9♣", "8♦ 1♣")
            .with_active_player(1)
            .unwrap();
        s.play(card("9♣")).unwrap();
        s.play(card("1♣")).unwrap();
        s.play(card("8♣")).unwrap();
        // Seat 2 played the highest club
        assert_eq!(s.score(), Score::from_tricks([0, 0, 1]));
        assert_eq!(s.active_player(), 2);
    }

    #[test]
    fn test_resumed_score_does_not_overflow() {
        let mut s = state("A♠", "7♠", "8♠").with_score(Score::from_tricks([u8::MAX, 0, 0]));
        s.play(card("A♠")).unwrap();
        s.play(card("7♠")).unwrap();
        s.play(card("8♠")).unwrap();
        assert_eq!(s.score(), Score::from_tricks([u8::MAX, 0, 0]));
        assert!(s.is_terminal());
    }

    #[test]
    fn test_lone_trump_wins() {
        let mut s = state("A♦ 7♣", "K♦ 8♣", "7♠ 9♣").with_trump(Some(SPADE));
        s.play(card("A♦")).unwrap();
        s.play(card("K♦")).unwrap();
        s.play(card("7♠")).unwrap();
        assert_eq!(s.score(), Score::from_tricks([0, 0, 1]));
    }

    #[test]
    fn test_play_rejects_illegal_moves() {
        let mut s = state("7♠ A♥", "8♠ K♥", "9♠ Q♥");
        s.play(card("7♠")).unwrap();
        assert_eq!(
            s.play(card("K♥")),
            Err(Error::IllegalMove {
                seat: 1,
                card: card("K♥")
            })
        );
        assert_eq!(
            s.play(card("9♠")),
            Err(Error::IllegalMove {
                seat: 1,
                card: card("9♠")
            })
        );
    }

    #[test]
    fn test_must_ruff_when_void() {
        let mut s = state("7♦", "8♠ K♥", "9♠").with_trump(Some(HEART));
        s.play(card("7♦")).unwrap();
        assert_eq!(s.legal_moves().to_string(), "K♥");
    }

    #[test]
    fn test_live_cards_shared_within_trick() {
        let mut s = state("7♠ A♥", "8♠ K♥", "9♠ Q♥");
        s.start_trick();
        let snapshot = Rc::clone(s.live_cards().unwrap());
        assert_eq!(snapshot.len(), 6);

        let mut child = s.clone();
        child.apply(card("7♠"));
        assert!(Rc::ptr_eq(child.live_cards().unwrap(), &snapshot));

        child.apply(card("8♠"));
        child.apply(card("9♠"));
        assert!(child.live_cards().is_none());
        // Parent still sees the untouched snapshot
        assert_eq!(s.live_cards().unwrap().len(), 6);
    }

    #[test]
    fn test_valid_moves_collapse_equivalent_cards() {
        let mut s = state("7♠ 8♠ 1♠ A♥", "9♠ K♥", "J♠ Q♥");
        s.start_trick();
        // 7♠ and 8♠ are adjacent among live cards, 1♠ is separated by 9♠
        assert_eq!(s.active_player_valid_moves().to_string(), "8♠ 1♠ A♥");
    }

    #[test]
    fn test_cards_are_conserved() {
        let mut s = state("7♠ A♥ 9♦", "8♠ K♥ 8♦", "9♠ Q♥ 7♦");
        let deck = s.cards_left();
        let mut played = CardPack::new();
        while !s.is_terminal() {
            let card = s.legal_moves().card(0);
            s.play(card).unwrap();
            played.insert(card).unwrap();
            let total = s.cards_left().checked_union(&played.difference(&s.cards_left()));
            assert_eq!(total.unwrap(), deck);
        }
        assert_eq!(played, deck);
        assert_eq!(s.score().total(), 3);
    }

    #[test]
    fn test_key_order_and_equality() {
        let a = state("7♠ A♥", "8♠ K♥", "9♠ Q♥");
        let b = state("7♠ A♥", "8♠ K♥", "9♠ Q♥");
        assert_eq!(a, b);
        assert_eq!(a.key(), b.key());

        // More cards on the table sorts later regardless of hands
        let mut c = a.clone();
        c.play("7♠".parse().unwrap()).unwrap();
        assert!(a < c);

        let d = a.clone().with_active_player(1).unwrap();
        assert!(a < d);

        let e = a.clone().with_trump(Some(CLUB));
        assert_ne!(a, e);

        // Same cards under other objectives is a different state
        let f = GameState::from_hands(
            hands_of(&a),
            [Strategy::minimize(0), Strategy::maximize(0), Strategy::maximize(0)],
        )
        .unwrap();
        assert_ne!(a.key(), f.key());
    }
}
