//! Core type definitions for the three-handed game

/// Suits in game order: SPADE=0, CLUB=1, DIAMOND=2, HEART=3
pub type Suit = usize;
pub const SPADE: Suit = 0;
pub const CLUB: Suit = 1;
pub const DIAMOND: Suit = 2;
pub const HEART: Suit = 3;
pub const NUM_SUITS: usize = 4;
/// Placeholder suit carried by the unknown card
pub const UNKNOWN_SUIT: Suit = 0x0f;

/// Ranks: TWO=0, ..., TEN=8, JACK=9, QUEEN=10, KING=11, ACE=12
pub type Rank = usize;
pub const TWO: Rank = 0;
pub const THREE: Rank = 1;
pub const FOUR: Rank = 2;
pub const FIVE: Rank = 3;
pub const SIX: Rank = 4;
pub const SEVEN: Rank = 5;
pub const EIGHT: Rank = 6;
pub const NINE: Rank = 7;
pub const TEN: Rank = 8;
pub const JACK: Rank = 9;
pub const QUEEN: Rank = 10;
pub const KING: Rank = 11;
pub const ACE: Rank = 12;
pub const NUM_RANKS: usize = 13;
/// Placeholder rank carried by the unknown card
pub const UNKNOWN_RANK: Rank = 0x0f;

/// Ranks used by the 32-card Preferans deck
pub const PREFERANS_RANKS: [Rank; 8] = [SEVEN, EIGHT, NINE, TEN, JACK, QUEEN, KING, ACE];

/// Seats are numbered 0, 1, 2 in playing order
pub type Seat = usize;
pub const NUM_SEATS: usize = 3;

/// One suit of eight ranks, times four suits
pub const MAX_CARDS: usize = 4 * 8;

/// Get next seat in playing order
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % NUM_SEATS
}

/// Get suit name
pub fn suit_name(suit: Suit) -> &'static str {
    const NAMES: [&str; 4] = ["Spades", "Clubs", "Diamonds", "Hearts"];
    NAMES.get(suit).copied().unwrap_or("Unknown")
}

/// Get suit symbol used when printing cards
pub fn suit_symbol(suit: Suit) -> char {
    const SYMBOLS: [char; 4] = ['♠', '♣', '♦', '♥'];
    SYMBOLS.get(suit).copied().unwrap_or('?')
}

/// Get rank name (character). Ten is written as '1' so every card prints as two characters.
pub fn rank_name(rank: Rank) -> char {
    const NAMES: [char; 13] = [
        '2', '3', '4', '5', '6', '7', '8', '9', '1', 'J', 'Q', 'K', 'A',
    ];
    NAMES.get(rank).copied().unwrap_or('?')
}

/// Convert character to suit
pub fn char_to_suit(c: char) -> Option<Suit> {
    match c {
        '♠' | '^' => return Some(SPADE),
        '♣' | '+' => return Some(CLUB),
        '♦' | '$' => return Some(DIAMOND),
        '♥' | '@' => return Some(HEART),
        _ => {}
    }
    match c.to_ascii_uppercase() {
        'S' => Some(SPADE),
        'C' => Some(CLUB),
        'D' => Some(DIAMOND),
        'H' => Some(HEART),
        _ => None,
    }
}

/// Convert character to rank
pub fn char_to_rank(c: char) -> Option<Rank> {
    match c.to_ascii_uppercase() {
        '2' => Some(TWO),
        '3' => Some(THREE),
        '4' => Some(FOUR),
        '5' => Some(FIVE),
        '6' => Some(SIX),
        '7' => Some(SEVEN),
        '8' => Some(EIGHT),
        '9' => Some(NINE),
        'T' | '1' => Some(TEN),
        'J' => Some(JACK),
        'Q' => Some(QUEEN),
        'K' => Some(KING),
        'A' => Some(ACE),
        _ => None,
    }
}
