//! Perfect-information solver for three-handed Preferans play
//!
//! Given three fully known hands, an optional trump suit and an objective per seat,
//! the solver searches the whole game tree and returns the optimal line of play.
//!
//! The algorithm uses:
//! - Exhaustive depth-first search with per-seat objectives (maximize or minimize one seat's tricks)
//! - Equivalent-card pruning: cards adjacent among the live cards of a trick are interchangeable
//! - A transposition table of solved states keyed by hands, trick and score
//!
//! # Example
//!
//! ```
//! use pref_solver::{GameState, Solver, Strategy};
//!
//! let hands = ["7♣ A♦".parse().unwrap(), "8♣ K♦".parse().unwrap(), "9♣ 1♣".parse().unwrap()];
//! let strategies = [Strategy::maximize(0), Strategy::minimize(0), Strategy::minimize(0)];
//! let state = GameState::from_hands(hands, strategies).unwrap();
//!
//! let solution = Solver::new(state).solve();
//! assert_eq!(solution.path.score().seat(0), 1);
//! assert_eq!(solution.path.first_move().unwrap().to_string(), "A♦");
//! ```

mod cache;
pub mod cards;
mod error;
mod pack;
mod path;
mod player;
mod score;
mod search;
mod solver;
mod state;
pub mod types;

pub use cache::VisitedStateCache;
pub use cards::{calc_trick_winner, Card};
pub use error::{Error, Result};
pub use pack::CardPack;
pub use path::Path;
pub use player::Player;
pub use score::{Goal, Score, Strategy};
pub use search::{SearchContext, SearchStats};
pub use solver::{Solution, Solver, SolverConfig};
pub use state::{GameState, StateKey};
pub use types::{Rank, Seat, Suit, MAX_CARDS, NUM_SEATS, NUM_SUITS};
pub use types::{CLUB, DIAMOND, HEART, SPADE};
