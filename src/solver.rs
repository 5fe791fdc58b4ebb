//! Solver entry point

use std::fmt;
use std::time::Instant;

use tracing::debug;

use super::cache::VisitedStateCache;
use super::path::Path;
use super::search::{SearchContext, SearchStats};
use super::state::GameState;

/// Search switches
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Look up and store solved states in the transposition table
    pub use_cache: bool,
    /// Collapse equivalent cards before expanding moves
    pub filter_equivalent: bool,
    /// Log progress every this many leaves (0 = never)
    pub progress_interval: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            use_cache: true,
            filter_equivalent: true,
            progress_interval: 100_000,
        }
    }
}

/// Solved line of play together with the search counters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub path: Path,
    pub stats: SearchStats,
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.path, self.stats)
    }
}

/// Solver for a fully known deal
pub struct Solver {
    state: GameState,
    config: SolverConfig,
}

impl Solver {
    /// Create a solver with the default configuration
    pub fn new(state: GameState) -> Self {
        Solver::with_config(state, SolverConfig::default())
    }

    pub fn with_config(state: GameState, config: SolverConfig) -> Self {
        Solver { state, config }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve with a fresh transposition table
    pub fn solve(&self) -> Solution {
        let mut cache = VisitedStateCache::new();
        self.solve_with_cache(&mut cache)
    }

    /// Solve with an external transposition table (allows sharing across solves).
    ///
    /// The table is left untouched when `use_cache` is off.
    pub fn solve_with_cache(&self, cache: &mut VisitedStateCache) -> Solution {
        let cache = if self.config.use_cache {
            Some(cache)
        } else {
            None
        };
        self.run(SearchContext::new(&self.config, cache))
    }

    fn run(&self, mut ctx: SearchContext<'_>) -> Solution {
        debug!(
            active = self.state.active_player(),
            trump = ?self.state.trump(),
            score = %self.state.score(),
            use_cache = self.config.use_cache,
            filter_equivalent = self.config.filter_equivalent,
            "solve started"
        );
        let start = Instant::now();

        let mut root = self.state.clone();
        let path = root.solve(&mut ctx);
        let stats = ctx.stats();

        let elapsed = start.elapsed();
        let ns_per_node = if stats.nodes > 0 {
            elapsed.as_nanos() as f64 / stats.nodes as f64
        } else {
            0.0
        };
        debug!(
            score = %path.score(),
            moves = path.len(),
            nodes = stats.nodes,
            leaves = stats.leaves,
            cache_hits = stats.cache_hits,
            cache_entries = stats.cache_entries,
            elapsed_s = elapsed.as_secs_f64(),
            ns_per_node,
            "solve finished"
        );

        Solution { path, stats }
    }
}
