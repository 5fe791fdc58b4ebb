//! Depth-first search over the game tree
//!
//! Every node solves its own copy of the state: the active player's moves are
//! expanded one by one and the children are folded into a `Path` under that
//! player's strategy. Solved states go into the transposition table, leaves
//! included, so transpositions reached through different move orders are solved
//! once.

use std::fmt;

use tracing::debug;
#[cfg(feature = "debug_search")]
use tracing::trace;

use super::cache::VisitedStateCache;
use super::cards::Card;
use super::path::Path;
use super::solver::SolverConfig;
use super::state::GameState;

/// Counters collected during one search run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States visited, cache hits included
    pub nodes: u64,
    /// Terminal states evaluated
    pub leaves: u64,
    /// Cache hits during this run
    pub cache_hits: u64,
    /// Cache size at the end of the run
    pub cache_entries: usize,
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes={} leaves={} cache_hits={} cache_entries={}",
            self.nodes, self.leaves, self.cache_hits, self.cache_entries
        )
    }
}

/// Search-wide state threaded through the recursion: switches, the optional
/// transposition table and the statistics sink.
pub struct SearchContext<'a> {
    config: &'a SolverConfig,
    cache: Option<&'a mut VisitedStateCache>,
    stats: SearchStats,
    hits_at_start: u64,
}

impl<'a> SearchContext<'a> {
    pub fn new(config: &'a SolverConfig, cache: Option<&'a mut VisitedStateCache>) -> Self {
        let hits_at_start = cache.as_ref().map_or(0, |cache| cache.hits());
        SearchContext {
            config,
            cache,
            stats: SearchStats::default(),
            hits_at_start,
        }
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        self.config
    }

    /// Statistics so far, with cache counters relative to the start of the run
    pub fn stats(&self) -> SearchStats {
        let mut stats = self.stats;
        if let Some(cache) = self.cache.as_deref() {
            stats.cache_hits = cache.hits() - self.hits_at_start;
            stats.cache_entries = cache.len();
        }
        stats
    }

    fn record_leaf(&mut self) {
        self.stats.leaves += 1;
        let interval = self.config.progress_interval;
        if interval > 0 && self.stats.leaves % interval == 0 {
            let stats = self.stats();
            debug!(
                nodes = stats.nodes,
                leaves = stats.leaves,
                cache_hits = stats.cache_hits,
                cache_entries = stats.cache_entries,
                "search progress"
            );
        }
    }
}

impl GameState {
    /// Solve this state: best line of play for every seat under its strategy.
    ///
    /// Ties between moves keep the first one expanded, so the result is
    /// deterministic for a given state and configuration.
    pub fn solve(&mut self, ctx: &mut SearchContext<'_>) -> Path {
        ctx.stats.nodes += 1;

        let key = self.key();
        if let Some(cache) = ctx.cache.as_deref_mut() {
            let cached = cache.get_key(&key);
            if cached.is_valid() {
                return cached;
            }
        }

        let path = if self.is_terminal() {
            ctx.record_leaf();
            Path::leaf(self.score())
        } else {
            self.start_trick();
            let moves = if ctx.config.filter_equivalent {
                self.active_player_valid_moves()
            } else {
                self.legal_moves()
            };
            if moves.is_empty() {
                unreachable!(
                    "seat {} holds cards but has no valid move",
                    self.active_player()
                );
            }

            let strategy = self.player(self.active_player()).strategy();
            let mut path = Path::aggregator(strategy);
            for card in &moves {
                let mut child = self.clone();
                child.apply(card);
                let sub_path = child.solve(ctx);
                path.add_sub_path(card, &sub_path);
            }
            path
        };

        #[cfg(feature = "debug_search")]
        trace!(
            active = self.active_player(),
            table = self.table().len(),
            score = %self.score(),
            result = %path,
            "solved state"
        );

        if let Some(cache) = ctx.cache.as_deref_mut() {
            cache.put_key(key, path.clone());
        }
        path
    }

    /// Best card for the active player, solving from scratch with the default configuration
    pub fn optimal_move(&self) -> Option<Card> {
        let config = SolverConfig::default();
        let mut cache = VisitedStateCache::new();
        let mut ctx = SearchContext::new(&config, Some(&mut cache));
        self.clone().solve(&mut ctx).first_move()
    }
}
