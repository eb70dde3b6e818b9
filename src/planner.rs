//! Planner state and configuration.
//!
//! Owns the RNG used to roll hands, the shared expected-value cache and,
//! when more than one thread is configured, a dedicated rayon pool.
//! Every plan request is validated here before it reaches the search.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::ThreadPool;
use tracing::{debug, info};

use crate::dice::{Face, Hand, HandError};
use crate::enumerate::{count_arrangements, count_sequences};
use crate::eval::{CacheStats, Evaluator};
use crate::search::{rank_holds_with, strategy_parallel, strategy_with, StrategyResult};

/// Largest number of re-roll outcomes a single hold may require by default.
pub const DEFAULT_MAX_OUTCOMES: u64 = 10_000_000;

/// Largest number of position arrangements the hold enumeration may build by
/// default. Nine dice (986,410) fit; ten do not.
pub const DEFAULT_MAX_ARRANGEMENTS: u64 = 1_000_000;

/// Errors returned by the planner.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Hand(#[from] HandError),

    #[error("hand uses {hand}-sided dice but the planner is configured for {config}")]
    SidesMismatch { hand: u32, config: u32 },

    #[error("re-rolling every die needs {outcomes} outcomes, limit is {limit}")]
    SearchSpaceTooLarge { outcomes: String, limit: u64 },

    #[error("enumerating holds of {dice} dice builds {arrangements} arrangements, limit is {limit}")]
    HoldSpaceTooLarge {
        dice: usize,
        arrangements: String,
        limit: u64,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Configuration for a [`Planner`].
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Sides on each die.
    pub num_sides: u32,
    /// Dice rolled per hand by [`Planner::roll_hand`].
    pub num_dice: usize,
    /// Worker threads for the hold search. 1 searches on the calling thread.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Memoize expected values across holds and hands.
    pub cache: bool,
    /// Upper bound on `num_sides ^ hand length`.
    pub max_outcomes: u64,
    /// Upper bound on the position arrangements built by hold enumeration.
    pub max_arrangements: u64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            num_sides: 6,
            num_dice: 5,
            threads: 1,
            seed: 0,
            cache: true,
            max_outcomes: DEFAULT_MAX_OUTCOMES,
            max_arrangements: DEFAULT_MAX_ARRANGEMENTS,
        }
    }
}

/// Plans holds for hands of one die size.
pub struct Planner {
    config: PlannerConfig,
    evaluator: Evaluator,
    pool: Option<ThreadPool>,
    rng: SmallRng,
}

impl Planner {
    /// Creates a planner, validating the die size and dice count.
    pub fn new(config: PlannerConfig) -> Result<Self, PlanError> {
        if config.num_sides == 0 {
            return Err(HandError::InvalidSides(config.num_sides).into());
        }
        if config.num_dice == 0 {
            return Err(HandError::EmptyHand.into());
        }
        check_search_space(config.num_sides, config.num_dice, &config)?;

        let pool = if config.threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()
                .map_err(|e| PlanError::ThreadPool(e.to_string()))?;
            Some(pool)
        } else {
            None
        };

        let evaluator = if config.cache {
            Evaluator::with_cache(config.num_sides)
        } else {
            Evaluator::new(config.num_sides)
        };

        let rng = if config.seed != 0 {
            SmallRng::seed_from_u64(config.seed)
        } else {
            SmallRng::from_entropy()
        };

        debug!(?config, "planner ready");
        Ok(Planner {
            config,
            evaluator,
            pool,
            rng,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Rolls `num_dice` dice, sorted ascending.
    pub fn roll_hand(&mut self) -> Result<Hand, PlanError> {
        let sides = self.config.num_sides;
        let mut faces: Vec<Face> = (0..self.config.num_dice)
            .map(|_| self.rng.gen_range(1..=sides))
            .collect();
        faces.sort_unstable();
        Ok(Hand::new(faces, sides)?)
    }

    /// Parses and validates a hand against this planner's die size.
    pub fn hand_from(&self, faces: Vec<Face>) -> Result<Hand, PlanError> {
        Ok(Hand::new(faces, self.config.num_sides)?)
    }

    /// Best hold for `hand`.
    pub fn plan(&self, hand: &Hand) -> Result<StrategyResult, PlanError> {
        self.check(hand)?;
        let result = match &self.pool {
            Some(pool) => strategy_parallel(hand, &self.evaluator, pool),
            None => strategy_with(hand, &self.evaluator),
        };
        info!(
            hand = %hand,
            hold = ?result.hold,
            expected_score = result.expected_score,
            "planned hold"
        );
        Ok(result)
    }

    /// Every distinct hold for `hand`, best first.
    pub fn rank(&self, hand: &Hand) -> Result<Vec<StrategyResult>, PlanError> {
        self.check(hand)?;
        Ok(rank_holds_with(hand, &self.evaluator))
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.evaluator.stats()
    }

    fn check(&self, hand: &Hand) -> Result<(), PlanError> {
        if hand.num_sides() != self.config.num_sides {
            return Err(PlanError::SidesMismatch {
                hand: hand.num_sides(),
                config: self.config.num_sides,
            });
        }
        check_search_space(hand.num_sides(), hand.len(), &self.config)
    }
}

/// Rejects hands whose full re-roll would exceed `max_outcomes` outcomes, or
/// whose hold enumeration would exceed `max_arrangements` arrangements.
fn check_search_space(
    num_sides: u32,
    num_dice: usize,
    config: &PlannerConfig,
) -> Result<(), PlanError> {
    let limit = config.max_outcomes;
    match count_sequences(num_sides as usize, num_dice) {
        Some(outcomes) if outcomes <= limit => {}
        Some(outcomes) => {
            return Err(PlanError::SearchSpaceTooLarge {
                outcomes: outcomes.to_string(),
                limit,
            })
        }
        None => {
            return Err(PlanError::SearchSpaceTooLarge {
                outcomes: format!("{}^{}", num_sides, num_dice),
                limit,
            })
        }
    }

    let limit = config.max_arrangements;
    match count_arrangements(num_dice) {
        Some(arrangements) if arrangements <= limit => Ok(()),
        Some(arrangements) => Err(PlanError::HoldSpaceTooLarge {
            dice: num_dice,
            arrangements: arrangements.to_string(),
            limit,
        }),
        None => Err(PlanError::HoldSpaceTooLarge {
            dice: num_dice,
            arrangements: format!("more than {}", u64::MAX),
            limit,
        }),
    }
}
