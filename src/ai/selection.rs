//! Category Selection
//!
//! The category is fixed before the prompt is built. Selection is a
//! strategy object so tests can pin the clock or seed the RNG.

use chrono::{DateTime, Timelike, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::CategoryPolicy;
use crate::types::Category;

/// Strategy that picks the category of the next post
pub trait CategorySelector: Send {
    fn select(&mut self) -> Category;

    /// Policy name for logging
    fn name(&self) -> &str;
}

/// Build the selector for a run: a CLI override wins over the policy
pub fn selector_for(policy: CategoryPolicy, fixed: Option<Category>) -> Box<dyn CategorySelector> {
    match (fixed, policy) {
        (Some(category), _) => Box::new(FixedSelector(category)),
        (None, CategoryPolicy::Schedule) => Box::new(ScheduleSelector::new()),
        (None, CategoryPolicy::Random) => Box::new(RandomSelector::from_os_rng()),
    }
}

// =============================================================================
// Schedule
// =============================================================================

/// UTC time-of-day windows: [0, 10) Product, [10, 16) Economy, [16, 24) Ecosystem
pub struct ScheduleSelector {
    clock: Box<dyn Fn() -> DateTime<Utc> + Send>,
}

impl Default for ScheduleSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleSelector {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + 'static,
    {
        Self {
            clock: Box::new(clock),
        }
    }

    pub fn category_for_hour(hour: u32) -> Category {
        match hour {
            0..=9 => Category::Product,
            10..=15 => Category::Economy,
            _ => Category::Ecosystem,
        }
    }
}

impl CategorySelector for ScheduleSelector {
    fn select(&mut self) -> Category {
        Self::category_for_hour((self.clock)().hour())
    }

    fn name(&self) -> &str {
        "schedule"
    }
}

// =============================================================================
// Random
// =============================================================================

/// Uniform choice over all categories
pub struct RandomSelector<R: Rng + Send> {
    rng: R,
}

impl RandomSelector<StdRng> {
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng + Send> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> CategorySelector for RandomSelector<R> {
    fn select(&mut self) -> Category {
        Category::ALL[self.rng.random_range(0..Category::ALL.len())]
    }

    fn name(&self) -> &str {
        "random"
    }
}

// =============================================================================
// Fixed
// =============================================================================

/// Always the same category
pub struct FixedSelector(pub Category);

impl CategorySelector for FixedSelector {
    fn select(&mut self) -> Category {
        self.0
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
