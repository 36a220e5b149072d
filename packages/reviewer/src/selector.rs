use std::sync::{Mutex, PoisonError};

use pr_reviewer_models::{DEFAULT_REVIEWER_COUNT, User};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Picks reviewers at random from a list of candidates.
///
/// One instance is shared by the whole process, so every selection draws from
/// the same random source.
pub struct ReviewerSelector {
    rng: Mutex<StdRng>,
}

impl ReviewerSelector {
    /// Creates a selector seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a selector with a fixed seed, for reproducible tests.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Returns the ids of up to `max_count` active candidates, excluding
    /// `exclude_user_id`, in random order.
    ///
    /// A `max_count` of zero falls back to [`DEFAULT_REVIEWER_COUNT`]. An empty
    /// result is a normal outcome, not an error.
    #[must_use]
    pub fn select_reviewers(
        &self,
        candidates: &[User],
        exclude_user_id: Option<&str>,
        max_count: usize,
    ) -> Vec<String> {
        let max_count = if max_count == 0 {
            DEFAULT_REVIEWER_COUNT
        } else {
            max_count
        };

        let mut eligible: Vec<&User> = candidates
            .iter()
            .filter(|user| user.is_active && Some(user.id.as_str()) != exclude_user_id)
            .collect();

        if eligible.is_empty() {
            return Vec::new();
        }

        let count = max_count.min(eligible.len());
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        let (chosen, _) = eligible.partial_shuffle(&mut *rng, count);

        chosen.iter().map(|user| user.id.clone()).collect()
    }
}

impl Default for ReviewerSelector {
    fn default() -> Self {
        Self::new()
    }
}
