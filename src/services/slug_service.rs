use std::sync::Arc;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;

use crate::{
    errors::{AppError, AppResult},
    repositories::QuizRepository,
};

/// Random suffixes are drawn from `0..RANDOM_SUFFIX_SPACE`; fallback counters
/// start at this value so the two never overlap.
pub const RANDOM_SUFFIX_SPACE: u32 = 1_000_000;

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^A-Za-z0-9_ ]+").expect("NON_SLUG_CHARS is a valid regex pattern")
});

/// Lowercase, drop everything outside `[A-Za-z0-9_ ]`, spaces become hyphens.
///
/// `"Math Quiz!"` becomes `"math-quiz"`.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_SLUG_CHARS.replace_all(&lowered, "").replace(' ', "-")
}

pub struct SlugAllocator {
    repository: Arc<dyn QuizRepository>,
    random_attempts: u32,
    fallback_attempts: u32,
}

impl SlugAllocator {
    pub fn new(
        repository: Arc<dyn QuizRepository>,
        random_attempts: u32,
        fallback_attempts: u32,
    ) -> Self {
        Self {
            repository,
            random_attempts,
            fallback_attempts,
        }
    }

    /// Pick a slug for `title` that no stored quiz uses yet.
    ///
    /// Tries random suffixes first, then counts upward from
    /// [`RANDOM_SUFFIX_SPACE`]. Both phases are bounded.
    pub async fn allocate(&self, title: &str) -> AppResult<String> {
        let base = slugify(title);

        for attempt in 1..=self.random_attempts {
            let suffix = rand::thread_rng().gen_range(0..RANDOM_SUFFIX_SPACE);
            let candidate = format!("{}{}", base, suffix);

            if !self.repository.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            log::debug!("Slug '{}' taken (attempt {})", candidate, attempt);
        }

        log::warn!(
            "No free random slug for '{}' after {} attempts, using counter suffix",
            base,
            self.random_attempts
        );

        for offset in 0..self.fallback_attempts {
            let candidate = format!("{}{}", base, u64::from(RANDOM_SUFFIX_SPACE) + u64::from(offset));

            if !self.repository.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
        }

        Err(AppError::InternalError(format!(
            "Unable to allocate a unique slug for '{}'",
            title
        )))
    }
}
