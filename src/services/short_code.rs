// Short code generation with collision detection and a bounded retry budget

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};

use crate::{
    app_config::AppConfig,
    db::{DbError, ShortLinkRepository},
    utils::code_alphabet,
};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default short code length (59^3 = 205,379 codes)
pub const DEFAULT_CODE_LENGTH: usize = 3;
/// Upper bound imposed by the `short_links.short_code` column
pub const MAX_CODE_LENGTH: usize = 10;
/// Draws allowed per request before giving up
pub const DEFAULT_MAX_ATTEMPTS: usize = 256;

// =============================================================================
// ERROR TYPES
// =============================================================================

#[derive(Error, Debug)]
pub enum ShortCodeError {
    #[error("Invalid code length: {0}. Length must be between 1 and {1} characters")]
    InvalidLength(usize, usize),

    #[error("Invalid attempt limit: must be at least 1")]
    InvalidAttemptLimit,

    #[error("No free short code found after {attempts} attempts")]
    CodeSpaceExhausted { attempts: usize },

    #[error("Database error: {0}")]
    DatabaseError(#[from] DbError),
}

// =============================================================================
// CODE SOURCES
// =============================================================================

/// Source of candidate codes; swapped for a scripted one in tests
pub trait CodeSource: Send + Sync {
    fn next_code(&self, length: usize) -> String;
}

/// Uniform random draws from the code alphabet
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeSource;

impl CodeSource for RandomCodeSource {
    fn next_code(&self, length: usize) -> String {
        code_alphabet::random_code(length)
    }
}

// =============================================================================
// SHORT CODE GENERATOR
// =============================================================================

pub struct ShortCodeGenerator {
    source: Arc<dyn CodeSource>,
    length: usize,
    max_attempts: usize,
}

impl ShortCodeGenerator {
    /// Random generator with the given default length and attempt budget
    pub fn new(length: usize, max_attempts: usize) -> Result<Self, ShortCodeError> {
        Self::with_source(Arc::new(RandomCodeSource), length, max_attempts)
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ShortCodeError> {
        Self::new(config.short_code_length, config.short_code_max_attempts)
    }

    pub fn with_source(
        source: Arc<dyn CodeSource>,
        length: usize,
        max_attempts: usize,
    ) -> Result<Self, ShortCodeError> {
        validate_length(length)?;
        if max_attempts == 0 {
            return Err(ShortCodeError::InvalidAttemptLimit);
        }

        Ok(Self {
            source,
            length,
            max_attempts,
        })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Generate a code of the default length that is not in the store
    pub async fn generate_unique_code<R>(&self, repo: &R) -> Result<String, ShortCodeError>
    where
        R: ShortLinkRepository + ?Sized,
    {
        self.generate_unique_code_with_length(repo, self.length)
            .await
    }

    /// Generate a code of a custom length that is not in the store
    #[instrument(skip(self, repo))]
    pub async fn generate_unique_code_with_length<R>(
        &self,
        repo: &R,
        length: usize,
    ) -> Result<String, ShortCodeError>
    where
        R: ShortLinkRepository + ?Sized,
    {
        validate_length(length)?;
        let mut attempts = 0;
        self.draw_unique(repo, length, &mut attempts).await
    }

    /// Draw until a free code is found, sharing `attempts` with the caller so
    /// that later insert conflicts count against the same budget.
    pub(crate) async fn draw_unique<R>(
        &self,
        repo: &R,
        length: usize,
        attempts: &mut usize,
    ) -> Result<String, ShortCodeError>
    where
        R: ShortLinkRepository + ?Sized,
    {
        while *attempts < self.max_attempts {
            *attempts += 1;
            let candidate = self.source.next_code(length);

            if !repo.code_exists(&candidate).await? {
                debug!(
                    "Generated short code {} after {} attempt(s)",
                    candidate, *attempts
                );
                return Ok(candidate);
            }

            warn!(
                "Short code collision detected: {} (attempt: {})",
                candidate, *attempts
            );
        }

        error!(
            "Failed to generate unique short code after {} attempts",
            *attempts
        );
        Err(ShortCodeError::CodeSpaceExhausted {
            attempts: *attempts,
        })
    }
}

fn validate_length(length: usize) -> Result<(), ShortCodeError> {
    if length == 0 || length > MAX_CODE_LENGTH {
        return Err(ShortCodeError::InvalidLength(length, MAX_CODE_LENGTH));
    }
    Ok(())
}
