//! Short code generation.
//!
//! Candidates are drawn uniformly from a 62-symbol alphabet. Codes are
//! identifiers, not secrets, so a thread-local PRNG is enough. Uniqueness is
//! never checked here; that is the allocator's job.

use rand::Rng;

/// Symbols a short code may contain.
pub const CODE_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default short code length (62^6 ~ 5.68e10 combinations).
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Longest code the `links.short_code` column accepts.
pub const MAX_CODE_LENGTH: usize = 32;

/// Codes that collide with fixed routes and are never handed out.
pub const RESERVED_CODES: &[&str] = &["health", "api"];

/// Source of candidate short codes.
///
/// Abstracted so tests can inject deterministic or colliding sequences.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces one candidate code. Consecutive calls are independent.
    fn generate(&self) -> String;
}

/// Production generator backed by the thread-local RNG.
#[derive(Debug, Clone, Copy)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_candidate(self.length)
    }
}

/// Draws `length` independent, uniformly distributed symbols from [`CODE_ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_candidate(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_candidate(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` could have been produced by some generator.
///
/// Accepts any length up to [`MAX_CODE_LENGTH`], independent of the configured
/// `CODE_LENGTH`.
pub fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// Returns true if `code` is shadowed by a fixed route.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}
