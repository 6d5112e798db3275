//! Password hashing using bcrypt
//!
//! Each hash embeds a per-call random salt, so two hashes of the same
//! password differ while both still verify.
//!
//! # Performance Considerations
//!
//! bcrypt is intentionally CPU-intensive. The async variants run the
//! work on the blocking thread pool so it never stalls the runtime.

use anyhow::Result;
use bcrypt::DEFAULT_COST;

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password using bcrypt (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        bcrypt::hash(password, DEFAULT_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    ///
    /// Spawns the CPU-intensive work on the blocking thread pool.
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a hash (blocking operation)
    ///
    /// Recomputes with the salt embedded in the stored hash.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}
