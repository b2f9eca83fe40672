// SPDX-License-Identifier: MIT
// Copyright 2026 Trail Journal contributors

//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

use ring::rand::{SecureRandom, SystemRandom};

use crate::error::AppError;

/// Collection names as constants.
pub mod collections {
    pub const JOURNAL_ENTRIES: &str = "journal_entries";
    /// User preferences (keyed by URL-encoded auth subject)
    pub const USER_PROFILES: &str = "user_profiles";
}

/// Generate a random 128-bit document id, hex encoded.
pub fn new_document_id() -> Result<String, AppError> {
    let mut bytes = [0u8; 16];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG unavailable")))?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ids_are_unique_hex() {
        let a = new_document_id().unwrap();
        let b = new_document_id().unwrap();

        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
