//! # Lattice CLI Admin Provisioning (`common::db::admin`)
//!
//! File: cli/src/common/db/admin.rs
//! Author: Lattice Core Team
//! Repository: https://github.com/lattice-framework/lattice-cli
//!
//! ## Overview
//!
//! Provisioning of the well-known admin account during installation. The
//! collected password is hashed with a salted one-way function (argon2id,
//! PHC string encoding) *before* anything is persisted; the plaintext is
//! never written to disk, to the database, or to logs.
//!
//! ## Architecture
//!
//! The admin account lives in the `users` collection under the fixed id
//! [`ADMIN_ACCOUNT_ID`]. Provisioning is an upsert of the credential and
//! identity fields, so reinstalling over a seeded database converges on
//! the operator's chosen credentials instead of failing on a duplicate.
//!
use crate::core::error::Result;
use anyhow::{anyhow, Context};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use mongodb::bson::doc;
use mongodb::bson::Document;
use mongodb::Client;
use tracing::info;

/// Fixed identifier of the admin account document.
pub const ADMIN_ACCOUNT_ID: &str = "admin";

/// Collection holding user account documents.
pub const USERS_COLLECTION: &str = "users";

/// Hashes a plaintext password into a salted PHC string.
pub fn hash_password(plain: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow!("Password hashing failed: {}", e))?;
    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored PHC string.
#[allow(dead_code)] // The application's login path owns runtime verification.
pub fn verify_password(plain: &str, stored: &str) -> Result<bool> {
    let parsed =
        PasswordHash::new(stored).map_err(|e| anyhow!("Stored password hash is invalid: {}", e))?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Creates or updates the well-known admin account.
///
/// Hashes the password, connects to the database named by the connection
/// string, and upserts the admin document's identity and credential
/// fields. Either a hashing failure or a connection failure aborts the
/// caller's run; there is no partial write.
pub async fn provision_admin(connection_uri: &str, username: &str, password: &str) -> Result<()> {
    let hashed = hash_password(password)?;

    let client = Client::with_uri_str(connection_uri)
        .await
        .with_context(|| format!("Failed to connect to '{}'", connection_uri))?;
    let db = client.default_database().ok_or_else(|| {
        anyhow!(
            "Connection string '{}' must include a database name",
            connection_uri
        )
    })?;

    db.collection::<Document>(USERS_COLLECTION)
        .update_one(
            doc! { "_id": ADMIN_ACCOUNT_ID },
            doc! { "$set": {
                "username": username,
                "hashed_password": hashed,
                "role": "admin",
            }},
        )
        .upsert(true)
        .await
        .context("Failed to upsert admin account")?;

    info!("Provisioned admin account '{}'", username);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies_against_original_password() -> Result<()> {
        let hashed = hash_password("correct horse battery staple")?;
        assert!(verify_password("correct horse battery staple", &hashed)?);
        assert!(!verify_password("wrong password", &hashed)?);
        Ok(())
    }

    #[test]
    fn test_hash_is_salted() -> Result<()> {
        // Same input, different salt, different hash.
        let first = hash_password("hunter2")?;
        let second = hash_password("hunter2")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn test_hash_never_contains_plaintext() -> Result<()> {
        let hashed = hash_password("s3cret-plaintext")?;
        assert!(!hashed.contains("s3cret-plaintext"));
        assert!(hashed.starts_with("$argon2"));
        Ok(())
    }

    #[test]
    fn test_verify_rejects_garbage_stored_hash() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
