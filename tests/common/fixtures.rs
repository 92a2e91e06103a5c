//! Test fixture creation for the board database

use super::constants::*;
use anyhow::Result;
use joblist_board_server::auth::BoardHasher;
use joblist_board_server::board_store::{BoardStore, SqliteBoardStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a temporary board database with the two standard test users.
/// Returns (temp_dir, db_path).
pub fn create_test_db_with_users() -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let db_path = dir.path().join("board.db");

    let store = SqliteBoardStore::new(&db_path)?;
    let hasher = BoardHasher::Argon2;
    for (email, password) in [(ALICE_EMAIL, ALICE_PASS), (BOB_EMAIL, BOB_PASS)] {
        let hash = hasher.hash(password)?;
        store.insert_user(email, &hash, &hasher.to_string())?;
    }

    Ok((dir, db_path))
}
