//! Out-of-band user provisioning.
//!
//! Accounts are never created through the HTTP surface; an operator runs
//! this binary against the board database directly.

use anyhow::{bail, Context, Result};
use chrono::DateTime;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use joblist_board_server::auth::BoardHasher;
use joblist_board_server::board_store::{BoardStore, SqliteBoardStore};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite board database file.
    pub board_db: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new user with the given email and password.
    AddUser { email: String, password: String },
    /// Replace the password of an existing user.
    SetPassword { email: String, password: String },
    /// Verify a password against the stored hash.
    CheckPassword { email: String, password: String },
    /// List all user emails.
    ListUsers,
    /// Show a single user record.
    Show { email: String },
}

fn find_user(
    store: &SqliteBoardStore,
    email: &str,
) -> Result<joblist_board_server::board_store::User> {
    store
        .find_user_by_email(email)?
        .with_context(|| format!("No user with email {}", email))
}

fn run(store: SqliteBoardStore, command: Command) -> Result<()> {
    match command {
        Command::AddUser { email, password } => {
            if store.find_user_by_email(&email)?.is_some() {
                bail!("User {} already exists", email);
            }
            let hasher = BoardHasher::Argon2;
            let hash = hasher.hash(&password)?;
            let id = store.insert_user(&email, &hash, &hasher.to_string())?;
            println!("Created user {} with id {}", email, id);
        }
        Command::SetPassword { email, password } => {
            let user = find_user(&store, &email)?;
            let hasher = BoardHasher::Argon2;
            let hash = hasher.hash(&password)?;
            store.update_user_password(user.id, &hash, &hasher.to_string())?;
            println!("Updated password for {}", email);
        }
        Command::CheckPassword { email, password } => {
            let user = find_user(&store, &email)?;
            let hasher: BoardHasher = user.hasher.parse()?;
            if hasher.verify(&password, &user.password_hash)? {
                println!("Password matches");
            } else {
                bail!("Password does not match");
            }
        }
        Command::ListUsers => {
            for email in store.all_user_emails()? {
                println!("{}", email);
            }
        }
        Command::Show { email } => {
            let user = find_user(&store, &email)?;
            let created = DateTime::from_timestamp(user.created_at, 0)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_else(|| user.created_at.to_string());
            println!("id:      {}", user.id);
            println!("email:   {}", user.email);
            println!("hasher:  {}", user.hasher);
            println!("created: {}", created);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();
    let store = SqliteBoardStore::new(&cli_args.board_db)
        .with_context(|| format!("Failed to open board database {:?}", cli_args.board_db))?;
    run(store, cli_args.command)
}
