use super::models::{Company, Contact, Listing, ListingFields, User};
use super::schema::BOARD_VERSIONED_SCHEMAS;
use super::BoardStore;
use crate::sqlite_persistence::BASE_DB_VERSION;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

pub struct SqliteBoardStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBoardStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        let is_new_db = !path.exists();

        let mut conn = Connection::open(path).context("Failed to open board database")?;
        conn.execute("PRAGMA foreign_keys = ON;", [])?;

        if is_new_db {
            // Fresh database - create with latest schema
            info!("Creating new board database at {:?}", path);
            BOARD_VERSIONED_SCHEMAS.last().unwrap().create(&conn)?;
        } else {
            // Existing database - check version and migrate if needed
            let raw_version: i64 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
            let db_version = raw_version - BASE_DB_VERSION as i64;

            if db_version < 1 {
                anyhow::bail!(
                    "Board database version {} is invalid (expected >= 1)",
                    db_version
                );
            }

            let current_schema_version = BOARD_VERSIONED_SCHEMAS.last().unwrap().version as i64;

            let version_index = BOARD_VERSIONED_SCHEMAS
                .iter()
                .position(|s| s.version == db_version as usize)
                .with_context(|| format!("Unknown board database version {}", db_version))?;
            BOARD_VERSIONED_SCHEMAS[version_index]
                .validate(&conn)
                .with_context(|| {
                    format!(
                        "Board database schema validation failed for version {}",
                        db_version
                    )
                })?;

            if db_version < current_schema_version {
                info!(
                    "Migrating board database from version {} to {}",
                    db_version, current_schema_version
                );
                Self::migrate_if_needed(&mut conn, db_version as usize)?;
            }
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn migrate_if_needed(conn: &mut Connection, from_version: usize) -> Result<()> {
        let tx = conn.transaction()?;
        let mut latest_from = from_version;
        for schema in BOARD_VERSIONED_SCHEMAS.iter().skip(from_version) {
            if schema.version > from_version {
                info!(
                    "Running board database migration from version {} to {}",
                    latest_from, schema.version
                );
                if let Some(migration_fn) = schema.migration {
                    migration_fn(&tx).with_context(|| {
                        format!("Failed to run migration to version {}", schema.version)
                    })?;
                }
                latest_from = schema.version;
            }
        }
        tx.execute(
            &format!("PRAGMA user_version = {}", BASE_DB_VERSION + latest_from),
            [],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get("id")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            hasher: row.get("hasher")?,
            created_at: row.get("created_at")?,
        })
    }

    fn row_to_company(row: &rusqlite::Row) -> rusqlite::Result<Company> {
        Ok(Company {
            id: row.get("id")?,
            name: row.get("name")?,
            created_at: row.get("created_at")?,
        })
    }

    fn row_to_contact(row: &rusqlite::Row) -> rusqlite::Result<Contact> {
        Ok(Contact {
            id: row.get("id")?,
            name: row.get("name")?,
            notes: row.get("notes")?,
            user_id: row.get("user_id")?,
            created_at: row.get("created_at")?,
        })
    }

    fn row_to_listing(row: &rusqlite::Row) -> rusqlite::Result<Listing> {
        Ok(Listing {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            url: row.get("url")?,
            notes: row.get("notes")?,
            user_id: row.get("user_id")?,
            company_id: row.get("company_id")?,
            created_at: row.get("created_at")?,
        })
    }
}

impl BoardStore for SqliteBoardStore {
    fn insert_user(&self, email: &str, password_hash: &str, hasher: &str) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO users (email, password_hash, hasher) VALUES (?1, ?2, ?3)",
            params![email, password_hash, hasher],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update_user_password(&self, user_id: i64, password_hash: &str, hasher: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE users SET password_hash = ?1, hasher = ?2 WHERE id = ?3",
            params![password_hash, hasher, user_id],
        )?;
        if updated == 0 {
            anyhow::bail!("No user with id {}", user_id);
        }
        Ok(())
    }

    fn find_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let user = conn
            .query_row(
                "SELECT id, email, password_hash, hasher, created_at FROM users WHERE id = ?1",
                params![id],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let user = conn
            .query_row(
                "SELECT id, email, password_hash, hasher, created_at FROM users
                 WHERE lower(email) = lower(?1)",
                params![email],
                Self::row_to_user,
            )
            .optional()?;
        Ok(user)
    }

    fn all_user_emails(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT email FROM users ORDER BY email")?;
        let emails = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(emails)
    }

    fn insert_company(&self, name: &str) -> Result<Company> {
        let conn = self.conn.lock().unwrap();
        conn.execute("INSERT INTO companies (name) VALUES (?1)", params![name])?;
        let id = conn.last_insert_rowid();
        let company = conn.query_row(
            "SELECT id, name, created_at FROM companies WHERE id = ?1",
            params![id],
            Self::row_to_company,
        )?;
        Ok(company)
    }

    fn find_company(&self, id: i64) -> Result<Option<Company>> {
        let conn = self.conn.lock().unwrap();
        let company = conn
            .query_row(
                "SELECT id, name, created_at FROM companies WHERE id = ?1",
                params![id],
                Self::row_to_company,
            )
            .optional()?;
        Ok(company)
    }

    fn all_companies(&self) -> Result<Vec<Company>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name, created_at FROM companies ORDER BY id")?;
        let companies = stmt
            .query_map([], Self::row_to_company)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(companies)
    }

    fn insert_contact(&self, user_id: i64, name: &str, notes: Option<&str>) -> Result<Contact> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO contacts (name, notes, user_id) VALUES (?1, ?2, ?3)",
            params![name, notes, user_id],
        )?;
        let id = conn.last_insert_rowid();
        let contact = conn.query_row(
            "SELECT id, name, notes, user_id, created_at FROM contacts WHERE id = ?1",
            params![id],
            Self::row_to_contact,
        )?;
        Ok(contact)
    }

    fn find_contact(&self, id: i64) -> Result<Option<Contact>> {
        let conn = self.conn.lock().unwrap();
        let contact = conn
            .query_row(
                "SELECT id, name, notes, user_id, created_at FROM contacts WHERE id = ?1",
                params![id],
                Self::row_to_contact,
            )
            .optional()?;
        Ok(contact)
    }

    fn contacts_for_owner(&self, user_id: i64) -> Result<Vec<Contact>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, notes, user_id, created_at FROM contacts
             WHERE user_id = ?1 ORDER BY id",
        )?;
        let contacts = stmt
            .query_map(params![user_id], Self::row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(contacts)
    }

    fn insert_listing(&self, user_id: i64, fields: &ListingFields) -> Result<Listing> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO listings (title, description, url, notes, user_id, company_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.title,
                fields.description,
                fields.url,
                fields.notes,
                user_id,
                fields.company_id,
            ],
        )?;
        let id = conn.last_insert_rowid();
        let listing = conn.query_row(
            "SELECT id, title, description, url, notes, user_id, company_id, created_at
             FROM listings WHERE id = ?1",
            params![id],
            Self::row_to_listing,
        )?;
        Ok(listing)
    }

    fn find_listing_for_owner(&self, id: i64, user_id: i64) -> Result<Option<Listing>> {
        let conn = self.conn.lock().unwrap();
        let listing = conn
            .query_row(
                "SELECT id, title, description, url, notes, user_id, company_id, created_at
                 FROM listings WHERE id = ?1 AND user_id = ?2",
                params![id, user_id],
                Self::row_to_listing,
            )
            .optional()?;
        Ok(listing)
    }

    fn listings_for_owner(&self, user_id: i64) -> Result<Vec<Listing>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, title, description, url, notes, user_id, company_id, created_at
             FROM listings WHERE user_id = ?1 ORDER BY id DESC",
        )?;
        let listings = stmt
            .query_map(params![user_id], Self::row_to_listing)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(listings)
    }

    fn update_listing(&self, id: i64, fields: &ListingFields) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            "UPDATE listings SET title = ?1, description = ?2, url = ?3, notes = ?4,
             company_id = ?5 WHERE id = ?6",
            params![
                fields.title,
                fields.description,
                fields.url,
                fields.notes,
                fields.company_id,
                id,
            ],
        )?;
        if updated == 0 {
            anyhow::bail!("No listing with id {}", id);
        }
        Ok(())
    }

    fn delete_listing(&self, id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let deleted = conn.execute("DELETE FROM listings WHERE id = ?1", params![id])?;
        if deleted == 0 {
            anyhow::bail!("No listing with id {}", id);
        }
        Ok(())
    }

    fn add_listing_contact(&self, listing_id: i64, contact_id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO listing_contacts (listing_id, contact_id) VALUES (?1, ?2)",
            params![listing_id, contact_id],
        )?;
        Ok(())
    }

    fn remove_listing_contact(&self, listing_id: i64, contact_id: i64) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM listing_contacts WHERE listing_id = ?1 AND contact_id = ?2",
            params![listing_id, contact_id],
        )?;
        Ok(())
    }

    fn contacts_for_listing(&self, listing_id: i64) -> Result<Vec<Contact>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT c.id, c.name, c.notes, c.user_id, c.created_at
             FROM contacts c
             JOIN listing_contacts lc ON lc.contact_id = c.id
             WHERE lc.listing_id = ?1
             ORDER BY lc.id",
        )?;
        let contacts = stmt
            .query_map(params![listing_id], Self::row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(contacts)
    }
}
