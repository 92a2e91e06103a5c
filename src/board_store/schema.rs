//! SQLite schema definitions for the board database.
//!
//! Five tables: users, companies, contacts, listings and the
//! listing_contacts join table.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema, DEFAULT_TIMESTAMP,
};

const USER_FK: ForeignKey = ForeignKey {
    foreign_table: "users",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const COMPANY_FK: ForeignKey = ForeignKey {
    foreign_table: "companies",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::SetNull,
};

const LISTING_FK: ForeignKey = ForeignKey {
    foreign_table: "listings",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

const CONTACT_FK: ForeignKey = ForeignKey {
    foreign_table: "contacts",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Cascade,
};

/// Accounts. Email lookup is case-insensitive (lower(email) at query time),
/// the UNIQUE constraint is on the stored form.
const USERS_TABLE_V1: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("email", &SqlType::Text, non_null = true, is_unique = true),
        sqlite_column!("password_hash", &SqlType::Text, non_null = true),
        sqlite_column!("hasher", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[],
    unique_constraints: &[],
};

/// No uniqueness on name: creating two companies called "Acme" yields two rows.
const COMPANIES_TABLE_V1: Table = Table {
    name: "companies",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[],
    unique_constraints: &[],
};

const CONTACTS_TABLE_V1: Table = Table {
    name: "contacts",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("notes", &SqlType::Text),
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[("idx_contacts_user_id", "user_id")],
    unique_constraints: &[],
};

const LISTINGS_TABLE_V1: Table = Table {
    name: "listings",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("title", &SqlType::Text, non_null = true),
        sqlite_column!("description", &SqlType::Text),
        sqlite_column!("url", &SqlType::Text, non_null = true),
        sqlite_column!("notes", &SqlType::Text),
        sqlite_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&USER_FK)
        ),
        sqlite_column!(
            "company_id",
            &SqlType::Integer,
            foreign_key = Some(&COMPANY_FK)
        ),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[
        ("idx_listings_user_id", "user_id"),
        ("idx_listings_company_id", "company_id"),
    ],
    unique_constraints: &[],
};

/// The join row itself records which listing the association was created
/// through. Cascades from both sides: deleting a listing or a contact
/// removes only its association rows.
const LISTING_CONTACTS_TABLE_V1: Table = Table {
    name: "listing_contacts",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!(
            "listing_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&LISTING_FK)
        ),
        sqlite_column!(
            "contact_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&CONTACT_FK)
        ),
        sqlite_column!(
            "created_at",
            &SqlType::Integer,
            non_null = true,
            default_value = Some(DEFAULT_TIMESTAMP)
        ),
    ],
    indices: &[
        ("idx_listing_contacts_listing_id", "listing_id"),
        ("idx_listing_contacts_contact_id", "contact_id"),
    ],
    unique_constraints: &[&["listing_id", "contact_id"]],
};

/// All versioned schemas for the board database.
///
/// Version 1: users, companies, contacts, listings, listing_contacts
pub const BOARD_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[
        USERS_TABLE_V1,
        COMPANIES_TABLE_V1,
        CONTACTS_TABLE_V1,
        LISTINGS_TABLE_V1,
        LISTING_CONTACTS_TABLE_V1,
    ],
    migration: None, // Initial version has no migration
}];
