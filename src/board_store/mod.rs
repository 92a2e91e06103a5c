mod models;
mod schema;
mod sqlite_board_store;

pub use models::{Company, Contact, Listing, ListingFields, ListingView, User};
pub use schema::BOARD_VERSIONED_SCHEMAS;
pub use sqlite_board_store::SqliteBoardStore;

use anyhow::Result;

/// Narrow repository interface over the ownership store.
///
/// Listing accessors take the owning user id so callers cannot reach rows
/// they do not own. `find_contact` is unscoped: association bookkeeping is
/// gated by the listing's ownership instead.
pub trait BoardStore: Send + Sync {
    // Users
    fn insert_user(&self, email: &str, password_hash: &str, hasher: &str) -> Result<i64>;
    fn update_user_password(&self, user_id: i64, password_hash: &str, hasher: &str) -> Result<()>;
    fn find_user_by_id(&self, id: i64) -> Result<Option<User>>;
    /// Email match is case-insensitive.
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn all_user_emails(&self) -> Result<Vec<String>>;

    // Companies
    fn insert_company(&self, name: &str) -> Result<Company>;
    fn find_company(&self, id: i64) -> Result<Option<Company>>;
    fn all_companies(&self) -> Result<Vec<Company>>;

    // Contacts
    fn insert_contact(&self, user_id: i64, name: &str, notes: Option<&str>) -> Result<Contact>;
    fn find_contact(&self, id: i64) -> Result<Option<Contact>>;
    fn contacts_for_owner(&self, user_id: i64) -> Result<Vec<Contact>>;

    // Listings
    fn insert_listing(&self, user_id: i64, fields: &ListingFields) -> Result<Listing>;
    fn find_listing_for_owner(&self, id: i64, user_id: i64) -> Result<Option<Listing>>;
    /// The actor's listings, newest first.
    fn listings_for_owner(&self, user_id: i64) -> Result<Vec<Listing>>;
    /// Applies field changes to an already ownership-checked row. The owner
    /// column is never touched.
    fn update_listing(&self, id: i64, fields: &ListingFields) -> Result<()>;
    /// Association rows cascade at the schema level.
    fn delete_listing(&self, id: i64) -> Result<()>;

    // Listing <-> Contact association
    fn add_listing_contact(&self, listing_id: i64, contact_id: i64) -> Result<()>;
    /// Removes only the association row, never the contact.
    fn remove_listing_contact(&self, listing_id: i64, contact_id: i64) -> Result<()>;
    fn contacts_for_listing(&self, listing_id: i64) -> Result<Vec<Contact>>;
}
