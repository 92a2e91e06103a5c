use serde::{Deserialize, Serialize};

/// A provisioned account. Users are created out of band (via cli-users),
/// never through the API surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub hasher: String,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub notes: Option<String>,
    pub user_id: i64,
    pub created_at: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub notes: Option<String>,
    pub user_id: i64,
    pub company_id: Option<i64>,
    pub created_at: i64,
}

/// A listing resolved with its related records. Relations are loaded by
/// explicit repository calls, there is no lazy loading.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ListingView {
    #[serde(flatten)]
    pub listing: Listing,
    pub company: Option<Company>,
    pub contacts: Vec<Contact>,
}

/// Field values for inserting or updating a listing row. The owner is
/// passed separately on insert and never changes on update.
#[derive(Clone, Debug, Default)]
pub struct ListingFields {
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub notes: Option<String>,
    pub company_id: Option<i64>,
}
