//! The mutation gateway.
//!
//! One method per API operation. Every method takes the authenticated
//! actor's user id and scopes reads and writes to it; an ownership check
//! that fails is indistinguishable from a missing row.

use crate::board_store::{BoardStore, Company, Contact, Listing, ListingFields, ListingView};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Covers both "no such row" and "row owned by someone else".
    #[error("You do not have access to this listing")]
    Forbidden,
    #[error("{0}")]
    Storage(#[from] anyhow::Error),
}

#[derive(Clone, Debug, Deserialize)]
pub struct ListingInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub company_id: Option<i64>,
    /// When set, a Company row with this name is created first and the
    /// listing points at it. No dedup: the same name yields a new row
    /// every time.
    #[serde(default)]
    pub new_company: Option<String>,
}

/// A contact paired with the listing the operation touched, mirroring the
/// shape the API returns from contact mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactAssociation {
    pub contact: Contact,
    pub listing_id: Option<i64>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ContactInput {
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Listing to associate the new contact with.
    #[serde(default)]
    pub listing_id: Option<i64>,
}

pub struct MutationGateway {
    store: Arc<dyn BoardStore>,
}

impl MutationGateway {
    pub fn new(store: Arc<dyn BoardStore>) -> Self {
        Self { store }
    }

    fn resolve_view(&self, listing: Listing) -> Result<ListingView, GatewayError> {
        let company = match listing.company_id {
            Some(company_id) => self.store.find_company(company_id)?,
            None => None,
        };
        let contacts = self.store.contacts_for_listing(listing.id)?;
        Ok(ListingView {
            listing,
            company,
            contacts,
        })
    }

    /// Resolves the input's company reference: `new_company` wins over
    /// `company_id`. The company insert and the listing write are two
    /// separate statements; a failure in between leaves the company behind.
    fn resolve_company_id(&self, input: &ListingInput) -> Result<Option<i64>, GatewayError> {
        match &input.new_company {
            Some(name) => Ok(Some(self.store.insert_company(name)?.id)),
            None => Ok(input.company_id),
        }
    }

    fn listing_fields(input: &ListingInput, company_id: Option<i64>) -> ListingFields {
        ListingFields {
            title: input.title.clone(),
            description: input.description.clone(),
            url: input.url.clone(),
            notes: input.notes.clone(),
            company_id,
        }
    }

    pub fn listings(&self, actor_id: i64) -> Result<Vec<ListingView>, GatewayError> {
        self.store
            .listings_for_owner(actor_id)?
            .into_iter()
            .map(|listing| self.resolve_view(listing))
            .collect()
    }

    pub fn companies(&self) -> Result<Vec<Company>, GatewayError> {
        Ok(self.store.all_companies()?)
    }

    pub fn contacts(&self, actor_id: i64) -> Result<Vec<Contact>, GatewayError> {
        Ok(self.store.contacts_for_owner(actor_id)?)
    }

    pub fn create_listing(
        &self,
        actor_id: i64,
        input: &ListingInput,
    ) -> Result<ListingView, GatewayError> {
        let company_id = self.resolve_company_id(input)?;
        let listing = self
            .store
            .insert_listing(actor_id, &Self::listing_fields(input, company_id))?;
        self.resolve_view(listing)
    }

    pub fn update_listing(
        &self,
        actor_id: i64,
        listing_id: i64,
        input: &ListingInput,
    ) -> Result<ListingView, GatewayError> {
        // Ownership check before any write
        self.store
            .find_listing_for_owner(listing_id, actor_id)?
            .ok_or(GatewayError::Forbidden)?;

        let company_id = self.resolve_company_id(input)?;
        self.store
            .update_listing(listing_id, &Self::listing_fields(input, company_id))?;
        let listing = self
            .store
            .find_listing_for_owner(listing_id, actor_id)?
            .ok_or(GatewayError::Forbidden)?;
        self.resolve_view(listing)
    }

    /// Deletes the listing and returns its state as it was before deletion.
    pub fn delete_listing(
        &self,
        actor_id: i64,
        listing_id: i64,
    ) -> Result<ListingView, GatewayError> {
        let listing = self
            .store
            .find_listing_for_owner(listing_id, actor_id)?
            .ok_or(GatewayError::Forbidden)?;
        let view = self.resolve_view(listing)?;
        self.store.delete_listing(listing_id)?;
        Ok(view)
    }

    pub fn create_contact(
        &self,
        actor_id: i64,
        input: &ContactInput,
    ) -> Result<ContactAssociation, GatewayError> {
        let contact = self
            .store
            .insert_contact(actor_id, &input.name, input.notes.as_deref())?;
        if let Some(listing_id) = input.listing_id {
            self.store.add_listing_contact(listing_id, contact.id)?;
        }
        Ok(ContactAssociation {
            contact,
            listing_id: input.listing_id,
        })
    }

    /// Removes a contact from a listing. The contact row itself survives.
    pub fn remove_contact(
        &self,
        actor_id: i64,
        listing_id: i64,
        contact_id: i64,
    ) -> Result<ContactAssociation, GatewayError> {
        self.store
            .find_listing_for_owner(listing_id, actor_id)?
            .ok_or(GatewayError::Forbidden)?;
        let contact = self
            .store
            .find_contact(contact_id)?
            .ok_or(GatewayError::Forbidden)?;
        self.store.remove_listing_contact(listing_id, contact_id)?;
        Ok(ContactAssociation {
            contact,
            listing_id: Some(listing_id),
        })
    }
}
