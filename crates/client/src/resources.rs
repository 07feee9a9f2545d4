//! Generic CRUD endpoints for dashboard entities
//!
//! Each entity is a zero-sized [`Resource`] marker describing where it lives
//! in the API; the gateway methods are generic over it.

use crate::error::ClientError;
use crate::gateway::{ApiRequest, AuthGateway};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::fmt;
use ticketcore_core::Validate;
use ticketcore_core::entities::{
    Artist, ArtistDraft, City, Country, CountryDraft, Entity, Event, EventDraft, Facility,
    FacilityDraft, Listing, Organizer, OrganizerDraft, PlaceDraft, Region, Show, ShowDraft,
    TicketCategory, TicketCategoryDraft, Venue, VenueDraft,
};
use tracing::debug;

/// Query parameter carrying a status change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKey {
    /// `?active=true|false`
    Active,
    /// `?status=...`
    Status,
}

impl StatusKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Status => "status",
        }
    }
}

/// New status for an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusValue {
    Flag(bool),
    Named(String),
}

impl fmt::Display for StatusValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

impl From<bool> for StatusValue {
    fn from(flag: bool) -> Self {
        Self::Flag(flag)
    }
}

impl From<&str> for StatusValue {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

/// Location of an entity collection in the API
pub trait Resource: 'static {
    type Record: Entity + DeserializeOwned + Clone + PartialEq + 'static;
    type Draft: Serialize + Validate;

    /// Singular display name used in messages
    const NAME: &'static str;
    const COLLECTION: &'static str;
    /// Collection the parent id belongs to, for nested writes
    const PARENT: Option<&'static str> = None;
    const LIST_QUERY: &'static [(&'static str, &'static str)] = &[];
    const STATUS_KEY: StatusKey = StatusKey::Active;

    fn list_path() -> String {
        format!("/{}", Self::COLLECTION)
    }

    /// Collection path for writes, nested under the parent when required
    fn write_path(parent: Option<i64>) -> Result<String, ClientError> {
        match (Self::PARENT, parent) {
            (None, _) => Ok(format!("/{}", Self::COLLECTION)),
            (Some(segment), Some(parent_id)) => {
                Ok(format!("/{segment}/{parent_id}/{}", Self::COLLECTION))
            }
            (Some(segment), None) => Err(ClientError::InvalidState(format!(
                "{} writes require a parent id under /{segment}",
                Self::NAME
            ))),
        }
    }

    fn item_path(parent: Option<i64>, id: i64) -> Result<String, ClientError> {
        Ok(format!("{}/{id}", Self::write_path(parent)?))
    }

    fn status_path(parent: Option<i64>, id: i64) -> Result<String, ClientError> {
        Ok(format!("{}/status", Self::item_path(parent, id)?))
    }
}

macro_rules! resource {
    (
        $(#[$meta:meta])*
        $marker:ident {
            record: $record:ty,
            draft: $draft:ty,
            name: $name:literal,
            collection: $collection:literal
            $(, parent: $parent:literal)?
            $(, list_path: $list_path:literal)?
            $(, list_query: $query:expr)?
            $(, status_key: $key:expr)?
            $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $marker;

        impl Resource for $marker {
            type Record = $record;
            type Draft = $draft;

            const NAME: &'static str = $name;
            const COLLECTION: &'static str = $collection;
            $(const PARENT: Option<&'static str> = Some($parent);)?
            $(const LIST_QUERY: &'static [(&'static str, &'static str)] = $query;)?
            $(const STATUS_KEY: StatusKey = $key;)?

            $(fn list_path() -> String {
                $list_path.to_string()
            })?
        }
    };
}

resource!(Countries {
    record: Country,
    draft: CountryDraft,
    name: "Country",
    collection: "countries",
});

resource!(
    /// Written under `/countries/{countryId}`
    Regions {
        record: Region,
        draft: PlaceDraft,
        name: "Region",
        collection: "regions",
        parent: "countries",
        list_query: &[("mode", "all")],
    }
);

resource!(
    /// Written under `/regions/{regionId}`
    Cities {
        record: City,
        draft: PlaceDraft,
        name: "City",
        collection: "cities",
        parent: "regions",
        list_query: &[("mode", "all")],
    }
);

resource!(Organizers {
    record: Organizer,
    draft: OrganizerDraft,
    name: "Organizer",
    collection: "organizers",
});

resource!(Artists {
    record: Artist,
    draft: ArtistDraft,
    name: "Artist",
    collection: "artists",
});

resource!(
    /// Venues are only listed through the paged endpoint and take
    /// `?status=true|false`
    Venues {
        record: Venue,
        draft: VenueDraft,
        name: "Venue",
        collection: "venues",
        list_path: "/venues/paged",
        status_key: StatusKey::Status,
    }
);

resource!(Facilities {
    record: Facility,
    draft: FacilityDraft,
    name: "Facility",
    collection: "facilities",
});

resource!(Events {
    record: Event,
    draft: EventDraft,
    name: "Event",
    collection: "events",
    status_key: StatusKey::Status,
});

resource!(Shows {
    record: Show,
    draft: ShowDraft,
    name: "Show",
    collection: "shows",
    status_key: StatusKey::Status,
});

/// Ticket categories are listed flat, written under `/shows/{showId}` and
/// toggled through the hyphenated `/ticket-categories` path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketCategories;

impl Resource for TicketCategories {
    type Record = TicketCategory;
    type Draft = TicketCategoryDraft;

    const NAME: &'static str = "Ticket category";
    const COLLECTION: &'static str = "ticketcategories";
    const PARENT: Option<&'static str> = Some("shows");
    const STATUS_KEY: StatusKey = StatusKey::Status;

    fn status_path(_parent: Option<i64>, id: i64) -> Result<String, ClientError> {
        Ok(format!("/ticket-categories/{id}/status"))
    }
}

impl AuthGateway {
    /// Fetch the full list of `R`
    pub async fn list<R: Resource>(&self) -> Result<Listing<R::Record>, ClientError> {
        let request = R::LIST_QUERY
            .iter()
            .fold(ApiRequest::get(R::list_path()), |request, (key, value)| {
                request.query(*key, value)
            });

        let listing = self
            .send::<Listing<R::Record>>(request)
            .await?
            .data
            .unwrap_or_default();
        debug!(resource = R::NAME, count = listing.len(), "list fetched");
        Ok(listing)
    }

    /// Shows scheduled for one event
    pub async fn list_shows_by_event(&self, event_id: i64) -> Result<Listing<Show>, ClientError> {
        let listing = self
            .send::<Listing<Show>>(ApiRequest::get(format!("/shows/event/{event_id}")))
            .await?
            .data
            .unwrap_or_default();
        debug!(event_id, count = listing.len(), "shows for event fetched");
        Ok(listing)
    }

    /// Create an `R`; the backend must answer with embedded 201
    pub async fn create<R: Resource>(
        &self,
        parent: Option<i64>,
        draft: &R::Draft,
    ) -> Result<String, ClientError> {
        let request = ApiRequest::post(R::write_path(parent)?)
            .json(draft)?
            .expect(201);
        Ok(self.send::<IgnoredAny>(request).await?.message)
    }

    pub async fn update<R: Resource>(
        &self,
        parent: Option<i64>,
        id: i64,
        draft: &R::Draft,
    ) -> Result<String, ClientError> {
        let request = ApiRequest::put(R::item_path(parent, id)?).json(draft)?;
        Ok(self.send::<IgnoredAny>(request).await?.message)
    }

    pub async fn set_status<R: Resource>(
        &self,
        parent: Option<i64>,
        id: i64,
        value: &StatusValue,
    ) -> Result<String, ClientError> {
        let request =
            ApiRequest::patch(R::status_path(parent, id)?).query(R::STATUS_KEY.as_str(), value);
        Ok(self.send::<IgnoredAny>(request).await?.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_paths() {
        assert_eq!(Countries::list_path(), "/countries");
        assert_eq!(Countries::item_path(None, 7).unwrap(), "/countries/7");
        assert_eq!(
            Countries::status_path(None, 7).unwrap(),
            "/countries/7/status"
        );
        assert_eq!(Countries::STATUS_KEY, StatusKey::Active);
        assert_eq!(Venues::STATUS_KEY.as_str(), "status");
    }

    #[test]
    fn test_venues_list_through_paged_endpoint() {
        assert_eq!(Venues::list_path(), "/venues/paged");
        assert_eq!(Venues::item_path(None, 3).unwrap(), "/venues/3");
        assert_eq!(Shows::list_path(), "/shows");
    }

    #[test]
    fn test_nested_paths_require_parent() {
        assert_eq!(Regions::list_path(), "/regions");
        assert_eq!(Regions::LIST_QUERY, &[("mode", "all")]);
        assert_eq!(
            Regions::write_path(Some(3)).unwrap(),
            "/countries/3/regions"
        );
        assert_eq!(
            Cities::status_path(Some(4), 9).unwrap(),
            "/regions/4/cities/9/status"
        );
        assert!(matches!(
            Cities::write_path(None),
            Err(ClientError::InvalidState(_))
        ));
    }

    #[test]
    fn test_ticket_category_paths() {
        assert_eq!(TicketCategories::list_path(), "/ticketcategories");
        assert_eq!(
            TicketCategories::write_path(Some(12)).unwrap(),
            "/shows/12/ticketcategories"
        );
        assert_eq!(
            TicketCategories::status_path(Some(12), 5).unwrap(),
            "/ticket-categories/5/status"
        );
    }

    #[test]
    fn test_status_value_display() {
        assert_eq!(StatusValue::from(false).to_string(), "false");
        assert_eq!(StatusValue::from("PUBLISHED").to_string(), "PUBLISHED");
    }
}
