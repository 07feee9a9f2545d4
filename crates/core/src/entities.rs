//! Records and drafts for the catalog, location and sales entities
//!
//! Records mirror what the backend returns (camelCase, tolerant of missing
//! fields). Drafts are the bodies sent on create/update and validate
//! themselves before submit. Only the fields the dashboard actually edits
//! or lists are modelled; unknown response fields are ignored.

use crate::field_errors::FieldErrors;
use crate::validation::{Validate, validators};
use serde::{Deserialize, Serialize};

/// Common accessors used by generic list views
pub trait Entity {
    fn id(&self) -> i64;

    /// Display name for tables and dropdowns
    fn label(&self) -> &str;

    /// Activation flag for entities toggled with `?active=`
    fn active(&self) -> Option<bool> {
        None
    }

    /// Lifecycle status for entities toggled with `?status=`
    fn status(&self) -> Option<&str> {
        None
    }
}

/// Pagination metadata of a paged list response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u32,
    pub last: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(flatten)]
    pub info: PageInfo,
}

/// List payload: some endpoints page, others return a bare array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(Page<T>),
    Items(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_parts(self) -> (Vec<T>, Option<PageInfo>) {
        match self {
            Self::Paged(page) => (page.content, Some(page.info)),
            Self::Items(items) => (items, None),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Paged(page) => page.content.len(),
            Self::Items(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::Items(Vec::new())
    }
}

// Locations

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub phone_code: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryDraft {
    pub name: String,
    pub code: String,
    pub phone_code: String,
    pub active: bool,
}

impl Default for CountryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            code: String::new(),
            phone_code: String::new(),
            active: true,
        }
    }
}

impl From<&Country> for CountryDraft {
    fn from(country: &Country) -> Self {
        Self {
            name: country.name.clone(),
            code: country.code.clone(),
            phone_code: country.phone_code.clone(),
            active: country.active,
        }
    }
}

impl Validate for CountryDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "name", &self.name);
        validators::required(&mut errors, "code", &self.code);
        validators::max_len(&mut errors, "code", &self.code, 3);
        validators::required(&mut errors, "phoneCode", &self.phone_code);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub country_id: Option<i64>,
    pub country_name: Option<String>,
}

/// Body for regions and cities; the parent travels in the path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDraft {
    pub name: String,
    pub active: bool,
}

impl Default for PlaceDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            active: true,
        }
    }
}

impl Validate for PlaceDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "name", &self.name);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct City {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub region_id: Option<i64>,
    pub region_name: Option<String>,
}

// Catalog

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Organizer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Validate for OrganizerDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "name", &self.name);
        validators::required(&mut errors, "email", &self.email);
        if !self.email.trim().is_empty() && !self.email.contains('@') {
            errors.set("email", "must be a valid email address");
        }
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub date_of_birth: Option<String>,
    pub nationality: String,
    pub website_url: String,
    pub instagram_handle: Option<String>,
    pub twitter_handle: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDraft {
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub date_of_birth: String,
    pub nationality: String,
    pub website_url: String,
    pub instagram_handle: String,
    pub twitter_handle: String,
}

impl Validate for ArtistDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "name", &self.name);
        validators::required(&mut errors, "nationality", &self.nationality);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub description: String,
    pub city_id: Option<i64>,
    pub pincode: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub venue_type: String,
    pub total_capacity: u32,
    pub contact_number: String,
    pub email: String,
    pub supported_events: Vec<String>,
    pub facility_ids: Vec<i64>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueDraft {
    pub name: String,
    pub address: String,
    pub description: String,
    pub city_id: Option<i64>,
    pub pincode: String,
    pub latitude: f64,
    pub longitude: f64,
    pub venue_type: String,
    pub total_capacity: u32,
    pub contact_number: String,
    pub email: String,
    pub supported_events: Vec<String>,
    pub facility_ids: Vec<i64>,
}

impl Validate for VenueDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "name", &self.name);
        validators::required(&mut errors, "address", &self.address);
        validators::required_id(&mut errors, "cityId", self.city_id);
        validators::positive(&mut errors, "totalCapacity", f64::from(self.total_capacity));
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Facility {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityDraft {
    pub name: String,
    pub description: String,
}

impl Validate for FacilityDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "name", &self.name);
        errors
    }
}

// Sales hierarchy

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventArtist {
    pub id: i64,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Event {
    #[serde(alias = "id")]
    pub event_id: i64,
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub terms_and_conditions: Vec<String>,
    pub category: String,
    pub genre: String,
    pub languages: Vec<String>,
    pub duration_minutes: u32,
    pub age_restriction: Option<u32>,
    pub certification: String,
    pub release_date: Option<String>,
    pub poster_url: String,
    pub thumbnail_url: String,
    pub trailer_url: String,
    pub base_price: f64,
    pub status: String,
    pub organizer_id: Option<i64>,
    pub artists: Vec<EventArtist>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSelection {
    pub artist_id: i64,
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub name: String,
    pub short_description: String,
    pub long_description: String,
    pub terms_and_conditions: Vec<String>,
    pub category: String,
    pub genre: String,
    pub languages: Vec<String>,
    pub duration_minutes: u32,
    pub age_restriction: Option<u32>,
    pub certification: String,
    pub release_date: String,
    pub poster_url: String,
    pub thumbnail_url: String,
    pub trailer_url: String,
    pub base_price: f64,
    pub organizer_id: Option<i64>,
    pub artists: Vec<ArtistSelection>,
}

impl Validate for EventDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "name", &self.name);
        validators::required(&mut errors, "shortDescription", &self.short_description);
        validators::positive(&mut errors, "durationMinutes", f64::from(self.duration_minutes));
        validators::positive(&mut errors, "basePrice", self.base_price);
        validators::non_empty(&mut errors, "languages", &self.languages);
        validators::non_empty(&mut errors, "artists", &self.artists);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Show {
    pub id: i64,
    pub event_id: Option<i64>,
    pub event_name: Option<String>,
    pub venue_id: Option<i64>,
    pub venue_name: Option<String>,
    pub show_date: String,
    pub start_time: String,
    pub end_time: String,
    pub base_price: f64,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowDraft {
    pub show_date: String,
    pub start_time: String,
    pub end_time: String,
    pub event_id: Option<i64>,
    pub venue_id: Option<i64>,
    pub base_price: f64,
}

impl Validate for ShowDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "showDate", &self.show_date);
        validators::required(&mut errors, "startTime", &self.start_time);
        validators::required(&mut errors, "endTime", &self.end_time);
        validators::required_id(&mut errors, "eventId", self.event_id);
        validators::required_id(&mut errors, "venueId", self.venue_id);
        validators::positive(&mut errors, "basePrice", self.base_price);
        errors
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TicketCategory {
    pub id: i64,
    pub show_id: Option<i64>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub capacity: u32,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCategoryDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub capacity: u32,
}

impl Validate for TicketCategoryDraft {
    fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        validators::required(&mut errors, "name", &self.name);
        validators::positive(&mut errors, "price", self.price);
        validators::positive(&mut errors, "capacity", f64::from(self.capacity));
        errors
    }
}

macro_rules! active_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entity for $ty {
                fn id(&self) -> i64 {
                    self.id
                }

                fn label(&self) -> &str {
                    &self.name
                }

                fn active(&self) -> Option<bool> {
                    Some(self.active)
                }
            }
        )+
    };
}

macro_rules! status_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Entity for $ty {
                fn id(&self) -> i64 {
                    self.id
                }

                fn label(&self) -> &str {
                    &self.name
                }

                fn status(&self) -> Option<&str> {
                    Some(&self.status)
                }
            }
        )+
    };
}

active_entity!(Country, Region, City, Organizer, Venue, Facility);
status_entity!(TicketCategory);

impl Entity for Artist {
    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn active(&self) -> Option<bool> {
        Some(self.active.unwrap_or(true))
    }
}

impl Entity for Event {
    fn id(&self) -> i64 {
        self.event_id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
}

impl Entity for Show {
    fn id(&self) -> i64 {
        self.id
    }

    fn label(&self) -> &str {
        self.event_name.as_deref().unwrap_or(&self.show_date)
    }

    fn status(&self) -> Option<&str> {
        Some(&self.status)
    }
}
