//! String-level form bindings for entity drafts
//!
//! Every draft exposes its editable fields by wire name so one generic
//! dialog can render, edit and attach errors to any of them.

use ticketcore_core::Validate;
use ticketcore_core::entities::{
    ArtistDraft, ArtistSelection, CountryDraft, EventDraft, FacilityDraft, OrganizerDraft,
    PlaceDraft, ShowDraft, TicketCategoryDraft, VenueDraft,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Date,
    Time,
    Url,
    /// Comma separated values
    List,
    /// Yes/no select
    Flag,
}

impl FieldKind {
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Number => "number",
            Self::Date => "date",
            Self::Time => "time",
            Self::Url => "url",
            Self::Text | Self::List | Self::Flag => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name; errors from the backend are keyed by it
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Only offered in the create dialog
    pub create_only: bool,
}

const fn field(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind,
        create_only: false,
    }
}

const fn create_only(key: &'static str, label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        key,
        label,
        kind,
        create_only: true,
    }
}

pub trait FormDraft: Validate + Default + Clone + PartialEq + 'static {
    const FIELDS: &'static [FieldSpec];

    fn value(&self, key: &str) -> String;

    fn set_value(&mut self, key: &str, value: &str);
}

fn number<T: std::str::FromStr + Default>(value: &str) -> T {
    value.trim().parse().unwrap_or_default()
}

fn id(value: &str) -> Option<i64> {
    value.trim().parse().ok().filter(|id| *id > 0)
}

fn show_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn flag(value: &str) -> bool {
    value == "true"
}

impl FormDraft for CountryDraft {
    const FIELDS: &'static [FieldSpec] = &[
        field("name", "Country Name", FieldKind::Text),
        field("code", "Code", FieldKind::Text),
        field("phoneCode", "Phone Code", FieldKind::Text),
        create_only("active", "Active", FieldKind::Flag),
    ];

    fn value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "code" => self.code.clone(),
            "phoneCode" => self.phone_code.clone(),
            "active" => self.active.to_string(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_string(),
            "code" => self.code = value.to_uppercase(),
            "phoneCode" => self.phone_code = value.to_string(),
            "active" => self.active = flag(value),
            _ => {}
        }
    }
}

impl FormDraft for PlaceDraft {
    const FIELDS: &'static [FieldSpec] = &[
        field("name", "Name", FieldKind::Text),
        create_only("active", "Active", FieldKind::Flag),
    ];

    fn value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "active" => self.active.to_string(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_string(),
            "active" => self.active = flag(value),
            _ => {}
        }
    }
}

impl FormDraft for OrganizerDraft {
    const FIELDS: &'static [FieldSpec] = &[
        field("name", "Name", FieldKind::Text),
        field("email", "Email", FieldKind::Email),
        field("phone", "Phone", FieldKind::Text),
        field("website", "Website", FieldKind::Url),
    ];

    fn value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "website" => self.website.clone().unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_string(),
            "email" => self.email = value.to_string(),
            "phone" => self.phone = value.to_string(),
            "website" => {
                self.website = Some(value.trim().to_string()).filter(|site| !site.is_empty());
            }
            _ => {}
        }
    }
}

impl FormDraft for ArtistDraft {
    const FIELDS: &'static [FieldSpec] = &[
        field("name", "Name", FieldKind::Text),
        field("description", "Description", FieldKind::Text),
        field("imageUrl", "Image URL", FieldKind::Url),
        field("dateOfBirth", "Date of Birth", FieldKind::Date),
        field("nationality", "Nationality", FieldKind::Text),
        field("websiteUrl", "Website", FieldKind::Url),
        field("instagramHandle", "Instagram", FieldKind::Text),
        field("twitterHandle", "Twitter", FieldKind::Text),
    ];

    fn value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            "imageUrl" => self.image_url.clone(),
            "dateOfBirth" => self.date_of_birth.clone(),
            "nationality" => self.nationality.clone(),
            "websiteUrl" => self.website_url.clone(),
            "instagramHandle" => self.instagram_handle.clone(),
            "twitterHandle" => self.twitter_handle.clone(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, key: &str, value: &str) {
        let value = value.to_string();
        match key {
            "name" => self.name = value,
            "description" => self.description = value,
            "imageUrl" => self.image_url = value,
            "dateOfBirth" => self.date_of_birth = value,
            "nationality" => self.nationality = value,
            "websiteUrl" => self.website_url = value,
            "instagramHandle" => self.instagram_handle = value,
            "twitterHandle" => self.twitter_handle = value,
            _ => {}
        }
    }
}

impl FormDraft for VenueDraft {
    const FIELDS: &'static [FieldSpec] = &[
        field("name", "Name", FieldKind::Text),
        field("address", "Address", FieldKind::Text),
        field("description", "Description", FieldKind::Text),
        field("cityId", "City ID", FieldKind::Number),
        field("pincode", "Pincode", FieldKind::Text),
        field("latitude", "Latitude", FieldKind::Number),
        field("longitude", "Longitude", FieldKind::Number),
        field("venueType", "Venue Type", FieldKind::Text),
        field("totalCapacity", "Total Capacity", FieldKind::Number),
        field("contactNumber", "Contact Number", FieldKind::Text),
        field("email", "Email", FieldKind::Email),
        field("supportedEvents", "Supported Events", FieldKind::List),
        field("facilityIds", "Facility IDs", FieldKind::List),
    ];

    fn value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "address" => self.address.clone(),
            "description" => self.description.clone(),
            "cityId" => show_id(self.city_id),
            "pincode" => self.pincode.clone(),
            "latitude" => self.latitude.to_string(),
            "longitude" => self.longitude.to_string(),
            "venueType" => self.venue_type.clone(),
            "totalCapacity" => self.total_capacity.to_string(),
            "contactNumber" => self.contact_number.clone(),
            "email" => self.email.clone(),
            "supportedEvents" => self.supported_events.join(", "),
            "facilityIds" => self
                .facility_ids
                .iter()
                .map(i64::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_string(),
            "address" => self.address = value.to_string(),
            "description" => self.description = value.to_string(),
            "cityId" => self.city_id = id(value),
            "pincode" => self.pincode = value.to_string(),
            "latitude" => self.latitude = number(value),
            "longitude" => self.longitude = number(value),
            "venueType" => self.venue_type = value.to_string(),
            "totalCapacity" => self.total_capacity = number(value),
            "contactNumber" => self.contact_number = value.to_string(),
            "email" => self.email = value.to_string(),
            "supportedEvents" => self.supported_events = list(value),
            "facilityIds" => {
                self.facility_ids = list(value).iter().filter_map(|item| id(item)).collect();
            }
            _ => {}
        }
    }
}

impl FormDraft for FacilityDraft {
    const FIELDS: &'static [FieldSpec] = &[
        field("name", "Name", FieldKind::Text),
        field("description", "Description", FieldKind::Text),
    ];

    fn value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => {}
        }
    }
}

/// Role given to artists added by id from the event form
pub const DEFAULT_ARTIST_ROLE: &str = "Performer";

impl FormDraft for EventDraft {
    const FIELDS: &'static [FieldSpec] = &[
        field("name", "Name", FieldKind::Text),
        field("shortDescription", "Short Description", FieldKind::Text),
        field("longDescription", "Long Description", FieldKind::Text),
        field("category", "Category", FieldKind::Text),
        field("genre", "Genre", FieldKind::Text),
        field("languages", "Languages", FieldKind::List),
        field("durationMinutes", "Duration (minutes)", FieldKind::Number),
        field("ageRestriction", "Age Restriction", FieldKind::Number),
        field("certification", "Certification", FieldKind::Text),
        field("releaseDate", "Release Date", FieldKind::Date),
        field("posterUrl", "Poster URL", FieldKind::Url),
        field("thumbnailUrl", "Thumbnail URL", FieldKind::Url),
        field("trailerUrl", "Trailer URL", FieldKind::Url),
        field("basePrice", "Base Price", FieldKind::Number),
        field("organizerId", "Organizer ID", FieldKind::Number),
        field("artists", "Artist IDs", FieldKind::List),
        field("termsAndConditions", "Terms and Conditions", FieldKind::List),
    ];

    fn value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "shortDescription" => self.short_description.clone(),
            "longDescription" => self.long_description.clone(),
            "category" => self.category.clone(),
            "genre" => self.genre.clone(),
            "languages" => self.languages.join(", "),
            "durationMinutes" => self.duration_minutes.to_string(),
            "ageRestriction" => self
                .age_restriction
                .map(|age| age.to_string())
                .unwrap_or_default(),
            "certification" => self.certification.clone(),
            "releaseDate" => self.release_date.clone(),
            "posterUrl" => self.poster_url.clone(),
            "thumbnailUrl" => self.thumbnail_url.clone(),
            "trailerUrl" => self.trailer_url.clone(),
            "basePrice" => self.base_price.to_string(),
            "organizerId" => show_id(self.organizer_id),
            "artists" => self
                .artists
                .iter()
                .map(|artist| artist.artist_id.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            "termsAndConditions" => self.terms_and_conditions.join(", "),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_string(),
            "shortDescription" => self.short_description = value.to_string(),
            "longDescription" => self.long_description = value.to_string(),
            "category" => self.category = value.to_string(),
            "genre" => self.genre = value.to_string(),
            "languages" => self.languages = list(value),
            "durationMinutes" => self.duration_minutes = number(value),
            "ageRestriction" => self.age_restriction = value.trim().parse().ok(),
            "certification" => self.certification = value.to_string(),
            "releaseDate" => self.release_date = value.to_string(),
            "posterUrl" => self.poster_url = value.to_string(),
            "thumbnailUrl" => self.thumbnail_url = value.to_string(),
            "trailerUrl" => self.trailer_url = value.to_string(),
            "basePrice" => self.base_price = number(value),
            "organizerId" => self.organizer_id = id(value),
            "artists" => {
                // keep roles of artists that stay selected
                let previous = std::mem::take(&mut self.artists);
                self.artists = list(value)
                    .iter()
                    .filter_map(|item| id(item))
                    .map(|artist_id| {
                        previous
                            .iter()
                            .find(|artist| artist.artist_id == artist_id)
                            .cloned()
                            .unwrap_or_else(|| ArtistSelection {
                                artist_id,
                                role: DEFAULT_ARTIST_ROLE.to_string(),
                            })
                    })
                    .collect();
            }
            "termsAndConditions" => self.terms_and_conditions = list(value),
            _ => {}
        }
    }
}

impl FormDraft for ShowDraft {
    const FIELDS: &'static [FieldSpec] = &[
        field("eventId", "Event ID", FieldKind::Number),
        field("venueId", "Venue ID", FieldKind::Number),
        field("showDate", "Show Date", FieldKind::Date),
        field("startTime", "Start Time", FieldKind::Time),
        field("endTime", "End Time", FieldKind::Time),
        field("basePrice", "Base Price", FieldKind::Number),
    ];

    fn value(&self, key: &str) -> String {
        match key {
            "eventId" => show_id(self.event_id),
            "venueId" => show_id(self.venue_id),
            "showDate" => self.show_date.clone(),
            "startTime" => self.start_time.clone(),
            "endTime" => self.end_time.clone(),
            "basePrice" => self.base_price.to_string(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, key: &str, value: &str) {
        match key {
            "eventId" => self.event_id = id(value),
            "venueId" => self.venue_id = id(value),
            "showDate" => self.show_date = value.to_string(),
            "startTime" => self.start_time = value.to_string(),
            "endTime" => self.end_time = value.to_string(),
            "basePrice" => self.base_price = number(value),
            _ => {}
        }
    }
}

impl FormDraft for TicketCategoryDraft {
    const FIELDS: &'static [FieldSpec] = &[
        field("name", "Name", FieldKind::Text),
        field("description", "Description", FieldKind::Text),
        field("price", "Price", FieldKind::Number),
        field("capacity", "Capacity", FieldKind::Number),
    ];

    fn value(&self, key: &str) -> String {
        match key {
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            "price" => self.price.to_string(),
            "capacity" => self.capacity.to_string(),
            _ => String::new(),
        }
    }

    fn set_value(&mut self, key: &str, value: &str) {
        match key {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            "price" => self.price = number(value),
            "capacity" => self.capacity = number(value),
            _ => {}
        }
    }
}
