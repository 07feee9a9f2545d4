//! How each resource is presented on its page

use crate::forms::FormDraft;
use ticketcore_client::Resource;
use ticketcore_core::entities::{
    Artist, ArtistDraft, ArtistSelection, City, Country, CountryDraft, Event, EventDraft,
    Facility, FacilityDraft, Organizer, OrganizerDraft, PlaceDraft, Region, Show, ShowDraft,
    TicketCategory, TicketCategoryDraft, Venue, VenueDraft,
};

pub use ticketcore_client::resources::{
    Artists, Cities, Countries, Events, Facilities, Organizers, Regions, Shows, TicketCategories,
    Venues,
};

pub const EVENT_STATUSES: &[&str] = &["DRAFT", "UPCOMING", "ACTIVE", "COMPLETED", "CANCELLED"];
pub const SHOW_STATUSES: &[&str] = &["SCHEDULED", "ONGOING", "COMPLETED", "CANCELLED", "POSTPONED"];
pub const TICKET_CATEGORY_STATUSES: &[&str] = &["ACTIVE", "INACTIVE", "SOLD_OUT"];

/// Parent collection a nested resource is written under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentKind {
    Country,
    Region,
    Show,
}

impl ParentKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::Region => "Region",
            Self::Show => "Show",
        }
    }

    /// Wire name used for the parent picker's field error
    pub const fn field(self) -> &'static str {
        match self {
            Self::Country => "countryId",
            Self::Region => "regionId",
            Self::Show => "showId",
        }
    }
}

pub trait AdminResource: Resource<Draft: FormDraft> {
    /// Plural page heading
    const TITLE: &'static str;
    const COLUMNS: &'static [&'static str];
    /// Lifecycle values offered for `?status=` resources with named states
    const STATUS_OPTIONS: &'static [&'static str] = &[];
    const PARENT_KIND: Option<ParentKind> = None;

    fn cells(record: &Self::Record) -> Vec<String>;

    /// Prefill for the edit dialog
    fn draft_of(record: &Self::Record) -> Self::Draft;

    fn parent_of(_record: &Self::Record) -> Option<i64> {
        None
    }
}

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("-")
        .to_string()
}

impl AdminResource for Countries {
    const TITLE: &'static str = "Countries";
    const COLUMNS: &'static [&'static str] = &["Country Name", "Code", "Phone Code"];

    fn cells(record: &Country) -> Vec<String> {
        vec![
            record.name.clone(),
            record.code.clone(),
            record.phone_code.clone(),
        ]
    }

    fn draft_of(record: &Country) -> CountryDraft {
        CountryDraft::from(record)
    }
}

impl AdminResource for Regions {
    const TITLE: &'static str = "Regions";
    const COLUMNS: &'static [&'static str] = &["Region Name", "Country"];
    const PARENT_KIND: Option<ParentKind> = Some(ParentKind::Country);

    fn cells(record: &Region) -> Vec<String> {
        vec![record.name.clone(), or_dash(record.country_name.as_deref())]
    }

    fn draft_of(record: &Region) -> PlaceDraft {
        PlaceDraft {
            name: record.name.clone(),
            active: record.active,
        }
    }

    fn parent_of(record: &Region) -> Option<i64> {
        record.country_id
    }
}

impl AdminResource for Cities {
    const TITLE: &'static str = "Cities";
    const COLUMNS: &'static [&'static str] = &["City Name", "Region"];
    const PARENT_KIND: Option<ParentKind> = Some(ParentKind::Region);

    fn cells(record: &City) -> Vec<String> {
        vec![record.name.clone(), or_dash(record.region_name.as_deref())]
    }

    fn draft_of(record: &City) -> PlaceDraft {
        PlaceDraft {
            name: record.name.clone(),
            active: record.active,
        }
    }

    fn parent_of(record: &City) -> Option<i64> {
        record.region_id
    }
}

impl AdminResource for Organizers {
    const TITLE: &'static str = "Organizers";
    const COLUMNS: &'static [&'static str] = &["Name", "Email", "Phone", "Website"];

    fn cells(record: &Organizer) -> Vec<String> {
        vec![
            record.name.clone(),
            record.email.clone(),
            record.phone.clone(),
            or_dash(record.website.as_deref()),
        ]
    }

    fn draft_of(record: &Organizer) -> OrganizerDraft {
        OrganizerDraft {
            name: record.name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            website: record.website.clone(),
        }
    }
}

impl AdminResource for Artists {
    const TITLE: &'static str = "Artists";
    const COLUMNS: &'static [&'static str] = &["Name", "Nationality", "Website"];

    fn cells(record: &Artist) -> Vec<String> {
        vec![
            record.name.clone(),
            record.nationality.clone(),
            or_dash(Some(&record.website_url)),
        ]
    }

    fn draft_of(record: &Artist) -> ArtistDraft {
        ArtistDraft {
            name: record.name.clone(),
            description: record.description.clone(),
            image_url: record.image_url.clone(),
            date_of_birth: record.date_of_birth.clone().unwrap_or_default(),
            nationality: record.nationality.clone(),
            website_url: record.website_url.clone(),
            instagram_handle: record.instagram_handle.clone().unwrap_or_default(),
            twitter_handle: record.twitter_handle.clone().unwrap_or_default(),
        }
    }
}

impl AdminResource for Venues {
    const TITLE: &'static str = "Venues";
    const COLUMNS: &'static [&'static str] = &["Name", "Address", "Type", "Capacity"];

    fn cells(record: &Venue) -> Vec<String> {
        vec![
            record.name.clone(),
            record.address.clone(),
            record.venue_type.clone(),
            record.total_capacity.to_string(),
        ]
    }

    fn draft_of(record: &Venue) -> VenueDraft {
        VenueDraft {
            name: record.name.clone(),
            address: record.address.clone(),
            description: record.description.clone(),
            city_id: record.city_id,
            pincode: record.pincode.clone(),
            latitude: record.latitude.unwrap_or_default(),
            longitude: record.longitude.unwrap_or_default(),
            venue_type: record.venue_type.clone(),
            total_capacity: record.total_capacity,
            contact_number: record.contact_number.clone(),
            email: record.email.clone(),
            supported_events: record.supported_events.clone(),
            facility_ids: record.facility_ids.clone(),
        }
    }
}

impl AdminResource for Facilities {
    const TITLE: &'static str = "Facilities";
    const COLUMNS: &'static [&'static str] = &["Name", "Description"];

    fn cells(record: &Facility) -> Vec<String> {
        vec![record.name.clone(), or_dash(Some(&record.description))]
    }

    fn draft_of(record: &Facility) -> FacilityDraft {
        FacilityDraft {
            name: record.name.clone(),
            description: record.description.clone(),
        }
    }
}

impl AdminResource for Events {
    const TITLE: &'static str = "Events";
    const COLUMNS: &'static [&'static str] = &["Name", "Category", "Genre", "Duration", "Price"];
    const STATUS_OPTIONS: &'static [&'static str] = EVENT_STATUSES;

    fn cells(record: &Event) -> Vec<String> {
        vec![
            record.name.clone(),
            record.category.clone(),
            record.genre.clone(),
            format!("{} min", record.duration_minutes),
            format!("{:.2}", record.base_price),
        ]
    }

    fn draft_of(record: &Event) -> EventDraft {
        EventDraft {
            name: record.name.clone(),
            short_description: record.short_description.clone(),
            long_description: record.long_description.clone(),
            terms_and_conditions: record.terms_and_conditions.clone(),
            category: record.category.clone(),
            genre: record.genre.clone(),
            languages: record.languages.clone(),
            duration_minutes: record.duration_minutes,
            age_restriction: record.age_restriction,
            certification: record.certification.clone(),
            release_date: record.release_date.clone().unwrap_or_default(),
            poster_url: record.poster_url.clone(),
            thumbnail_url: record.thumbnail_url.clone(),
            trailer_url: record.trailer_url.clone(),
            base_price: record.base_price,
            organizer_id: record.organizer_id,
            artists: record
                .artists
                .iter()
                .map(|artist| ArtistSelection {
                    artist_id: artist.id,
                    role: artist.role.clone(),
                })
                .collect(),
        }
    }
}

impl AdminResource for Shows {
    const TITLE: &'static str = "Shows";
    const COLUMNS: &'static [&'static str] = &["Event", "Venue", "Date", "Time", "Price"];
    const STATUS_OPTIONS: &'static [&'static str] = SHOW_STATUSES;

    fn cells(record: &Show) -> Vec<String> {
        vec![
            or_dash(record.event_name.as_deref()),
            or_dash(record.venue_name.as_deref()),
            record.show_date.clone(),
            format!("{} - {}", record.start_time, record.end_time),
            format!("{:.2}", record.base_price),
        ]
    }

    fn draft_of(record: &Show) -> ShowDraft {
        ShowDraft {
            show_date: record.show_date.clone(),
            start_time: record.start_time.clone(),
            end_time: record.end_time.clone(),
            event_id: record.event_id,
            venue_id: record.venue_id,
            base_price: record.base_price,
        }
    }
}

impl AdminResource for TicketCategories {
    const TITLE: &'static str = "Ticket Categories";
    const COLUMNS: &'static [&'static str] = &["Name", "Description", "Price", "Capacity"];
    const STATUS_OPTIONS: &'static [&'static str] = TICKET_CATEGORY_STATUSES;
    const PARENT_KIND: Option<ParentKind> = Some(ParentKind::Show);

    fn cells(record: &TicketCategory) -> Vec<String> {
        vec![
            record.name.clone(),
            or_dash(Some(&record.description)),
            format!("{:.2}", record.price),
            record.capacity.to_string(),
        ]
    }

    fn draft_of(record: &TicketCategory) -> TicketCategoryDraft {
        TicketCategoryDraft {
            name: record.name.clone(),
            description: record.description.clone(),
            price: record.price,
            capacity: record.capacity,
        }
    }

    fn parent_of(record: &TicketCategory) -> Option<i64> {
        record.show_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketcore_core::entities::EventArtist;
    use wasm_bindgen_test::wasm_bindgen_test;

    #[wasm_bindgen_test]
    fn test_cells_line_up_with_columns() {
        assert_eq!(
            Countries::cells(&Country::default()).len(),
            Countries::COLUMNS.len()
        );
        assert_eq!(Shows::cells(&Show::default()).len(), Shows::COLUMNS.len());
        assert_eq!(
            TicketCategories::cells(&TicketCategory::default()).len(),
            TicketCategories::COLUMNS.len()
        );
        assert_eq!(Events::cells(&Event::default()).len(), Events::COLUMNS.len());
    }

    #[wasm_bindgen_test]
    fn test_event_draft_keeps_artist_roles() {
        let event = Event {
            event_id: 3,
            artists: vec![EventArtist {
                id: 8,
                name: "Nina".into(),
                role: "Headliner".into(),
            }],
            ..Event::default()
        };
        let draft = Events::draft_of(&event);
        assert_eq!(draft.artists[0].artist_id, 8);
        assert_eq!(draft.artists[0].role, "Headliner");
    }

    #[wasm_bindgen_test]
    fn test_nested_resources_name_their_parent() {
        assert_eq!(Regions::PARENT_KIND, Some(ParentKind::Country));
        assert_eq!(Cities::PARENT_KIND.map(ParentKind::field), Some("regionId"));
        assert_eq!(Countries::PARENT_KIND, None);
    }
}
