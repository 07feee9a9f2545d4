//! Per-entity state slices
//!
//! Each dashboard page keeps the last fetched list, a loading flag, the
//! field-error map of its open form and an optional popup message. Slices
//! change only by reducing a [`SliceAction`].

use crate::entities::{Listing, PageInfo};
use crate::field_errors::FieldErrors;

#[derive(Debug, Clone, PartialEq)]
pub struct EntitySlice<T> {
    pub items: Vec<T>,
    pub page: Option<PageInfo>,
    pub loading: bool,
    pub field_errors: FieldErrors,
    pub message: Option<String>,
}

impl<T> Default for EntitySlice<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: None,
            loading: false,
            field_errors: FieldErrors::new(),
            message: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SliceAction<T> {
    Loading(bool),
    /// Replace the list with a fresh fetch
    Loaded(Listing<T>),
    /// Replace the stored field errors
    FieldErrors(FieldErrors),
    /// Drop one field's error, e.g. when its input gains focus
    ClearFieldError(String),
    ClearFieldErrors,
    /// Non-field failure to surface in a popup
    Failed(String),
    DismissMessage,
    Reset,
}

impl<T> EntitySlice<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: SliceAction<T>) {
        match action {
            SliceAction::Loading(loading) => self.loading = loading,
            SliceAction::Loaded(listing) => {
                let (items, page) = listing.into_parts();
                self.items = items;
                self.page = page;
            }
            SliceAction::FieldErrors(errors) => self.field_errors = errors,
            SliceAction::ClearFieldError(field) => {
                self.field_errors.clear_field(&field);
            }
            SliceAction::ClearFieldErrors => self.field_errors.clear(),
            SliceAction::Failed(message) => self.message = Some(message),
            SliceAction::DismissMessage => self.message = None,
            SliceAction::Reset => *self = Self::default(),
        }
    }

    /// Copy-on-write variant of [`apply`](Self::apply) for reducer hooks
    #[must_use]
    pub fn reduced(&self, action: SliceAction<T>) -> Self
    where
        T: Clone,
    {
        let mut next = self.clone();
        next.apply(action);
        next
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Country, Page};

    fn country(id: i64, name: &str) -> Country {
        Country {
            id,
            name: name.into(),
            ..Country::default()
        }
    }

    #[test]
    fn test_loaded_replaces_items_and_page() {
        let mut slice = EntitySlice::new();
        slice.apply(SliceAction::Loaded(Listing::Items(vec![country(1, "Peru")])));
        assert_eq!(slice.items.len(), 1);
        assert!(slice.page.is_none());

        slice.apply(SliceAction::Loaded(Listing::Paged(Page {
            content: vec![country(2, "Chile"), country(3, "Bolivia")],
            info: PageInfo {
                total_elements: 2,
                ..PageInfo::default()
            },
        })));
        assert_eq!(slice.items[0].name, "Chile");
        assert_eq!(slice.page.map(|p| p.total_elements), Some(2));
    }

    #[test]
    fn test_field_errors_are_replaced_not_merged() {
        let mut slice: EntitySlice<Country> = EntitySlice::new();
        slice.apply(SliceAction::FieldErrors(
            FieldErrors::new().with("name", "required").with("code", "required"),
        ));
        slice.apply(SliceAction::FieldErrors(
            FieldErrors::new().with("phoneCode", "invalid"),
        ));

        assert_eq!(slice.field_error("phoneCode"), Some("invalid"));
        assert_eq!(slice.field_error("name"), None);
        assert_eq!(slice.field_errors.len(), 1);
    }

    #[test]
    fn test_focus_clears_only_that_field() {
        let mut slice: EntitySlice<Country> = EntitySlice::new();
        slice.apply(SliceAction::FieldErrors(
            FieldErrors::new().with("name", "required").with("code", "required"),
        ));
        slice.apply(SliceAction::ClearFieldError("name".into()));

        assert_eq!(slice.field_error("name"), None);
        assert_eq!(slice.field_error("code"), Some("required"));
    }

    #[test]
    fn test_reduced_leaves_original_untouched() {
        let slice: EntitySlice<Country> = EntitySlice::new();
        let next = slice.reduced(SliceAction::Failed("Country fetch failed".into()));
        assert!(slice.message.is_none());
        assert_eq!(next.message.as_deref(), Some("Country fetch failed"));

        let cleared = next.reduced(SliceAction::DismissMessage);
        assert!(cleared.message.is_none());
    }

    #[test]
    fn test_reset_returns_to_default() {
        let mut slice = EntitySlice::new();
        slice.apply(SliceAction::Loading(true));
        slice.apply(SliceAction::Loaded(Listing::Items(vec![country(1, "Peru")])));
        slice.apply(SliceAction::Reset);
        assert_eq!(slice, EntitySlice::default());
    }
}
