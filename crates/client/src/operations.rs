//! Dispatch-style CRUD operations
//!
//! These drive an entity slice through `SliceAction`s instead of returning
//! errors: the caller only learns whether the operation succeeded. Loading
//! is raised before the request and always lowered afterwards; successful
//! writes refetch the list.

use crate::error::ClientError;
use crate::gateway::AuthGateway;
use crate::resources::{Resource, StatusValue};
use ticketcore_core::{SliceAction, Validate};
use tracing::{info, warn};

/// Turn a failure into slice state: field errors when the backend (or the
/// draft) named fields, a popup message otherwise
fn report<R: Resource>(
    error: &ClientError,
    action: &str,
    dispatch: &impl Fn(SliceAction<R::Record>),
) {
    warn!(resource = R::NAME, action, %error, "operation failed");
    match error.field_errors() {
        Some(fields) => dispatch(SliceAction::FieldErrors(fields.clone())),
        None => dispatch(SliceAction::Failed(error.user_message())),
    }
}

async fn load<R: Resource>(
    gateway: &AuthGateway,
    dispatch: &impl Fn(SliceAction<R::Record>),
) -> bool {
    match gateway.list::<R>().await {
        Ok(listing) => {
            dispatch(SliceAction::Loaded(listing));
            true
        }
        Err(error) => {
            report::<R>(&error, "fetch", dispatch);
            false
        }
    }
}

/// Fetch the list of `R` into the slice
pub async fn fetch_all<R: Resource>(
    gateway: &AuthGateway,
    dispatch: impl Fn(SliceAction<R::Record>),
) -> bool {
    dispatch(SliceAction::Loading(true));
    let loaded = load::<R>(gateway, &dispatch).await;
    dispatch(SliceAction::Loading(false));
    loaded
}

/// Validate and submit a write, then refetch on success
///
/// `write` is not polled when the draft fails validation.
async fn submit<R: Resource>(
    gateway: &AuthGateway,
    action: &str,
    draft: Option<&R::Draft>,
    write: impl Future<Output = Result<String, ClientError>>,
    dispatch: impl Fn(SliceAction<R::Record>),
) -> bool {
    if let Some(draft) = draft {
        let errors = draft.validate();
        if !errors.is_empty() {
            info!(resource = R::NAME, action, fields = %errors, "draft rejected locally");
            dispatch(SliceAction::FieldErrors(errors));
            return false;
        }
    }

    dispatch(SliceAction::Loading(true));
    let succeeded = match write.await {
        Ok(message) => {
            info!(resource = R::NAME, action, %message, "operation succeeded");
            dispatch(SliceAction::ClearFieldErrors);
            load::<R>(gateway, &dispatch).await;
            true
        }
        Err(error) => {
            report::<R>(&error, action, &dispatch);
            false
        }
    };
    dispatch(SliceAction::Loading(false));
    succeeded
}

/// Create an `R`; the backend must confirm with embedded 201
pub async fn submit_create<R: Resource>(
    gateway: &AuthGateway,
    parent: Option<i64>,
    draft: &R::Draft,
    dispatch: impl Fn(SliceAction<R::Record>),
) -> bool {
    submit::<R>(
        gateway,
        "create",
        Some(draft),
        gateway.create::<R>(parent, draft),
        dispatch,
    )
    .await
}

pub async fn submit_update<R: Resource>(
    gateway: &AuthGateway,
    parent: Option<i64>,
    id: i64,
    draft: &R::Draft,
    dispatch: impl Fn(SliceAction<R::Record>),
) -> bool {
    submit::<R>(
        gateway,
        "update",
        Some(draft),
        gateway.update::<R>(parent, id, draft),
        dispatch,
    )
    .await
}

/// Toggle the status of an `R` and refetch
pub async fn submit_status<R: Resource>(
    gateway: &AuthGateway,
    parent: Option<i64>,
    id: i64,
    value: StatusValue,
    dispatch: impl Fn(SliceAction<R::Record>),
) -> bool {
    submit::<R>(
        gateway,
        "status",
        None,
        gateway.set_status::<R>(parent, id, &value),
        dispatch,
    )
    .await
}
