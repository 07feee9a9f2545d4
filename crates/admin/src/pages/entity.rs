//! Generic list page with create and edit dialogs
//!
//! The page owns one entity slice. Validation failures, local or from the
//! backend, land on the dialog's inputs; anything else opens the error
//! popup. Focusing an input clears that input's error, and cancelling the
//! dialog clears them all.

use crate::components::{
    ErrorPopup, LoadingSpinner, SelectField, StatusSelect, StatusToggle, TextField,
};
use crate::context::{ApiHandle, sync_session, use_api, use_session};
use crate::forms::{FieldKind, FieldSpec, FormDraft};
use crate::listing::{AdminResource, Countries, Events, ParentKind, Regions, Shows};
use crate::slice::{dispatcher, use_slice};
use ticketcore_client::{
    AuthGateway, ClientError, StatusValue, fetch_all, submit_create, submit_status, submit_update,
};
use ticketcore_core::validation::validators;
use ticketcore_core::{Entity, Listing, SliceAction, Validate};
use tracing::warn;
use yew::prelude::*;

/// Open dialog: `id` is set when editing an existing record
#[derive(Clone, Debug, PartialEq)]
struct Editor<D> {
    id: Option<i64>,
    parent: Option<i64>,
    draft: D,
}

impl<D> Editor<D> {
    const fn is_edit(&self) -> bool {
        self.id.is_some()
    }
}

const FLAG_OPTIONS: [(&str, &str); 2] = [("true", "Active"), ("false", "Inactive")];

#[function_component(EntityPage)]
pub fn entity_page<R>() -> Html
where
    R: AdminResource,
{
    let api = use_api();
    let session = use_session();
    let slice = use_slice::<R::Record>();
    let editor = use_state(|| Option::<Editor<R::Draft>>::None);

    {
        let api = api.clone();
        let session = session.clone();
        let dispatch = dispatcher(&slice);
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                if !fetch_all::<R>(&api, dispatch).await {
                    sync_session(&api, &session);
                }
            });
        });
    }

    let on_create = {
        let editor = editor.clone();
        let slice = slice.clone();
        Callback::from(move |_: MouseEvent| {
            slice.dispatch(SliceAction::ClearFieldErrors);
            editor.set(Some(Editor {
                id: None,
                parent: None,
                draft: R::Draft::default(),
            }));
        })
    };

    let on_edit = {
        let editor = editor.clone();
        let slice = slice.clone();
        Callback::from(move |record: R::Record| {
            slice.dispatch(SliceAction::ClearFieldErrors);
            editor.set(Some(Editor {
                id: Some(record.id()),
                parent: R::parent_of(&record),
                draft: R::draft_of(&record),
            }));
        })
    };

    let on_cancel = {
        let editor = editor.clone();
        let slice = slice.clone();
        Callback::from(move |_: MouseEvent| {
            slice.dispatch(SliceAction::ClearFieldErrors);
            editor.set(None);
        })
    };

    let on_field = {
        let editor = editor.clone();
        Callback::from(move |(key, value): (&'static str, String)| {
            if let Some(current) = &*editor {
                let mut next = current.clone();
                next.draft.set_value(key, &value);
                editor.set(Some(next));
            }
        })
    };

    let on_parent = {
        let editor = editor.clone();
        Callback::from(move |parent: Option<i64>| {
            if let Some(current) = &*editor {
                editor.set(Some(Editor {
                    parent,
                    ..current.clone()
                }));
            }
        })
    };

    let on_focus = {
        let slice = slice.clone();
        Callback::from(move |name: AttrValue| {
            if slice.field_error(&name).is_some() {
                slice.dispatch(SliceAction::ClearFieldError(name.to_string()));
            }
        })
    };

    let onsubmit = {
        let api = api.clone();
        let session = session.clone();
        let editor = editor.clone();
        let slice = slice.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(current) = (*editor).clone() else {
                return;
            };

            if let Some(kind) = R::PARENT_KIND
                && current.parent.is_none()
            {
                let mut errors = current.draft.validate();
                validators::required_id(&mut errors, kind.field(), None);
                slice.dispatch(SliceAction::FieldErrors(errors));
                return;
            }

            let api = api.clone();
            let session = session.clone();
            let editor = editor.clone();
            let dispatch = dispatcher(&slice);
            wasm_bindgen_futures::spawn_local(async move {
                let saved = match current.id {
                    Some(id) => {
                        submit_update::<R>(&api, current.parent, id, &current.draft, dispatch)
                            .await
                    }
                    None => submit_create::<R>(&api, current.parent, &current.draft, dispatch).await,
                };
                if saved {
                    editor.set(None);
                } else {
                    // an expired session was cleared by the gateway
                    sync_session(&api, &session);
                }
            });
        })
    };

    let on_status = {
        let api = api.clone();
        let slice = slice.clone();
        Callback::from(move |(id, parent, value): (i64, Option<i64>, StatusValue)| {
            let api = api.clone();
            let session = session.clone();
            let dispatch = dispatcher(&slice);
            wasm_bindgen_futures::spawn_local(async move {
                if !submit_status::<R>(&api, parent, id, value, dispatch).await {
                    sync_session(&api, &session);
                }
            });
        })
    };

    let on_dismiss = {
        let slice = slice.clone();
        Callback::from(move |()| slice.dispatch(SliceAction::DismissMessage))
    };

    let rows = slice
        .items
        .iter()
        .map(|record| {
            let cells = R::cells(record);
            let edit = {
                let on_edit = on_edit.clone();
                let record = record.clone();
                Callback::from(move |_: MouseEvent| on_edit.emit(record.clone()))
            };
            html! {
                <tr class="border-t border-gray-100" key={record.id().to_string()}>
                    {cells.into_iter().map(|cell| html! {
                        <td class="px-4 py-2 text-sm text-gray-700">{cell}</td>
                    }).collect::<Html>()}
                    <td class="px-4 py-2">
                        {status_control::<R>(record, &on_status, slice.loading)}
                    </td>
                    <td class="px-4 py-2 text-right">
                        <button class="text-sm text-indigo-600 hover:underline" onclick={edit}>
                            {"Edit"}
                        </button>
                    </td>
                </tr>
            }
        })
        .collect::<Html>();

    let dialog = (*editor).as_ref().map(|current| {
        let fields = R::Draft::FIELDS
            .iter()
            .filter(|spec| !(spec.create_only && current.is_edit()))
            .map(|spec| field_input(spec, &current.draft, slice.field_error(spec.key), &on_field, &on_focus))
            .collect::<Html>();
        let parent = R::PARENT_KIND.map(|kind| {
            html! {
                <ParentSelect
                    {kind}
                    value={current.parent}
                    on_change={on_parent.clone()}
                    error={slice.field_error(kind.field()).map(|e| AttrValue::from(e.to_string()))}
                    on_focus={on_focus.clone()}
                />
            }
        });
        let title = if current.is_edit() {
            format!("Edit {}", R::NAME)
        } else {
            format!("Add New {}", R::NAME)
        };

        html! {
            <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-40">
                <div class="bg-white rounded-lg shadow-xl w-full max-w-lg max-h-[90vh] overflow-y-auto p-6">
                    <h3 class="text-lg font-semibold text-gray-900 mb-4">{title}</h3>
                    <form onsubmit={onsubmit.clone()} novalidate={true}>
                        {parent}
                        {fields}
                        <div class="flex justify-end gap-2 mt-4">
                            <button
                                type="button"
                                class="px-4 py-2 text-sm border border-gray-300 rounded-md hover:bg-gray-50"
                                onclick={on_cancel.clone()}
                            >
                                {"Cancel"}
                            </button>
                            <button
                                type="submit"
                                class="px-4 py-2 text-sm bg-indigo-600 text-white rounded-md hover:bg-indigo-700 disabled:opacity-50"
                                disabled={slice.loading}
                            >
                                { if current.is_edit() { "Save" } else { "Create" } }
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        }
    });

    html! {
        <div>
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-2xl font-semibold text-gray-900">{R::TITLE}</h2>
                <button
                    class="px-4 py-2 text-sm bg-indigo-600 text-white rounded-md hover:bg-indigo-700"
                    onclick={on_create}
                >
                    {format!("Add {}", R::NAME)}
                </button>
            </div>
            if slice.loading && slice.items.is_empty() {
                <LoadingSpinner text={format!("Loading {}...", R::TITLE.to_lowercase())} />
            } else {
                <div class="bg-white rounded-lg shadow overflow-x-auto">
                    <table class="min-w-full">
                        <thead class="bg-gray-50">
                            <tr>
                                {R::COLUMNS.iter().map(|column| html! {
                                    <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase">{*column}</th>
                                }).collect::<Html>()}
                                <th class="px-4 py-2 text-left text-xs font-medium text-gray-500 uppercase">{"Status"}</th>
                                <th class="px-4 py-2"></th>
                            </tr>
                        </thead>
                        <tbody>
                            if slice.items.is_empty() {
                                <tr>
                                    <td class="px-4 py-6 text-center text-sm text-gray-500" colspan={(R::COLUMNS.len() + 2).to_string()}>
                                        {format!("No {} yet", R::TITLE.to_lowercase())}
                                    </td>
                                </tr>
                            } else {
                                {rows}
                            }
                        </tbody>
                    </table>
                </div>
            }
            {dialog}
            <ErrorPopup
                message={slice.message.clone().map(AttrValue::from)}
                on_close={on_dismiss}
            />
        </div>
    }
}

/// Toggle for activation flags, select for named lifecycle states
fn status_control<R: AdminResource>(
    record: &R::Record,
    on_status: &Callback<(i64, Option<i64>, StatusValue)>,
    busy: bool,
) -> Html {
    let id = record.id();
    let parent = R::parent_of(record);

    if let Some(active) = record.active() {
        let on_status = on_status.clone();
        let on_toggle =
            Callback::from(move |next: bool| on_status.emit((id, parent, StatusValue::Flag(next))));
        return html! { <StatusToggle checked={active} {on_toggle} disabled={busy} /> };
    }

    match record.status() {
        Some(status) if !R::STATUS_OPTIONS.is_empty() => {
            let on_status = on_status.clone();
            let on_change = Callback::from(move |next: String| {
                on_status.emit((id, parent, StatusValue::Named(next)));
            });
            html! {
                <StatusSelect
                    value={status.to_string()}
                    options={R::STATUS_OPTIONS}
                    {on_change}
                    disabled={busy}
                />
            }
        }
        Some(status) => html! { <span class="text-sm text-gray-600">{status.to_string()}</span> },
        None => Html::default(),
    }
}

fn field_input<D: FormDraft>(
    spec: &FieldSpec,
    draft: &D,
    error: Option<&str>,
    on_field: &Callback<(&'static str, String)>,
    on_focus: &Callback<AttrValue>,
) -> Html {
    let key = spec.key;
    let on_change = on_field.reform(move |value: String| (key, value));
    let error = error.map(|e| AttrValue::from(e.to_string()));
    let value = draft.value(key);

    if spec.kind == FieldKind::Flag {
        let options = FLAG_OPTIONS
            .iter()
            .map(|(value, label)| (AttrValue::from(*value), AttrValue::from(*label)))
            .collect::<Vec<_>>();
        return html! {
            <SelectField
                label={spec.label}
                name={key}
                {value}
                {options}
                {on_change}
                {error}
                on_focus={on_focus.clone()}
            />
        };
    }

    let placeholder = (spec.kind == FieldKind::List).then_some(AttrValue::Static("comma separated"));
    html! {
        <TextField
            label={spec.label}
            name={key}
            input_type={spec.kind.input_type()}
            {value}
            {on_change}
            {error}
            on_focus={on_focus.clone()}
            {placeholder}
        />
    }
}

#[derive(Properties, PartialEq)]
struct ParentSelectProps {
    kind: ParentKind,
    value: Option<i64>,
    on_change: Callback<Option<i64>>,
    #[prop_or_default]
    error: Option<AttrValue>,
    on_focus: Callback<AttrValue>,
}

fn options<T: Entity>(listing: Listing<T>) -> Vec<(AttrValue, AttrValue)> {
    let (items, _) = listing.into_parts();
    items
        .iter()
        .map(|item| {
            (
                AttrValue::from(item.id().to_string()),
                AttrValue::from(format!("{} (#{})", item.label(), item.id())),
            )
        })
        .collect()
}

async fn parent_options(
    api: &AuthGateway,
    kind: ParentKind,
    event: Option<i64>,
) -> Result<Vec<(AttrValue, AttrValue)>, ClientError> {
    Ok(match (kind, event) {
        (ParentKind::Country, _) => options(api.list::<Countries>().await?),
        (ParentKind::Region, _) => options(api.list::<Regions>().await?),
        (ParentKind::Show, Some(event_id)) => options(api.list_shows_by_event(event_id).await?),
        (ParentKind::Show, None) => options(api.list::<Shows>().await?),
    })
}

/// Picker for the collection a nested record is written under
#[function_component(ParentSelect)]
fn parent_select(props: &ParentSelectProps) -> Html {
    let api: ApiHandle = use_api();
    let choices = use_state(Vec::<(AttrValue, AttrValue)>::new);
    // shows are picked within an event
    let narrowed = props.kind == ParentKind::Show;
    let event = use_state(|| Option::<i64>::None);
    let events = use_state(Vec::<(AttrValue, AttrValue)>::new);

    {
        let api = api.clone();
        let events = events.clone();
        use_effect_with(narrowed, move |narrowed| {
            if *narrowed {
                wasm_bindgen_futures::spawn_local(async move {
                    match api.list::<Events>().await {
                        Ok(loaded) => events.set(options(loaded)),
                        Err(error) => warn!(%error, "failed to load events"),
                    }
                });
            }
        });
    }

    {
        let choices = choices.clone();
        use_effect_with((props.kind, *event), move |(kind, event)| {
            let (kind, event) = (*kind, *event);
            wasm_bindgen_futures::spawn_local(async move {
                match parent_options(&api, kind, event).await {
                    Ok(loaded) => choices.set(loaded),
                    Err(error) => warn!(parent = kind.label(), %error, "failed to load parent options"),
                }
            });
        });
    }

    let event_picker = narrowed.then(|| {
        let on_event = {
            let event = event.clone();
            let on_change = props.on_change.clone();
            Callback::from(move |value: String| {
                event.set(value.parse::<i64>().ok());
                on_change.emit(None);
            })
        };
        html! {
            <SelectField
                label="Event"
                name="eventId"
                value={(*event).map(|id| id.to_string()).unwrap_or_default()}
                options={(*events).clone()}
                on_change={on_event}
                placeholder="All events"
            />
        }
    });

    let on_change = props
        .on_change
        .reform(|value: String| value.parse::<i64>().ok());

    html! {
        <>
        {event_picker}
        <SelectField
            label={props.kind.label()}
            name={props.kind.field()}
            value={props.value.map(|id| id.to_string()).unwrap_or_default()}
            options={(*choices).clone()}
            {on_change}
            error={props.error.clone()}
            on_focus={props.on_focus.clone()}
            placeholder={format!("Select {}", props.kind.label().to_lowercase())}
        />
        </>
    }
}
