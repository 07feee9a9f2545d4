//! Reducer hook over an entity slice

use std::ops::Deref;
use std::rc::Rc;
use ticketcore_core::{EntitySlice, SliceAction};
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct SliceState<T>(EntitySlice<T>);

impl<T> Default for SliceState<T> {
    fn default() -> Self {
        Self(EntitySlice::default())
    }
}

impl<T> Deref for SliceState<T> {
    type Target = EntitySlice<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Clone + 'static> Reducible for SliceState<T> {
    type Action = SliceAction<T>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Self(self.0.reduced(action)))
    }
}

pub type SliceHandle<T> = UseReducerHandle<SliceState<T>>;

/// Fresh, page-local slice for records of type `T`
#[hook]
pub fn use_slice<T>() -> SliceHandle<T>
where
    T: Clone + PartialEq + 'static,
{
    use_reducer(SliceState::default)
}

/// Owned dispatch closure for async operations
pub fn dispatcher<T>(handle: &SliceHandle<T>) -> impl Fn(SliceAction<T>) + 'static
where
    T: Clone + 'static,
{
    let dispatcher = handle.dispatcher();
    move |action| dispatcher.dispatch(action)
}
