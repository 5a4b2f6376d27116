//! List controller for the todo page.
//!
//! # Overview
//! Fetches the todo collection, filters it (all / active / completed),
//! renders it to markup for `#todo-list`, and turns user events into single
//! REST calls followed by a full reload. Built on the host-does-IO client in
//! `todo-core`: the controller hands out requests as data and the host (a
//! browser shell, a test, or the blocking [`Session`]) executes them.
//!
//! # Design
//! - Filter, drafts and the fetched list live in the controller instance;
//!   two controllers never share state.
//! - Rows get no listeners of their own. The host delegates from the list
//!   container and resolves targets with [`ListEvent::resolve`].
//! - Loads are generation-stamped; stale responses are dropped.
//! - Failures are logged with `log` and returned as [`UiError`]; the view
//!   keeps its previous content.

pub mod controller;
pub mod error;
pub mod event;
pub mod filter;
pub mod locale;
pub mod markup;
pub mod transport;

pub use controller::{AddForm, ControllerConfig, FilterMode, Pending, PendingKind, TodoListController, View};
pub use error::{Operation, UiError};
pub use event::{Confirm, ListEvent, Target, UiEvent};
pub use filter::Filter;
pub use locale::Locale;
pub use markup::{escape_html, render, EditDraft, RenderOptions, RenderedList};
pub use transport::{Session, Transport};
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
