//! The todo list controller.
//!
//! # Design
//! `TodoListController` never performs I/O. Every operation that needs the
//! backend returns a [`Pending`] (the `HttpRequest` plus what it is for); the
//! host executes it and feeds the outcome back through
//! [`TodoListController::complete`], which may hand back the follow-up reload.
//! The visible list is recomputed from state by [`TodoListController::view`],
//! so it is always a function of the last applied fetch, the filter, and the
//! open edit drafts.
//!
//! Each load is stamped with a generation number. A load is applied only if
//! it is newer than the last one applied, so a slow, superseded fetch cannot
//! overwrite a later result.

use std::collections::HashMap;

use chrono::{FixedOffset, Offset, Utc};
use log::{debug, error};
use todo_core::{ApiError, CreateTodo, HttpRequest, HttpResponse, Todo, TodoClient, UpdateTodo};
use uuid::Uuid;

use crate::error::{Operation, UiError};
use crate::event::{Confirm, ListEvent, Target, UiEvent};
use crate::filter::Filter;
use crate::locale::Locale;
use crate::markup::{self, EditDraft, RenderOptions};

/// What a filter click does besides re-rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Re-filter the last fetched collection; no request.
    #[default]
    RenderOnly,
    /// Fetch the collection again before rendering.
    Refetch,
}

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Prefix of the REST API, e.g. `/api` or `http://127.0.0.1:8000/api`.
    pub base_url: String,
    pub filter_mode: FilterMode,
    pub locale: Locale,
    /// Offset used to pick the calendar day shown as the creation date.
    pub utc_offset: FixedOffset,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: "/api".to_string(),
            filter_mode: FilterMode::default(),
            locale: Locale::default(),
            utc_offset: Utc.fix(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    Load { generation: u64 },
    Create,
    Toggle(Uuid),
    Update(Uuid),
    Delete(Uuid),
}

impl PendingKind {
    fn operation(self) -> Operation {
        match self {
            PendingKind::Load { .. } => Operation::Load,
            PendingKind::Create => Operation::Create,
            PendingKind::Toggle(id) => Operation::Toggle(id),
            PendingKind::Update(id) => Operation::Update(id),
            PendingKind::Delete(id) => Operation::Delete(id),
        }
    }
}

/// A request the host must execute and report back via `complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub kind: PendingKind,
    pub request: HttpRequest,
}

/// Contents of `#todo-title` / `#todo-description`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    pub title: String,
    pub description: String,
}

/// Everything the host writes into the page after a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub list_html: String,
    pub empty_state_visible: bool,
    pub visible_ids: Vec<Uuid>,
    /// The one `.filter-btn` that carries the `active` class.
    pub active_filter: Filter,
    pub add_form: AddForm,
    /// Most recent failure, for hosts that choose to show it.
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct TodoListController {
    client: TodoClient,
    config: ControllerConfig,
    filter: Filter,
    todos: Vec<Todo>,
    drafts: HashMap<Uuid, EditDraft>,
    add_form: AddForm,
    issued_generation: u64,
    applied_generation: u64,
    last_error: Option<UiError>,
}

impl TodoListController {
    pub fn new(config: ControllerConfig) -> Self {
        Self {
            client: TodoClient::new(&config.base_url),
            config,
            filter: Filter::All,
            todos: Vec::new(),
            drafts: HashMap::new(),
            add_form: AddForm::default(),
            issued_generation: 0,
            applied_generation: 0,
            last_error: None,
        }
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// The last applied fetch, unfiltered.
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn add_form(&self) -> &AddForm {
        &self.add_form
    }

    pub fn is_editing(&self, id: Uuid) -> bool {
        self.drafts.contains_key(&id)
    }

    pub fn draft(&self, id: Uuid) -> Option<&EditDraft> {
        self.drafts.get(&id)
    }

    pub fn last_error(&self) -> Option<&UiError> {
        self.last_error.as_ref()
    }

    pub fn view(&self) -> View {
        let rendered = markup::render(
            &self.todos,
            self.filter,
            &RenderOptions {
                locale: self.config.locale,
                utc_offset: self.config.utc_offset,
                drafts: &self.drafts,
            },
        );
        View {
            list_html: rendered.html,
            empty_state_visible: rendered.empty_state_visible,
            visible_ids: rendered.visible_ids,
            active_filter: self.filter,
            add_form: self.add_form.clone(),
            error: self.last_error.as_ref().map(ToString::to_string),
        }
    }

    /// Request the full collection. Supersedes any load still in flight.
    pub fn load_todos(&mut self) -> Pending {
        self.issued_generation += 1;
        self.pending(
            PendingKind::Load {
                generation: self.issued_generation,
            },
            self.client.build_list_todos(),
        )
    }

    /// Submit the add form. Both fields are trimmed; an empty title is still
    /// sent and left for the server to judge.
    pub fn create(&mut self, title: &str, description: &str) -> Result<Pending, UiError> {
        self.add_form = AddForm {
            title: title.to_string(),
            description: description.to_string(),
        };
        let input = CreateTodo {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            completed: false,
        };
        let request = self
            .client
            .build_create_todo(&input)
            .map_err(|e| self.fail(Operation::Create, e))?;
        Ok(self.pending(PendingKind::Create, request))
    }

    /// The server decides the new `completed` value; nothing flips locally.
    pub fn toggle(&mut self, id: Uuid) -> Pending {
        self.pending(PendingKind::Toggle(id), self.client.build_toggle_todo(id))
    }

    /// Ask first; a declined prompt produces no request.
    pub fn delete(&mut self, id: Uuid, confirm: &dyn Confirm) -> Option<Pending> {
        if !confirm.confirm(self.config.locale.confirm_delete()) {
            debug!("delete of {id} declined");
            return None;
        }
        Some(self.pending(PendingKind::Delete(id), self.client.build_delete_todo(id)))
    }

    /// Open the inline edit form for `id`, pre-filled from the last fetch.
    /// Returns false for unknown ids. A row that is already open keeps its
    /// draft.
    pub fn edit(&mut self, id: Uuid) -> bool {
        if self.drafts.contains_key(&id) {
            return true;
        }
        match self.todos.iter().find(|t| t.id == id) {
            Some(todo) => {
                self.drafts.insert(id, EditDraft::from_todo(todo));
                true
            }
            None => false,
        }
    }

    /// Close the edit form without sending anything.
    pub fn cancel_edit(&mut self, id: Uuid) {
        self.drafts.remove(&id);
    }

    /// Submit an edit. An open form keeps the submitted values and stays open
    /// until the update succeeds; a row that was never opened is not put into
    /// edit mode. `completed` is never sent.
    pub fn update(&mut self, id: Uuid, title: &str, description: &str) -> Result<Pending, UiError> {
        if let Some(draft) = self.drafts.get_mut(&id) {
            *draft = EditDraft {
                title: title.to_string(),
                description: description.to_string(),
            };
        }
        let input = UpdateTodo {
            title: Some(title.trim().to_string()),
            description: Some(description.trim().to_string()),
            completed: None,
        };
        let request = self
            .client
            .build_update_todo(id, &input)
            .map_err(|e| self.fail(Operation::Update(id), e))?;
        Ok(self.pending(PendingKind::Update(id), request))
    }

    /// Switch the filter. Returns a load only in [`FilterMode::Refetch`].
    pub fn set_filter(&mut self, filter: Filter) -> Option<Pending> {
        self.filter = filter;
        match self.config.filter_mode {
            FilterMode::RenderOnly => None,
            FilterMode::Refetch => Some(self.load_todos()),
        }
    }

    /// Route a host event to the matching operation.
    pub fn dispatch(&mut self, event: UiEvent, confirm: &dyn Confirm) -> Result<Option<Pending>, UiError> {
        match event {
            UiEvent::AddSubmitted { title, description } => self.create(&title, &description).map(Some),
            UiEvent::FilterClicked(filter) => Ok(self.set_filter(filter)),
            UiEvent::List(ListEvent { item_id, target }) => match target {
                Target::Checkbox => Ok(Some(self.toggle(item_id))),
                Target::DeleteButton => Ok(self.delete(item_id, confirm)),
                Target::Content => {
                    self.edit(item_id);
                    Ok(None)
                }
                Target::EditSubmit { title, description } => {
                    self.update(item_id, &title, &description).map(Some)
                }
                Target::EditCancel => {
                    self.cancel_edit(item_id);
                    Ok(None)
                }
            },
        }
    }

    /// Report the outcome of a [`Pending`] request.
    ///
    /// A successful mutation returns the reload to run next. Failures are
    /// logged, recorded as [`last_error`](Self::last_error) and returned;
    /// they never touch the rendered state.
    pub fn complete(
        &mut self,
        pending: Pending,
        outcome: Result<HttpResponse, ApiError>,
    ) -> Result<Option<Pending>, UiError> {
        let kind = pending.kind;
        if let PendingKind::Load { generation } = kind {
            if generation <= self.applied_generation {
                debug!(
                    "discarding load {generation}, load {} already applied",
                    self.applied_generation
                );
                return Ok(None);
            }
            let todos = outcome
                .and_then(|response| self.client.parse_list_todos(response))
                .map_err(|e| self.fail(Operation::Load, e))?;
            self.applied_generation = generation;
            self.apply(todos);
            return Ok(None);
        }

        outcome
            .and_then(|response| self.client.parse_ack(response))
            .map_err(|e| self.fail(kind.operation(), e))?;
        match kind {
            PendingKind::Create => self.add_form = AddForm::default(),
            PendingKind::Update(id) => self.cancel_edit(id),
            _ => {}
        }
        self.last_error = None;
        Ok(Some(self.load_todos()))
    }

    fn apply(&mut self, todos: Vec<Todo>) {
        self.drafts.retain(|id, _| todos.iter().any(|t| t.id == *id));
        self.todos = todos;
        self.last_error = None;
    }

    fn pending(&self, kind: PendingKind, request: HttpRequest) -> Pending {
        debug!("{:?}: {} {}", kind, request.method, request.path);
        Pending { kind, request }
    }

    fn fail(&mut self, operation: Operation, source: ApiError) -> UiError {
        let err = UiError::new(operation, source);
        error!("{err}");
        self.last_error = Some(err.clone());
        err
    }
}
