//! User interactions as the host page reports them.
//!
//! The host keeps three listeners for the page's lifetime: submit on
//! `#add-todo-form`, click on each `.filter-btn`, and click/change/submit on
//! the `#todo-list` container. Row events are delegated: the host walks from
//! the event target up to the closest `.todo-item`, collecting class names,
//! and hands them to [`ListEvent::resolve`].

use uuid::Uuid;

use crate::filter::Filter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// `#add-todo-form` submitted with the raw input values.
    AddSubmitted { title: String, description: String },
    /// A `.filter-btn` was clicked.
    FilterClicked(Filter),
    /// Something inside a row of `#todo-list`.
    List(ListEvent),
}

impl UiEvent {
    /// Build a filter click from the button's `data-filter` attribute.
    pub fn filter_clicked(data_filter: &str) -> Self {
        UiEvent::FilterClicked(Filter::from_attr(data_filter))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEvent {
    pub item_id: Uuid,
    pub target: Target,
}

/// Part of a row an event landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Checkbox,
    DeleteButton,
    /// The title/description/date area; opens the edit form.
    Content,
    EditSubmit { title: String, description: String },
    EditCancel,
}

impl ListEvent {
    pub fn new(item_id: Uuid, target: Target) -> Self {
        Self { item_id, target }
    }

    /// Resolve a delegated click/change.
    ///
    /// `data_id` is the closest `.todo-item`'s `data-id`; `class_path` holds
    /// the class names met walking from the target up to (not including) the
    /// row. Returns `None` for ids that are not UUIDs and for clicks that land
    /// on nothing interactive, including clicks inside an open edit form other
    /// than its cancel button. Form submits carry values, so hosts build
    /// [`Target::EditSubmit`] directly.
    pub fn resolve<'a>(data_id: &str, class_path: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let item_id = Uuid::parse_str(data_id.trim()).ok()?;
        for class in class_path {
            let target = match class {
                "todo-checkbox" => Target::Checkbox,
                "delete-btn" => Target::DeleteButton,
                "cancel-btn" => Target::EditCancel,
                "edit-form" => return None,
                "todo-content" => Target::Content,
                _ => continue,
            };
            return Some(Self::new(item_id, target));
        }
        None
    }
}

/// Interactive yes/no prompt, asked before destructive actions.
pub trait Confirm {
    fn confirm(&self, message: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
