//! Page-independent pieces of the browser host: class matching, style
//! values and add-form bookkeeping.

use chrono::{FixedOffset, Offset, Utc};
use todo_ui::{AddForm, Filter};

/// Class carried by every rendered row.
pub const ROW_CLASS: &str = "todo-item";

/// Whether an element's `className` marks it as a list row.
pub fn is_row(class_name: &str) -> bool {
    class_name.split_ascii_whitespace().any(|c| c == ROW_CLASS)
}

/// Flatten the `className`s met between an event target and its row into
/// the token list `ListEvent::resolve` expects, nearest element first.
pub fn class_path(class_names: &[String]) -> Vec<&str> {
    class_names
        .iter()
        .flat_map(|name| name.split_ascii_whitespace())
        .collect()
}

pub fn display(visible: bool) -> &'static str {
    if visible {
        "block"
    } else {
        "none"
    }
}

/// Whether the `.filter-btn` with this `data-filter` should carry `active`.
pub fn is_active_filter(data_filter: &str, active: Filter) -> bool {
    data_filter == active.as_attr()
}

/// Offset for creation dates from `Date.prototype.getTimezoneOffset`,
/// which counts minutes west of UTC.
pub fn utc_offset(timezone_offset_minutes: f64) -> FixedOffset {
    FixedOffset::west_opt((timezone_offset_minutes * 60.0) as i32).unwrap_or_else(|| Utc.fix())
}

/// Remembers what was last written into `#todo-title`/`#todo-description`
/// so repaints leave the user's typing alone.
#[derive(Debug, Default)]
pub struct AddFormSync {
    painted: AddForm,
}

impl AddFormSync {
    /// Values to write, or `None` when the controller's form has not changed
    /// since the last write.
    pub fn update(&mut self, next: &AddForm) -> Option<AddForm> {
        if self.painted == *next {
            return None;
        }
        self.painted = next.clone();
        Some(next.clone())
    }
}
