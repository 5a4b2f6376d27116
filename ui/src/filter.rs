//! Client-side status filter.

use todo_core::Todo;

/// Which todos the list shows. Read from a filter button's `data-filter`
/// attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(self, todo: &Todo) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !todo.completed,
            Filter::Completed => todo.completed,
        }
    }

    /// Keeps the server's order.
    pub fn apply(self, todos: &[Todo]) -> Vec<&Todo> {
        todos.iter().filter(|t| self.matches(t)).collect()
    }

    pub fn as_attr(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Unknown values show everything.
    pub fn from_attr(value: &str) -> Filter {
        match value.trim() {
            "active" => Filter::Active,
            "completed" => Filter::Completed,
            _ => Filter::All,
        }
    }
}
