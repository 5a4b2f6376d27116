//! Failures surfaced by the list controller.

use std::fmt;

use todo_core::ApiError;
use uuid::Uuid;

/// The controller operation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Toggle(Uuid),
    Update(Uuid),
    Delete(Uuid),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Load => write!(f, "load todos"),
            Operation::Create => write!(f, "create todo"),
            Operation::Toggle(id) => write!(f, "toggle todo {id}"),
            Operation::Update(id) => write!(f, "update todo {id}"),
            Operation::Delete(id) => write!(f, "delete todo {id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    pub operation: Operation,
    pub source: ApiError,
}

impl UiError {
    pub fn new(operation: Operation, source: ApiError) -> Self {
        Self { operation, source }
    }
}

impl fmt::Display for UiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to {}: {}", self.operation, self.source)
    }
}

impl std::error::Error for UiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
