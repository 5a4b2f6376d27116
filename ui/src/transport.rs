//! Executing controller requests.
//!
//! # Design
//! The controller only describes requests. A `Transport` turns one
//! `HttpRequest` into one `HttpResponse`, reporting any status as data so
//! the core client interprets success. `Session` glues a controller, a
//! transport and a confirmation prompt into the fetch → render → event →
//! mutate → fetch cycle for hosts that want it run for them.

#[cfg(feature = "ureq")]
use todo_core::HttpMethod;
use todo_core::{ApiError, HttpRequest, HttpResponse};

use crate::controller::{ControllerConfig, Pending, TodoListController, View};
use crate::error::UiError;
use crate::event::{Confirm, UiEvent};

pub trait Transport {
    /// Returns `Err` only when no response arrived; non-2xx statuses are
    /// returned as `Ok`.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking transport over ureq.
#[cfg(feature = "ureq")]
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

#[cfg(feature = "ureq")]
impl UreqTransport {
    pub fn new() -> Self {
        // Statuses are data here; the core client maps them to errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

#[cfg(feature = "ureq")]
impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "ureq")]
impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let path = request.path.as_str();
        let body = request.body.as_deref();
        let result = match (request.method, body) {
            (HttpMethod::Get, _) => self.agent.get(path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(path).send_empty(),
            (HttpMethod::Patch, Some(body)) => self
                .agent
                .patch(path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Patch, None) => self.agent.patch(path).send_empty(),
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(HttpResponse::new(status, body))
    }
}

/// A controller wired to a transport and a confirmation prompt.
pub struct Session<T, C> {
    controller: TodoListController,
    transport: T,
    confirm: C,
}

impl<T: Transport, C: Confirm> Session<T, C> {
    pub fn new(config: ControllerConfig, transport: T, confirm: C) -> Self {
        Self {
            controller: TodoListController::new(config),
            transport,
            confirm,
        }
    }

    pub fn controller(&self) -> &TodoListController {
        &self.controller
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn view(&self) -> View {
        self.controller.view()
    }

    /// Initial fetch and render.
    pub fn start(&mut self) -> Result<(), UiError> {
        let load = self.controller.load_todos();
        self.drive(load)
    }

    /// Handle one event, including the reload a successful mutation triggers.
    pub fn handle(&mut self, event: UiEvent) -> Result<(), UiError> {
        match self.controller.dispatch(event, &self.confirm)? {
            Some(pending) => self.drive(pending),
            None => Ok(()),
        }
    }

    fn drive(&mut self, pending: Pending) -> Result<(), UiError> {
        let mut next = Some(pending);
        while let Some(pending) = next {
            let outcome = self.transport.execute(&pending.request);
            next = self.controller.complete(pending, outcome)?;
        }
        Ok(())
    }
}
