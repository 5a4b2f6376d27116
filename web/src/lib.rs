//! Browser host for the todo list controller.
//!
//! Binds the page's listeners once at startup: submit on `#add-todo-form`,
//! click on each `.filter-btn`, and one delegated click plus one delegated
//! submit on `#todo-list`. Every request the controller hands out goes
//! through `window.fetch`, and the page is repainted from the controller's
//! `View` after each step.
//!
//! Build with `wasm-pack build web --target web --out-dir ../server/static/pkg`;
//! the server's host page imports `/static/pkg/todo_web.js`.

pub mod dom;
mod fetch;
mod logger;

use std::cell::RefCell;
use std::rc::Rc;

use todo_ui::{ControllerConfig, ListEvent, Pending, Target, TodoListController, UiEvent, View};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, HtmlTextAreaElement, Window};

use crate::dom::AddFormSync;

const LIST_ID: &str = "todo-list";

struct Host {
    window: Window,
    document: Document,
    controller: RefCell<TodoListController>,
    add_form: RefCell<AddFormSync>,
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let config = ControllerConfig {
        utc_offset: dom::utc_offset(js_sys::Date::new_0().get_timezone_offset()),
        ..ControllerConfig::default()
    };
    let host = Rc::new(Host {
        window,
        document,
        controller: RefCell::new(TodoListController::new(config)),
        add_form: RefCell::default(),
    });

    bind_add_form(&host)?;
    bind_filters(&host)?;
    bind_list(&host)?;

    let load = host.controller.borrow_mut().load_todos();
    run(host, load);
    Ok(())
}

fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(Event) + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn bind_add_form(host: &Rc<Host>) -> Result<(), JsValue> {
    let form = host.by_id("add-todo-form")?;
    let title: HtmlInputElement = host.by_id("todo-title")?.dyn_into()?;
    let description: HtmlTextAreaElement = host.by_id("todo-description")?.dyn_into()?;
    let host = host.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();
        host.dispatch(UiEvent::AddSubmitted {
            title: title.value(),
            description: description.value(),
        });
    })
}

fn bind_filters(host: &Rc<Host>) -> Result<(), JsValue> {
    for button in host.filter_buttons()? {
        let value = button.get_attribute("data-filter").unwrap_or_default();
        let host = host.clone();
        listen(&button, "click", move |_| {
            host.dispatch(UiEvent::filter_clicked(&value));
        })?;
    }
    Ok(())
}

/// Rows are replaced on every repaint, so they get no listeners of their own.
fn bind_list(host: &Rc<Host>) -> Result<(), JsValue> {
    let list = host.by_id(LIST_ID)?;

    let on_click = host.clone();
    listen(&list, "click", move |event| {
        if let Some(list_event) = resolve_click(&event) {
            on_click.dispatch(UiEvent::List(list_event));
        }
    })?;

    let on_submit = host.clone();
    listen(&list, "submit", move |event| {
        event.prevent_default();
        if let Some(list_event) = resolve_edit_submit(&event) {
            on_submit.dispatch(UiEvent::List(list_event));
        }
    })
}

fn resolve_click(event: &Event) -> Option<ListEvent> {
    let mut element = event.target()?.dyn_into::<Element>().ok()?;
    let mut class_names = Vec::new();
    loop {
        let class_name = element.class_name();
        if dom::is_row(&class_name) {
            let id = element.get_attribute("data-id")?;
            return ListEvent::resolve(&id, dom::class_path(&class_names));
        }
        if element.id() == LIST_ID {
            return None;
        }
        class_names.push(class_name);
        element = element.parent_element()?;
    }
}

fn resolve_edit_submit(event: &Event) -> Option<ListEvent> {
    let form = event.target()?.dyn_into::<Element>().ok()?;
    if !form.class_list().contains("edit-form") {
        return None;
    }
    let id = Uuid::parse_str(&form.get_attribute("data-id")?).ok()?;
    let title = form
        .query_selector("input[name=title]")
        .ok()??
        .dyn_into::<HtmlInputElement>()
        .ok()?
        .value();
    let description = form
        .query_selector("textarea[name=description]")
        .ok()??
        .dyn_into::<HtmlTextAreaElement>()
        .ok()?
        .value();
    Some(ListEvent::new(id, Target::EditSubmit { title, description }))
}

/// Execute `pending` and every reload it leads to, repainting after each.
fn run(host: Rc<Host>, pending: Pending) {
    spawn_local(async move {
        let mut next = Some(pending);
        while let Some(pending) = next {
            let outcome = fetch::execute(&host.window, &pending.request).await;
            // failures are already logged and kept in the view
            next = host
                .controller
                .borrow_mut()
                .complete(pending, outcome)
                .ok()
                .flatten();
            host.paint();
        }
    });
}

impl Host {
    fn dispatch(self: &Rc<Self>, event: UiEvent) {
        let confirm = |message: &str| self.window.confirm_with_message(message).unwrap_or(false);
        let result = self.controller.borrow_mut().dispatch(event, &confirm);
        match result {
            Ok(Some(pending)) => {
                self.paint();
                run(self.clone(), pending);
            }
            Ok(None) | Err(_) => self.paint(),
        }
    }

    fn by_id(&self, id: &str) -> Result<Element, JsValue> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
    }

    fn filter_buttons(&self) -> Result<Vec<Element>, JsValue> {
        let nodes = self.document.query_selector_all(".filter-btn")?;
        let mut buttons = Vec::new();
        for i in 0..nodes.length() {
            if let Some(node) = nodes.item(i) {
                buttons.push(node.dyn_into::<Element>()?);
            }
        }
        Ok(buttons)
    }

    fn paint(&self) {
        let view = self.controller.borrow().view();
        if let Err(e) = self.paint_view(&view) {
            log::error!("repaint failed: {e:?}");
        }
    }

    fn paint_view(&self, view: &View) -> Result<(), JsValue> {
        self.by_id(LIST_ID)?.set_inner_html(&view.list_html);

        let empty: HtmlElement = self.by_id("empty-state")?.dyn_into()?;
        empty
            .style()
            .set_property("display", dom::display(view.empty_state_visible))?;

        for button in self.filter_buttons()? {
            let value = button.get_attribute("data-filter").unwrap_or_default();
            button
                .class_list()
                .toggle_with_force("active", dom::is_active_filter(&value, view.active_filter))?;
        }

        if let Some(form) = self.add_form.borrow_mut().update(&view.add_form) {
            let title: HtmlInputElement = self.by_id("todo-title")?.dyn_into()?;
            title.set_value(&form.title);
            let description: HtmlTextAreaElement = self.by_id("todo-description")?.dyn_into()?;
            description.set_value(&form.description);
        }
        Ok(())
    }
}
