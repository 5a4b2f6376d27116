//! Pure rendering from (items, filter, open drafts) to list markup.
//!
//! # Design
//! The whole `#todo-list` subtree is produced in one string and replaces the
//! previous one. Rows carry no listeners of their own: the host listens on
//! the list container and maps clicks back through
//! [`ListEvent::resolve`](crate::event::ListEvent::resolve), so nothing needs
//! rewiring after a render.

use std::collections::HashMap;
use std::fmt::Write;

use chrono::FixedOffset;
use todo_core::Todo;
use uuid::Uuid;

use crate::filter::Filter;
use crate::locale::Locale;

/// Values currently in a row's inline edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditDraft {
    pub title: String,
    pub description: String,
}

impl EditDraft {
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description_text().to_string(),
        }
    }
}

pub struct RenderOptions<'a> {
    pub locale: Locale,
    pub utc_offset: FixedOffset,
    pub drafts: &'a HashMap<Uuid, EditDraft>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedList {
    /// Inner HTML for `#todo-list`; empty when nothing matches.
    pub html: String,
    /// Whether `#empty-state` should be displayed.
    pub empty_state_visible: bool,
    /// Ids of the rendered rows, in order.
    pub visible_ids: Vec<Uuid>,
}

/// Escape text for use in element content or a quoted attribute value.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn render(items: &[Todo], filter: Filter, options: &RenderOptions<'_>) -> RenderedList {
    let visible = filter.apply(items);
    if visible.is_empty() {
        return RenderedList {
            html: String::new(),
            empty_state_visible: true,
            visible_ids: Vec::new(),
        };
    }

    let mut html = String::new();
    for todo in &visible {
        render_item(&mut html, todo, options.drafts.get(&todo.id), options);
    }
    RenderedList {
        html,
        empty_state_visible: false,
        visible_ids: visible.iter().map(|t| t.id).collect(),
    }
}

fn render_item(out: &mut String, todo: &Todo, draft: Option<&EditDraft>, options: &RenderOptions<'_>) {
    let locale = options.locale;
    let mut classes = String::from("todo-item");
    if todo.completed {
        classes.push_str(" completed");
    }
    if draft.is_some() {
        classes.push_str(" editing");
    }

    // Writing into a String cannot fail.
    let _ = writeln!(out, r#"<div class="{classes}" data-id="{}">"#, todo.id);
    let _ = writeln!(
        out,
        r#"<input type="checkbox" class="todo-checkbox"{}>"#,
        if todo.completed { " checked" } else { "" }
    );
    let _ = write!(out, r#"<div class="todo-content"><h3>{}</h3>"#, escape_html(&todo.title));
    let description = todo.description_text();
    if !description.is_empty() {
        let _ = write!(out, "<p>{}</p>", escape_html(description));
    }
    let _ = writeln!(
        out,
        "<small>{}: {}</small></div>",
        locale.created_label(),
        locale.format_date(todo.created_at, options.utc_offset)
    );
    if let Some(draft) = draft {
        render_edit_form(out, todo.id, draft, locale);
    }
    let _ = writeln!(out, r#"<button class="delete-btn">{}</button>"#, locale.delete_label());
    out.push_str("</div>\n");
}

fn render_edit_form(out: &mut String, id: Uuid, draft: &EditDraft, locale: Locale) {
    let _ = writeln!(out, r#"<form class="edit-form" data-id="{id}">"#);
    let _ = writeln!(
        out,
        r#"<input type="text" name="title" value="{}" required>"#,
        escape_html(&draft.title)
    );
    let _ = writeln!(
        out,
        r#"<textarea name="description" rows="2">{}</textarea>"#,
        escape_html(&draft.description)
    );
    let _ = writeln!(
        out,
        r#"<div class="edit-form-buttons"><button type="submit" class="save-btn">{}</button><button type="button" class="cancel-btn">{}</button></div>"#,
        locale.save_label(),
        locale.cancel_label()
    );
    out.push_str("</form>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn todo(title: &str, description: Option<&str>, completed: bool) -> Todo {
        let at = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).unwrap();
        Todo {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: description.map(str::to_string),
            completed,
            created_at: at,
            updated_at: at,
        }
    }

    fn options(drafts: &HashMap<Uuid, EditDraft>) -> RenderOptions<'_> {
        RenderOptions {
            locale: Locale::JaJp,
            utc_offset: FixedOffset::east_opt(0).unwrap(),
            drafts,
        }
    }

    #[test]
    fn escape_covers_markup_and_quotes() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain テキスト"), "plain テキスト");
    }

    #[test]
    fn row_carries_checkbox_date_and_delete() {
        let drafts = HashMap::new();
        let item = todo("Buy milk", Some("2 litres"), true);
        let out = render(std::slice::from_ref(&item), Filter::All, &options(&drafts));

        assert!(!out.empty_state_visible);
        assert!(out.html.contains(&format!(r#"<div class="todo-item completed" data-id="{}">"#, item.id)));
        assert!(out.html.contains(r#"class="todo-checkbox" checked>"#));
        assert!(out.html.contains("<h3>Buy milk</h3>"));
        assert!(out.html.contains("<p>2 litres</p>"));
        assert!(out.html.contains("<small>作成日: 2024/1/5</small>"));
        assert!(out.html.contains(r#"<button class="delete-btn">削除</button>"#));
        assert!(!out.html.contains("edit-form"));
    }

    #[test]
    fn empty_description_has_no_paragraph() {
        let drafts = HashMap::new();
        let items = vec![todo("a", None, false), todo("b", Some(""), false)];
        let out = render(&items, Filter::All, &options(&drafts));
        assert!(!out.html.contains("<p>"));
        assert!(!out.html.contains(" checked"));
    }

    #[test]
    fn draft_switches_row_to_edit_form() {
        let item = todo("Old", Some("desc"), false);
        let drafts = HashMap::from([(
            item.id,
            EditDraft {
                title: r#"New "quoted""#.to_string(),
                description: "</textarea><b>".to_string(),
            },
        )]);
        let out = render(std::slice::from_ref(&item), Filter::All, &options(&drafts));

        assert!(out.html.contains(r#"class="todo-item editing""#));
        assert!(out.html.contains(r#"value="New &quot;quoted&quot;""#));
        assert!(out.html.contains("&lt;/textarea&gt;&lt;b&gt;</textarea>"));
        assert!(out.html.contains(r#"class="cancel-btn">キャンセル</button>"#));
        let form = out.html.find("edit-form").unwrap();
        let delete = out.html.find("delete-btn").unwrap();
        assert!(form < delete);
    }
}
