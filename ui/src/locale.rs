//! Labels and date formatting for rendered rows.

use chrono::{DateTime, Datelike, FixedOffset, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    JaJp,
    EnUs,
}

impl Locale {
    pub fn created_label(self) -> &'static str {
        match self {
            Locale::JaJp => "作成日",
            Locale::EnUs => "Created",
        }
    }

    pub fn delete_label(self) -> &'static str {
        match self {
            Locale::JaJp => "削除",
            Locale::EnUs => "Delete",
        }
    }

    pub fn save_label(self) -> &'static str {
        match self {
            Locale::JaJp => "保存",
            Locale::EnUs => "Save",
        }
    }

    pub fn cancel_label(self) -> &'static str {
        match self {
            Locale::JaJp => "キャンセル",
            Locale::EnUs => "Cancel",
        }
    }

    /// Prompt shown before a delete is sent.
    pub fn confirm_delete(self) -> &'static str {
        match self {
            Locale::JaJp => "このTODOを削除しますか？",
            Locale::EnUs => "Delete this todo?",
        }
    }

    /// Calendar date of `at` as seen from `offset`, without zero padding:
    /// `2024/1/5` for Japanese, `1/5/2024` for English.
    pub fn format_date(self, at: DateTime<Utc>, offset: FixedOffset) -> String {
        let date = at.with_timezone(&offset).date_naive();
        match self {
            Locale::JaJp => format!("{}/{}/{}", date.year(), date.month(), date.day()),
            Locale::EnUs => format!("{}/{}/{}", date.month(), date.day(), date.year()),
        }
    }
}
