//! UI strings for the two supported locales.

use crate::services::{LogError, TagError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Ja,
    En,
}

/// Fixed UI strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    AppTitle,
    NavHome,
    NavSearch,
    NavTags,
    NavLogout,
    LoginTitle,
    Username,
    Password,
    LoginButton,
    LoginRequired,
    LoginFailed,
    LoggedOutTitle,
    LoggedOutBody,
    LoginAgain,
    NewLog,
    Title,
    Body,
    Date,
    Tags,
    Save,
    Reminders,
    NoLogs,
    RecentLogs,
    ShowAll,
    EditTitle,
    Update,
    Cancel,
    Edit,
    Delete,
    SearchTitle,
    Keyword,
    AnyTag,
    SearchButton,
    Previous,
    Next,
    TagsTitle,
    TagName,
    TagType,
    AddTag,
    MoveUp,
    MoveDown,
    NoTags,
    TextRequired,
    TitleRequired,
    TitleTooLong,
    InvalidDate,
    TagNameRequired,
    TagTypeRequired,
    TagTooLong,
    TagDuplicate,
}

impl Locale {
    /// Unknown codes fall back to Japanese.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Self::En,
            _ => Self::Ja,
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub const fn text(self, key: Text) -> &'static str {
        match self {
            Self::Ja => match key {
                Text::AppTitle => "学習ログ",
                Text::NavHome => "ホーム",
                Text::NavSearch => "検索",
                Text::NavTags => "タグ管理",
                Text::NavLogout => "ログアウト",
                Text::LoginTitle | Text::LoginButton => "ログイン",
                Text::Username => "ユーザー名",
                Text::Password => "パスワード",
                Text::LoginRequired => "ユーザー名とパスワードを入力してください",
                Text::LoginFailed => "ユーザー名かパスワードが間違っています",
                Text::LoggedOutTitle => "ログアウトしました",
                Text::LoggedOutBody => "ご利用ありがとうございました。",
                Text::LoginAgain => "もう一度ログイン",
                Text::NewLog => "今日の学習を記録",
                Text::Title => "タイトル",
                Text::Body => "内容",
                Text::Date => "日付",
                Text::Tags => "タグ",
                Text::Save => "保存",
                Text::Reminders => "忘却曲線リマインダー",
                Text::NoLogs => "記録はありません",
                Text::RecentLogs => "最近の記録",
                Text::ShowAll => "すべての記録を見る",
                Text::EditTitle => "記録を編集",
                Text::Update => "更新",
                Text::Cancel => "キャンセル",
                Text::Edit => "編集",
                Text::Delete => "削除",
                Text::SearchTitle => "記録を検索",
                Text::Keyword => "キーワード",
                Text::AnyTag => "指定なし",
                Text::SearchButton => "検索",
                Text::Previous => "前へ",
                Text::Next => "次へ",
                Text::TagsTitle => "タグ管理",
                Text::TagName => "タグ名",
                Text::TagType => "種類",
                Text::AddTag => "追加",
                Text::MoveUp => "上へ",
                Text::MoveDown => "下へ",
                Text::NoTags => "タグはまだありません",
                Text::TextRequired => "内容を入力してください",
                Text::TitleRequired => "タイトルを入力してください",
                Text::TitleTooLong => "タイトルは100文字以内で入力してください",
                Text::InvalidDate => "日付はYYYY-MM-DD形式で入力してください",
                Text::TagNameRequired => "タグ名を入力してください",
                Text::TagTypeRequired => "種類を入力してください",
                Text::TagTooLong => "タグ名と種類は30文字以内で入力してください",
                Text::TagDuplicate => "同じ種類に同名のタグが既にあります",
            },
            Self::En => match key {
                Text::AppTitle => "Study Log",
                Text::NavHome => "Home",
                Text::NavSearch => "Search",
                Text::NavTags => "Tags",
                Text::NavLogout => "Log out",
                Text::LoginTitle | Text::LoginButton => "Log in",
                Text::Username => "Username",
                Text::Password => "Password",
                Text::LoginRequired => "Please enter your username and password",
                Text::LoginFailed => "Username or password is incorrect",
                Text::LoggedOutTitle => "Logged out",
                Text::LoggedOutBody => "You have been logged out.",
                Text::LoginAgain => "Log in again",
                Text::NewLog => "Record today's study",
                Text::Title => "Title",
                Text::Body => "Notes",
                Text::Date => "Date",
                Text::Tags => "Tags",
                Text::Save => "Save",
                Text::Reminders => "Review reminders",
                Text::NoLogs => "No entries",
                Text::RecentLogs => "Recent entries",
                Text::ShowAll => "View all entries",
                Text::EditTitle => "Edit entry",
                Text::Update => "Update",
                Text::Cancel => "Cancel",
                Text::Edit => "Edit",
                Text::Delete => "Delete",
                Text::SearchTitle => "Search entries",
                Text::Keyword => "Keyword",
                Text::AnyTag => "Any",
                Text::SearchButton => "Search",
                Text::Previous => "Previous",
                Text::Next => "Next",
                Text::TagsTitle => "Manage tags",
                Text::TagName => "Name",
                Text::TagType => "Type",
                Text::AddTag => "Add",
                Text::MoveUp => "Up",
                Text::MoveDown => "Down",
                Text::NoTags => "No tags yet",
                Text::TextRequired => "Please enter some text",
                Text::TitleRequired => "Please enter a title",
                Text::TitleTooLong => "Title must be 100 characters or less",
                Text::InvalidDate => "Dates must use the YYYY-MM-DD format",
                Text::TagNameRequired => "Please enter a tag name",
                Text::TagTypeRequired => "Please enter a tag type",
                Text::TagTooLong => "Tag name and type must be 30 characters or less",
                Text::TagDuplicate => "A tag with that name already exists for this type",
            },
        }
    }

    #[must_use]
    pub fn days_ago(self, days: u64) -> String {
        match self {
            Self::Ja => format!("{days}日前"),
            Self::En if days == 1 => "1 day ago".to_string(),
            Self::En => format!("{days} days ago"),
        }
    }

    #[must_use]
    pub fn result_count(self, count: u64) -> String {
        match self {
            Self::Ja => format!("{count}件"),
            Self::En if count == 1 => "1 result".to_string(),
            Self::En => format!("{count} results"),
        }
    }

    #[must_use]
    pub fn page_of(self, page: u64, total: u64) -> String {
        match self {
            Self::Ja => format!("{page} / {total} ページ"),
            Self::En => format!("Page {page} of {total}"),
        }
    }

    /// Message shown inline for a recoverable log error, `None` for failures
    /// that should abort the request.
    #[must_use]
    pub const fn log_error(self, err: &LogError) -> Option<&'static str> {
        let key = match err {
            LogError::TextRequired => Text::TextRequired,
            LogError::TitleRequired => Text::TitleRequired,
            LogError::TitleTooLong => Text::TitleTooLong,
            LogError::InvalidDate(_) => Text::InvalidDate,
            LogError::NotFound(_) | LogError::Database(_) => return None,
        };
        Some(self.text(key))
    }

    #[must_use]
    pub const fn tag_error(self, err: &TagError) -> Option<&'static str> {
        let key = match err {
            TagError::NameRequired => Text::TagNameRequired,
            TagError::TypeRequired => Text::TagTypeRequired,
            TagError::TooLong => Text::TagTooLong,
            TagError::Duplicate { .. } => Text::TagDuplicate,
            TagError::NotFound(_) | TagError::Database(_) => return None,
        };
        Some(self.text(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Locale::from_code("en"), Locale::En);
        assert_eq!(Locale::from_code(" EN-us "), Locale::En);
        assert_eq!(Locale::from_code("ja"), Locale::Ja);
        assert_eq!(Locale::from_code("fr"), Locale::Ja);
    }

    #[test]
    fn test_login_messages() {
        assert_eq!(
            Locale::Ja.text(Text::LoginFailed),
            "ユーザー名かパスワードが間違っています"
        );
        assert_eq!(
            Locale::En.text(Text::LoginRequired),
            "Please enter your username and password"
        );
    }

    #[test]
    fn test_formatted_messages() {
        assert_eq!(Locale::Ja.days_ago(7), "7日前");
        assert_eq!(Locale::En.days_ago(1), "1 day ago");
        assert_eq!(Locale::En.days_ago(30), "30 days ago");
        assert_eq!(Locale::En.page_of(2, 3), "Page 2 of 3");
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            Locale::En.log_error(&LogError::TextRequired),
            Some("Please enter some text")
        );
        assert!(Locale::En.log_error(&LogError::NotFound(1)).is_none());
        assert!(
            Locale::Ja
                .tag_error(&TagError::Duplicate {
                    name: "Math".to_string(),
                    tag_type: "subject".to_string(),
                })
                .is_some()
        );
        assert!(Locale::Ja.tag_error(&TagError::Database("x".to_string())).is_none());
    }
}
