use std::fmt::Write;

use super::{Locale, Text, error_banner, escape, layout, log_list, render, tag_picker};
use crate::models::reminder::ReminderBucket;
use crate::models::study_log::StudyLog;
use crate::models::tag::TagGroup;
use crate::web::forms::{LogForm, TAGS_SUBMITTED_FIELD};

const INDEX: &str = r#"<section class="card">
  <h2>{{new_log}}</h2>
  {{error}}
  <form method="post" action="/">
    <label>{{title_label}}
      <input type="text" name="title" value="{{title}}" maxlength="100" required>
    </label>
    <label>{{text_label}}
      <textarea name="text" rows="6" required>{{text}}</textarea>
    </label>
    <div class="tag-picker">{{tag_picker}}</div>
    <button type="submit">{{save}}</button>
  </form>
</section>
<section>
  <h2>{{reminders_heading}}</h2>
  {{reminders}}
</section>
<section>
  <h2>{{recent_heading}}</h2>
  {{recent}}
  <p><a href="/search">{{show_all}}</a></p>
</section>"#;

const EDIT: &str = r#"{{error}}
<form method="post" action="/update/{{id}}" class="card">
  <input type="hidden" name="{{tags_marker}}" value="1">
  <label>{{date_label}}
    <input type="date" name="date" value="{{date}}">
  </label>
  <label>{{title_label}}
    <input type="text" name="title" value="{{title}}" maxlength="100" required>
  </label>
  <label>{{text_label}}
    <textarea name="text" rows="10">{{text}}</textarea>
  </label>
  <div class="tag-picker">{{tag_picker}}</div>
  <button type="submit">{{update}}</button>
  <a href="/search">{{cancel}}</a>
</form>"#;

pub struct IndexView<'a> {
    pub username: &'a str,
    pub groups: &'a [TagGroup],
    pub reminders: &'a [ReminderBucket],
    pub recent: &'a [StudyLog],
    pub form: &'a LogForm,
    pub error: Option<&'a str>,
}

fn reminder_sections(locale: Locale, reminders: &[ReminderBucket]) -> String {
    let mut out = String::new();
    for bucket in reminders {
        let _ = write!(
            out,
            r#"<div class="reminder" data-days="{days}">
    <h3>{label} <small>{date}</small></h3>
    {logs}
  </div>"#,
            days = bucket.days_ago,
            label = locale.days_ago(bucket.days_ago),
            date = bucket.date,
            logs = log_list(locale, &bucket.logs, false),
        );
    }
    out
}

#[must_use]
pub fn index_page(locale: Locale, view: &IndexView<'_>) -> String {
    let content = render(
        INDEX,
        &[
            ("new_log", locale.text(Text::NewLog)),
            ("error", error_banner(view.error).as_str()),
            ("title_label", locale.text(Text::Title)),
            ("title", &*escape(&view.form.title)),
            ("text_label", locale.text(Text::Body)),
            ("text", &*escape(&view.form.text)),
            (
                "tag_picker",
                tag_picker(locale, view.groups, &view.form.tag_ids).as_str(),
            ),
            ("save", locale.text(Text::Save)),
            ("reminders_heading", locale.text(Text::Reminders)),
            (
                "reminders",
                reminder_sections(locale, view.reminders).as_str(),
            ),
            ("recent_heading", locale.text(Text::RecentLogs)),
            ("recent", log_list(locale, view.recent, true).as_str()),
            ("show_all", locale.text(Text::ShowAll)),
        ],
    );
    layout(
        locale,
        locale.text(Text::AppTitle),
        Some(view.username),
        &content,
    )
}

#[must_use]
pub fn edit_page(
    locale: Locale,
    username: &str,
    id: i32,
    form: &LogForm,
    groups: &[TagGroup],
    error: Option<&str>,
) -> String {
    let id = id.to_string();
    let content = render(
        EDIT,
        &[
            ("error", error_banner(error).as_str()),
            ("id", id.as_str()),
            ("tags_marker", TAGS_SUBMITTED_FIELD),
            ("date_label", locale.text(Text::Date)),
            ("date", &*escape(&form.date)),
            ("title_label", locale.text(Text::Title)),
            ("title", &*escape(&form.title)),
            ("text_label", locale.text(Text::Body)),
            ("text", &*escape(&form.text)),
            (
                "tag_picker",
                tag_picker(locale, groups, &form.tag_ids).as_str(),
            ),
            ("update", locale.text(Text::Update)),
            ("cancel", locale.text(Text::Cancel)),
        ],
    );
    layout(locale, locale.text(Text::EditTitle), Some(username), &content)
}
