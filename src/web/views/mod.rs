//! Server-rendered HTML.
//!
//! Pages are plain string templates with `{{name}}` placeholders. Every value
//! substituted into a template must already be escaped with [`escape`] or be
//! markup produced by another view function.

use axum::http::StatusCode;
use std::borrow::Cow;
use std::fmt::Write;

use super::messages::{Locale, Text};
use crate::models::study_log::StudyLog;
use crate::models::tag::{Tag, TagGroup};

pub mod auth;
pub mod logs;
pub mod search;
pub mod tags;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="{{lang}}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{page_title}} | {{app_title}}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <header class="site-header">
    <a href="/" class="site-name">{{app_title}}</a>
    {{nav}}
  </header>
  <main>
    <h1>{{page_title}}</h1>
    {{content}}
  </main>
</body>
</html>"#;

const NAV: &str = r#"<nav>
      <a href="/">{{home}}</a>
      <a href="/search">{{search}}</a>
      <a href="/tags">{{tags}}</a>
      <span class="user">{{username}}</span>
      <a href="/logout">{{logout}}</a>
    </nav>"#;

const ERROR_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{{status}}</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main>
    <h1>{{status}}</h1>
    <p>{{message}}</p>
    <p><a href="/">Home</a></p>
  </main>
</body>
</html>"#;

/// Escapes text for element content and quoted attribute values.
#[must_use]
pub fn escape(value: &str) -> Cow<'_, str> {
    html_escape::encode_safe(value)
}

/// Substitutes `{{name}}` placeholders in one pass. Substituted values are
/// never rescanned, so user text containing braces cannot inject markup.
/// Unknown placeholders render as empty.
#[must_use]
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };

        let name = after[..end].trim();
        if let Some((_, value)) = vars.iter().find(|(key, _)| *key == name) {
            out.push_str(value);
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Wraps page content in the site chrome. `username` is `None` on public
/// pages, which hides the navigation.
#[must_use]
pub fn layout(locale: Locale, page_title: &str, username: Option<&str>, content: &str) -> String {
    let nav = username.map_or_else(String::new, |name| {
        render(
            NAV,
            &[
                ("home", locale.text(Text::NavHome)),
                ("search", locale.text(Text::NavSearch)),
                ("tags", locale.text(Text::NavTags)),
                ("username", &*escape(name)),
                ("logout", locale.text(Text::NavLogout)),
            ],
        )
    });

    render(
        LAYOUT,
        &[
            ("lang", locale.code()),
            ("page_title", &*escape(page_title)),
            ("app_title", locale.text(Text::AppTitle)),
            ("nav", nav.as_str()),
            ("content", content),
        ],
    )
}

#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let status_line = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default()
    );
    render(
        ERROR_PAGE,
        &[("status", &*escape(&status_line)), ("message", &*escape(message))],
    )
}

/// Inline validation message, empty when there is none.
#[must_use]
pub fn error_banner(message: Option<&str>) -> String {
    message.map_or_else(String::new, |msg| {
        format!(r#"<p class="error" role="alert">{}</p>"#, escape(msg))
    })
}

fn tag_badges(tags: &[Tag]) -> String {
    let mut out = String::new();
    for tag in tags {
        let href = format!("/search?tag={}", urlencoding::encode(&tag.name));
        let _ = write!(
            out,
            r#"<a class="tag" href="{}" title="{}">{}</a>"#,
            escape(&href),
            escape(&tag.tag_type),
            escape(&tag.name)
        );
    }
    out
}

/// One log entry. With `actions`, edit and delete controls are included.
#[must_use]
pub fn log_entry(locale: Locale, log: &StudyLog, actions: bool) -> String {
    let controls = if actions {
        format!(
            r#"<div class="actions">
        <a href="/edit/{id}">{edit}</a>
        <form method="post" action="/delete/{id}" class="inline">
          <button type="submit" class="danger">{delete}</button>
        </form>
      </div>"#,
            id = log.id,
            edit = locale.text(Text::Edit),
            delete = locale.text(Text::Delete),
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="log">
      <header><time datetime="{date}">{date}</time> <strong>{title}</strong></header>
      <div class="tags">{tags}</div>
      <p class="text">{text}</p>
      {controls}
    </article>"#,
        date = log.date,
        title = escape(&log.title),
        tags = tag_badges(&log.tags),
        text = escape(&log.text),
    )
}

#[must_use]
pub fn log_list(locale: Locale, logs: &[StudyLog], actions: bool) -> String {
    if logs.is_empty() {
        return format!(r#"<p class="empty">{}</p>"#, locale.text(Text::NoLogs));
    }
    logs.iter()
        .map(|log| log_entry(locale, log, actions))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Checkbox picker for every tag, grouped by type.
#[must_use]
pub fn tag_picker(locale: Locale, groups: &[TagGroup], selected: &[i32]) -> String {
    if groups.is_empty() {
        return format!(
            r#"<p class="empty"><a href="/tags">{}</a></p>"#,
            locale.text(Text::NoTags)
        );
    }

    let mut out = String::new();
    for group in groups {
        let _ = write!(
            out,
            r"<fieldset><legend>{}</legend>",
            escape(&group.tag_type)
        );
        for tag in &group.tags {
            let checked = if selected.contains(&tag.id) {
                " checked"
            } else {
                ""
            };
            let _ = write!(
                out,
                r#"<label><input type="checkbox" name="tag_ids" value="{}"{}> {}</label>"#,
                tag.id,
                checked,
                escape(&tag.name)
            );
        }
        out.push_str("</fieldset>");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_render_single_pass() {
        let out = render(
            "<h1>{{title}}</h1>{{body}}{{missing}}",
            &[("title", "{{body}}"), ("body", "<p>x</p>")],
        );
        assert_eq!(out, "<h1>{{body}}</h1><p>x</p>");
    }

    #[test]
    fn test_render_unterminated_placeholder() {
        assert_eq!(render("a {{b", &[("b", "x")]), "a {{b");
    }

    #[test]
    fn test_layout_escapes_title_and_hides_nav() {
        let html = layout(Locale::En, "<script>", None, "<p>ok</p>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("/logout"));
        assert!(html.contains("<p>ok</p>"));

        let html = layout(Locale::En, "Home", Some("admin"), "");
        assert!(html.contains(r#"href="/logout""#));
    }

    #[test]
    fn test_log_entry_escapes_user_content() {
        let log = StudyLog {
            id: 4,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            title: "a & b".to_string(),
            text: "<img src=x onerror=alert(1)>".to_string(),
            tags: vec![Tag {
                id: 1,
                name: "C++".to_string(),
                tag_type: "subject".to_string(),
                sort_order: 1,
            }],
        };
        let html = log_entry(Locale::En, &log, true);
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("&lt;img"));
        assert!(html.contains("&#x2F;search?tag=C%2B%2B"));
        assert!(html.contains(r#"action="/delete/4""#));
    }

    #[test]
    fn test_tag_picker_marks_selected() {
        let groups = vec![TagGroup {
            tag_type: "subject".to_string(),
            tags: vec![
                Tag {
                    id: 1,
                    name: "Math".to_string(),
                    tag_type: "subject".to_string(),
                    sort_order: 1,
                },
                Tag {
                    id: 2,
                    name: "History".to_string(),
                    tag_type: "subject".to_string(),
                    sort_order: 2,
                },
            ],
        }];
        let html = tag_picker(Locale::En, &groups, &[2]);
        assert!(html.contains(r#"value="1">"#));
        assert!(html.contains(r#"value="2" checked>"#));
    }
}
