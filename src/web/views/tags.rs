use std::fmt::Write;

use super::{Locale, Text, error_banner, escape, layout, render};
use crate::models::tag::TagGroup;
use crate::web::forms::TagForm;

const TAGS: &str = r#"<section class="card">
  {{error}}
  <form method="post" action="/tags/add" class="inline-form">
    <label>{{name_label}}
      <input type="text" name="name" value="{{name}}" maxlength="30" required>
    </label>
    <label>{{type_label}}
      <input type="text" name="tag_type" value="{{tag_type}}" maxlength="30" list="tag-types" required>
    </label>
    <datalist id="tag-types">{{type_options}}</datalist>
    <button type="submit">{{submit}}</button>
  </form>
</section>
{{groups}}"#;

fn group_tables(locale: Locale, groups: &[TagGroup]) -> String {
    if groups.is_empty() {
        return format!(r#"<p class="empty">{}</p>"#, locale.text(Text::NoTags));
    }

    let mut out = String::new();
    for group in groups {
        let _ = write!(
            out,
            r#"<section class="tag-group"><h2>{}</h2><ol>"#,
            escape(&group.tag_type)
        );
        let last = group.tags.len().saturating_sub(1);
        for (position, tag) in group.tags.iter().enumerate() {
            let up = if position == 0 {
                String::new()
            } else {
                move_button(tag.id, "up", locale.text(Text::MoveUp))
            };
            let down = if position == last {
                String::new()
            } else {
                move_button(tag.id, "down", locale.text(Text::MoveDown))
            };
            let _ = write!(
                out,
                r#"<li><span class="tag">{name}</span> {up}{down}<form method="post" action="/tags/delete/{id}" class="inline"><button type="submit" class="danger">{delete}</button></form></li>"#,
                name = escape(&tag.name),
                id = tag.id,
                delete = locale.text(Text::Delete),
            );
        }
        out.push_str("</ol></section>");
    }
    out
}

fn move_button(id: i32, direction: &str, label: &str) -> String {
    format!(
        r#"<form method="post" action="/tags/move/{id}/{direction}" class="inline"><button type="submit">{label}</button></form>"#
    )
}

#[must_use]
pub fn tags_page(
    locale: Locale,
    username: &str,
    groups: &[TagGroup],
    form: &TagForm,
    error: Option<&str>,
) -> String {
    let type_options: String = groups
        .iter()
        .map(|g| format!(r#"<option value="{}">"#, escape(&g.tag_type)))
        .collect();

    let content = render(
        TAGS,
        &[
            ("error", error_banner(error).as_str()),
            ("name_label", locale.text(Text::TagName)),
            ("name", &*escape(&form.name)),
            ("type_label", locale.text(Text::TagType)),
            ("tag_type", &*escape(&form.tag_type)),
            ("type_options", type_options.as_str()),
            ("submit", locale.text(Text::AddTag)),
            ("groups", group_tables(locale, groups).as_str()),
        ],
    );
    layout(locale, locale.text(Text::TagsTitle), Some(username), &content)
}
