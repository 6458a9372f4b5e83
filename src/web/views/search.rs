use std::fmt::Write;

use super::{Locale, Text, error_banner, escape, layout, log_list, render};
use crate::models::study_log::{Page, StudyLog};

const SEARCH: &str = r#"<form method="get" action="/search" class="card search">
  <label>{{date_label}}
    <input type="date" name="date" value="{{date}}">
  </label>
  <label>{{keyword_label}}
    <input type="text" name="keyword" value="{{keyword}}">
  </label>
  <label>{{tag_label}}
    <select name="tag">
      <option value="">{{any_tag}}</option>
      {{tag_options}}
    </select>
  </label>
  <button type="submit">{{submit}}</button>
</form>
{{error}}
{{summary}}
{{results}}
{{pager}}"#;

/// Raw filter values as submitted, echoed back into the form.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub date: String,
    pub keyword: String,
    pub tag: String,
}

impl SearchParams {
    /// Query string for another page of the same search.
    #[must_use]
    pub fn page_query(&self, page: u64) -> String {
        let mut query = String::new();
        for (key, value) in [
            ("date", &self.date),
            ("keyword", &self.keyword),
            ("tag", &self.tag),
        ] {
            if !value.trim().is_empty() {
                let _ = write!(query, "{key}={}&", urlencoding::encode(value));
            }
        }
        let _ = write!(query, "page={page}");
        query
    }
}

pub struct SearchView<'a> {
    pub username: &'a str,
    pub params: &'a SearchParams,
    pub tag_names: &'a [String],
    /// `None` when the filters were rejected.
    pub results: Option<&'a Page<StudyLog>>,
    pub error: Option<&'a str>,
}

fn tag_options(names: &[String], selected: &str) -> String {
    let selected = selected.trim();
    let mut out = String::new();
    for name in names {
        let marker = if name == selected { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{value}"{marker}>{value}</option>"#,
            value = escape(name),
        );
    }
    out
}

fn pager(locale: Locale, params: &SearchParams, page: &Page<StudyLog>) -> String {
    if page.total_pages <= 1 {
        return String::new();
    }

    let mut out = String::from(r#"<nav class="pager">"#);
    if page.has_previous() {
        let _ = write!(
            out,
            r#"<a rel="prev" href="/search?{}">{}</a>"#,
            escape(&params.page_query(page.page - 1)),
            locale.text(Text::Previous)
        );
    }
    let _ = write!(
        out,
        "<span>{}</span>",
        locale.page_of(page.page, page.total_pages)
    );
    if page.has_next() {
        let _ = write!(
            out,
            r#"<a rel="next" href="/search?{}">{}</a>"#,
            escape(&params.page_query(page.page + 1)),
            locale.text(Text::Next)
        );
    }
    out.push_str("</nav>");
    out
}

#[must_use]
pub fn search_page(locale: Locale, view: &SearchView<'_>) -> String {
    let (summary, results, pager_html) = view.results.map_or_else(
        || (String::new(), String::new(), String::new()),
        |page| {
            (
                format!(
                    r#"<p class="summary">{}</p>"#,
                    locale.result_count(page.total_items)
                ),
                log_list(locale, &page.items, true),
                pager(locale, view.params, page),
            )
        },
    );

    let content = render(
        SEARCH,
        &[
            ("date_label", locale.text(Text::Date)),
            ("date", &*escape(&view.params.date)),
            ("keyword_label", locale.text(Text::Keyword)),
            ("keyword", &*escape(&view.params.keyword)),
            ("tag_label", locale.text(Text::Tags)),
            ("any_tag", locale.text(Text::AnyTag)),
            (
                "tag_options",
                tag_options(view.tag_names, &view.params.tag).as_str(),
            ),
            ("submit", locale.text(Text::SearchButton)),
            ("error", error_banner(view.error).as_str()),
            ("summary", summary.as_str()),
            ("results", results.as_str()),
            ("pager", pager_html.as_str()),
        ],
    );
    layout(
        locale,
        locale.text(Text::SearchTitle),
        Some(view.username),
        &content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_keeps_filters() {
        let params = SearchParams {
            date: String::new(),
            keyword: "exam prep".to_string(),
            tag: "C++".to_string(),
        };
        assert_eq!(params.page_query(2), "keyword=exam%20prep&tag=C%2B%2B&page=2");
        assert_eq!(SearchParams::default().page_query(1), "page=1");
    }

    #[test]
    fn test_pager_links() {
        let params = SearchParams::default();
        let page = Page {
            items: Vec::<StudyLog>::new(),
            page: 2,
            total_pages: 3,
            total_items: 25,
        };
        let html = pager(Locale::En, &params, &page);
        assert!(html.contains(r#"href="/search?page=1""#));
        assert!(html.contains(r#"href="/search?page=3""#));
        assert!(html.contains("Page 2 of 3"));

        let single = Page {
            items: Vec::<StudyLog>::new(),
            page: 1,
            total_pages: 1,
            total_items: 4,
        };
        assert!(pager(Locale::En, &params, &single).is_empty());
    }

    #[test]
    fn test_selected_tag_option() {
        let names = vec!["Math".to_string(), "History".to_string()];
        let html = tag_options(&names, "History");
        assert!(html.contains(r#"<option value="History" selected>"#));
        assert!(html.contains(r#"<option value="Math">"#));
    }

    #[test]
    fn test_selected_tag_option_ignores_padding() {
        let names = vec!["Math".to_string(), "History".to_string()];
        let html = tag_options(&names, "  History ");
        assert!(html.contains(r#"<option value="History" selected>"#));
    }
}
