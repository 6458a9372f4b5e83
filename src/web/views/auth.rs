use super::{Locale, Text, error_banner, escape, layout, render};

const LOGIN: &str = r#"{{error}}
<form method="post" action="/login" class="card">
  <label>{{username_label}}
    <input type="text" name="username" value="{{username}}" maxlength="50" autofocus>
  </label>
  <label>{{password_label}}
    <input type="password" name="password">
  </label>
  <button type="submit">{{submit}}</button>
</form>"#;

const LOGGED_OUT: &str = r#"<p>{{body}}</p>
<p><a href="/login">{{login_again}}</a></p>"#;

/// The username is echoed back; the password never is.
#[must_use]
pub fn login_page(locale: Locale, username: &str, error: Option<&str>) -> String {
    let content = render(
        LOGIN,
        &[
            ("error", error_banner(error).as_str()),
            ("username_label", locale.text(Text::Username)),
            ("username", &*escape(username)),
            ("password_label", locale.text(Text::Password)),
            ("submit", locale.text(Text::LoginButton)),
        ],
    );
    layout(locale, locale.text(Text::LoginTitle), None, &content)
}

#[must_use]
pub fn logged_out_page(locale: Locale) -> String {
    let content = render(
        LOGGED_OUT,
        &[
            ("body", locale.text(Text::LoggedOutBody)),
            ("login_again", locale.text(Text::LoginAgain)),
        ],
    );
    layout(locale, locale.text(Text::LoggedOutTitle), None, &content)
}
