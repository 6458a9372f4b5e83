//! Init command handler

use crate::config::Config;

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
        println!("Set SECRET_KEY and ADMIN_PASSWORD before exposing the server.");
        println!(
            "Session cookies are Secure by default; set [server] secure_cookies = false \
             when serving plain HTTP beyond localhost."
        );
    } else {
        println!("config.toml already exists; leaving it untouched.");
    }
    Ok(())
}
