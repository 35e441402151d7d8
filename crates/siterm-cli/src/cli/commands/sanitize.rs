//! `siterm sanitize` – show an endpoint without its credentials.

use anyhow::Result;
use siterm_core::sanitize_url;

pub fn run_sanitize(url: &str) -> Result<()> {
    let endpoint = sanitize_url(url)?;
    println!("{}", endpoint.url);
    if let Some(user) = endpoint.username {
        println!("username: {}", user);
        let password = if endpoint.password.is_some() { "set" } else { "none" };
        println!("password: {}", password);
    }
    Ok(())
}
