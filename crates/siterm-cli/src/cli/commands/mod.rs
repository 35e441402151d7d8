//! CLI command handlers.

mod request;
mod sanitize;

pub use request::run_request;
#[cfg(test)]
pub use request::call_options;
pub use sanitize::run_sanitize;
