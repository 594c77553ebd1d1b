//! iceScrum task repository connector for task-tracking hosts.
//!
//! The host stores a raw project URL plus credentials ([`RepositorySettings`]);
//! [`IceScrumRepository`] derives the server root and project key from that URL
//! on every call and exposes the project's tasks through [`TaskRepository`].

mod identity;
mod repository;
mod settings;
mod task;

pub use icescrum_api::{Classification, IceScrumError, NormalizedTask, Result, TaskStatus};
pub use identity::{derive_identity, ServerIdentity};
pub use repository::{IceScrumRepository, TaskRepository};
pub use settings::RepositorySettings;
pub use task::Task;

/// Installs the `env_logger` backend with an `info` default; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_text(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let mut truncated: String = value.chars().take(limit).collect();
    truncated.push('…');
    truncated
}

/// Shortens error text for logs and hides it entirely when it looks like it carries credentials.
pub(crate) fn redact_log_details(value: &str) -> String {
    let collapsed = collapse_whitespace(value);
    let category = collapsed
        .split(':')
        .next()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .unwrap_or("error");
    let lowered = collapsed.to_lowercase();
    let has_sensitive_hint = ["authorization", "basic ", "password", "passwd", "@"]
        .iter()
        .any(|hint| lowered.contains(hint));

    if has_sensitive_hint {
        return format!(
            "{}: <redacted-sensitive-details>",
            truncate_text(category, 64)
        );
    }

    truncate_text(&collapsed, 180)
}
