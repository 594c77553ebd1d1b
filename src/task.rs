use chrono::{DateTime, Utc};
use icescrum_api::{Classification, NormalizedTask, TaskStatus};

/// Read-only view of a task as consumed by a task-tracking host.
pub trait Task {
    fn id(&self) -> &str;
    fn summary(&self) -> &str;
    /// HTML description, including any server-derived links.
    fn description(&self) -> &str;
    fn classification(&self) -> Classification;
    fn status(&self) -> TaskStatus;
    fn is_closed(&self) -> bool;
    fn created(&self) -> Option<DateTime<Utc>>;
    fn updated(&self) -> Option<DateTime<Utc>>;
    fn issue_url(&self) -> &str;

    /// Whether the task comes from a remote tracker rather than being local to the host.
    fn is_issue(&self) -> bool {
        true
    }
}

impl Task for NormalizedTask {
    fn id(&self) -> &str {
        NormalizedTask::id(self)
    }

    fn summary(&self) -> &str {
        NormalizedTask::summary(self)
    }

    fn description(&self) -> &str {
        NormalizedTask::description(self)
    }

    fn classification(&self) -> Classification {
        NormalizedTask::classification(self)
    }

    fn status(&self) -> TaskStatus {
        NormalizedTask::status(self)
    }

    fn is_closed(&self) -> bool {
        NormalizedTask::is_closed(self)
    }

    fn created(&self) -> Option<DateTime<Utc>> {
        NormalizedTask::created(self)
    }

    fn updated(&self) -> Option<DateTime<Utc>> {
        NormalizedTask::updated(self)
    }

    fn issue_url(&self) -> &str {
        NormalizedTask::issue_url(self)
    }
}
