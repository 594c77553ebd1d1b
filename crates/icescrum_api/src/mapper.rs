//! Conversion of raw task payloads into [`NormalizedTask`] values.

use crate::dates::parse_timestamp;
use crate::models::{Classification, NormalizedTask, RawTaskRecord, TaskStatus, STATE_DONE};

/// Builds the normalized view of one task. Never fails: bad dates become `None`
/// and missing link targets drop the corresponding link.
pub fn map_task(raw: RawTaskRecord, server_url: &str, project_key: &str) -> NormalizedTask {
    let id = format!("T{}", raw.uid);
    let classification = Classification::from_type_code(raw.task_type);
    let status = TaskStatus::from_state_code(raw.state);
    let issue_url = format!("{server_url}/p/{project_key}-{id}");

    let details = task_details(&raw, classification, status, &issue_url, server_url, project_key);
    let description = format!(
        "{}<br/>{}",
        raw.description.as_deref().unwrap_or_default(),
        details
    );

    NormalizedTask {
        created: raw.creation_date.as_deref().and_then(parse_timestamp),
        updated: raw.last_updated.as_deref().and_then(parse_timestamp),
        summary: raw.name.unwrap_or_default(),
        closed: raw.state >= STATE_DONE,
        id,
        description,
        classification,
        status,
        issue_url,
    }
}

/// HTML block appended to the description: story link, state, remaining time and sprint link.
fn task_details(
    raw: &RawTaskRecord,
    classification: Classification,
    status: TaskStatus,
    issue_url: &str,
    server_url: &str,
    project_key: &str,
) -> String {
    let project_url = format!("{server_url}/p/{project_key}");
    let mut html = String::new();

    if classification == Classification::Feature {
        match raw.parent_story_id() {
            Ok(story_id) => html.push_str(&format!(
                "<br/><b>Story: </b><a href='{project_url}#story/{story_id}' target='_blank'>View associated story</a><br/>"
            )),
            Err(missing) => {
                tracing::warn!(task = %raw.uid, %missing, "feature task without parent story")
            }
        }
    }

    html.push_str(&format!("<br/><b>State:</b> {}<br/>", status.label()));

    if let Some(estimation) = &raw.estimation {
        html.push_str(&format!(
            "<br/><b>Remaining time: </b>{estimation} (<a href='{issue_url}'>Update</a>)"
        ));
    }

    match raw.backlog_id() {
        Ok(sprint_id) => html.push_str(&format!(
            "<br/><a href='{project_url}#sprintPlan/{sprint_id}'>View in sprint plan</a>"
        )),
        Err(missing) => tracing::warn!(task = %raw.uid, %missing, "task without backlog"),
    }

    html
}
