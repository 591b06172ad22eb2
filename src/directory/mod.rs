use crate::shared::SmokeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

pub mod api;

pub use api::{WorkflowDirectory, WORKFLOWS_LISTING_PATH};

pub type WorkflowIds = BTreeMap<String, String>;

pub trait WorkflowCatalog {
    fn fetch_workflow_ids(&self) -> Result<WorkflowIds, SmokeError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorkflowRecord {
    #[serde(default, deserialize_with = "string_or_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "bool_or_none")]
    pub active: Option<bool>,
    #[serde(default, rename = "updatedAt", deserialize_with = "string_or_none")]
    pub updated_at: Option<String>,
}

impl WorkflowRecord {
    // Anything but an explicit `active: false` is eligible.
    pub fn is_eligible(&self) -> bool {
        self.active != Some(false)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowListing {
    #[serde(default, deserialize_with = "object_records")]
    pub data: Vec<WorkflowRecord>,
}

// Fields of an unexpected type read as absent so one odd record cannot fail
// the whole listing.
fn string_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        _ => None,
    })
}

fn bool_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool())
}

fn object_records<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<WorkflowRecord>, D::Error> {
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        _ => return Ok(Vec::new()),
    };
    Ok(entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

// `updatedAt` values are fixed-width ISO-8601 strings, so string order is time
// order. Ties go to the record listed last; a winner without an id hides the
// name instead of reviving an older record.
pub fn latest_workflow_ids(records: &[WorkflowRecord]) -> WorkflowIds {
    let mut latest: BTreeMap<&str, (&str, Option<&str>)> = BTreeMap::new();
    for record in records {
        let Some(name) = record.name.as_deref().filter(|n| !n.is_empty()) else {
            continue;
        };
        if !record.is_eligible() {
            continue;
        }
        let updated = record.updated_at.as_deref().unwrap_or("");
        let replace = match latest.get(name) {
            Some((seen, _)) => updated >= *seen,
            None => true,
        };
        if replace {
            latest.insert(name, (updated, record.id.as_deref()));
        }
    }

    latest
        .into_iter()
        .filter_map(|(name, (_, id))| {
            id.filter(|id| !id.is_empty())
                .map(|id| (name.to_string(), id.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, active: Option<bool>, updated_at: &str) -> WorkflowRecord {
        WorkflowRecord {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            active,
            updated_at: Some(updated_at.to_string()),
        }
    }

    #[test]
    fn newest_active_record_wins() {
        let ids = latest_workflow_ids(&[
            record("old", "v1_notion_search", Some(true), "2025-01-01T00:00:00.000Z"),
            record("new", "v1_notion_search", None, "2025-03-01T00:00:00.000Z"),
            record("mid", "v1_notion_search", Some(true), "2025-02-01T00:00:00.000Z"),
        ]);
        assert_eq!(ids.get("v1_notion_search").map(String::as_str), Some("new"));
    }

    #[test]
    fn inactive_newer_record_never_beats_active_older_one() {
        let ids = latest_workflow_ids(&[
            record("active", "v1_tasks_create", Some(true), "2025-01-01T00:00:00.000Z"),
            record("inactive", "v1_tasks_create", Some(false), "2025-06-01T00:00:00.000Z"),
        ]);
        assert_eq!(ids.get("v1_tasks_create").map(String::as_str), Some("active"));
    }

    #[test]
    fn equal_timestamps_resolve_to_last_seen() {
        let ids = latest_workflow_ids(&[
            record("first", "v1_db_schema", Some(true), "2025-01-01T00:00:00.000Z"),
            record("second", "v1_db_schema", Some(true), "2025-01-01T00:00:00.000Z"),
        ]);
        assert_eq!(ids.get("v1_db_schema").map(String::as_str), Some("second"));
    }

    #[test]
    fn nameless_and_idless_records_are_skipped() {
        let mut nameless = record("x", "", Some(true), "2025-01-01T00:00:00.000Z");
        nameless.name = None;
        let mut idless = record("", "v1_db_sample", Some(true), "2025-09-01T00:00:00.000Z");
        idless.id = None;
        let ids = latest_workflow_ids(&[
            nameless,
            record("older", "v1_db_sample", Some(true), "2025-01-01T00:00:00.000Z"),
            idless,
        ]);
        assert!(ids.is_empty(), "unexpected ids: {ids:?}");
    }

    #[test]
    fn missing_updated_at_sorts_before_any_timestamp() {
        let mut undated = record("undated", "v1_os_bootstrap", Some(true), "");
        undated.updated_at = None;
        let ids = latest_workflow_ids(&[
            record("dated", "v1_os_bootstrap", Some(true), "2024-12-31T23:59:59.000Z"),
            undated,
        ]);
        assert_eq!(ids.get("v1_os_bootstrap").map(String::as_str), Some("dated"));
    }

    #[test]
    fn listing_parses_backend_shape() {
        let listing: WorkflowListing = serde_json::from_str(
            r#"{"data":[{"id":"wf1","name":"v1_notion_search","active":true,"updatedAt":"2025-01-01T00:00:00.000Z","nodes":[]}],"nextCursor":null}"#,
        )
        .expect("parse listing");
        assert_eq!(listing.data.len(), 1);
        assert_eq!(listing.data[0].id.as_deref(), Some("wf1"));
        assert!(listing.data[0].is_eligible());
    }

    #[test]
    fn mistyped_records_do_not_fail_the_listing() {
        let listing: WorkflowListing = serde_json::from_str(
            r#"{"data":[
                {"id":7,"name":"legacy","active":true,"updatedAt":"2025-01-01T00:00:00.000Z"},
                {"id":"wf","name":"v1_notion_search","active":"yes","updatedAt":12},
                "not-a-record",
                null
            ]}"#,
        )
        .expect("parse listing");
        assert_eq!(listing.data.len(), 2);
        assert_eq!(listing.data[0].id, None);
        assert_eq!(listing.data[1].active, None);

        let ids = latest_workflow_ids(&listing.data);
        assert_eq!(ids.len(), 1);
        assert_eq!(ids.get("v1_notion_search").map(String::as_str), Some("wf"));
    }
}
