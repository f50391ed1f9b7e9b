//! Migration plan and lifecycle event payloads

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The plan under execution: identity plus the endpoint pair. Opaque to
/// hooks beyond these fields; the host owns plan construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationPlan {
    pub id: Uuid,
    pub name: String,
    pub source: String,
    pub destination: String,
}

impl MigrationPlan {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Outcome of one migration action, handed to action-completed hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub errors: Vec<String>,
}

impl ActionResult {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            success: false,
            errors: errors.into_iter().map(Into::into).collect(),
        }
    }
}

/// Summary of one completed batch, handed to batch-completed hooks.
///
/// Batches are per content type; the type is carried as its registered
/// name rather than a generic parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub content_type: String,
    pub item_count: usize,
    pub completed_count: usize,
}

impl BatchSummary {
    pub fn new(content_type: impl Into<String>, item_count: usize, completed_count: usize) -> Self {
        Self {
            content_type: content_type.into(),
            item_count,
            completed_count,
        }
    }
}

/// What initialize-migration hooks observe before the first batch runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MigrationStartInfo {
    pub plan_id: Uuid,
    /// Content type names in pipeline order.
    pub content_types: Vec<String>,
}

impl MigrationStartInfo {
    pub fn new(plan_id: Uuid, content_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            plan_id,
            content_types: content_types.into_iter().map(Into::into).collect(),
        }
    }
}
