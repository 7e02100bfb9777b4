//! Asset state replay.
//!
//! The current state of an asset is derived exclusively by folding its
//! event log; it is never persisted authoritatively.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Layer;
use crate::log::{EventKind, EventLog};
use crate::{Error, Result};

/// Current state of an asset, derived from its event log.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetState {
    /// The asset's current identifier.
    pub did: String,

    /// Display name, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Trust layer the identifier is anchored at.
    pub layer: Layer,

    /// Resources bound to the asset.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub resources: Vec<Value>,

    /// Creator identifier, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,

    /// Creation timestamp, when recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// Timestamp of the most recent change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    /// `true` once the log is sealed.
    pub deactivated: bool,

    /// Fields not covered by the typed state.
    #[serde(skip_serializing_if = "Map::is_empty", default)]
    pub metadata: Map<String, Value>,
}

/// Fold an event log into the asset state it describes.
///
/// # Errors
///
/// Will fail with `EmptyLog` if the log has no events, `NotCreateFirst`
/// if the first event is not a creation, and `MalformedLog` if a second
/// create event appears.
pub fn resolve_state(log: &EventLog) -> Result<AssetState> {
    let Some(first) = log.events.first() else {
        return Err(Error::EmptyLog);
    };
    if first.kind != EventKind::Create {
        return Err(Error::NotCreateFirst);
    }

    let mut state = AssetState::default();
    apply_fields(&mut state, &first.data);

    for entry in &log.events[1..] {
        match entry.kind {
            EventKind::Create => {
                return Err(Error::MalformedLog(
                    "create event after the first entry".to_string(),
                ));
            }
            EventKind::Update => apply_update(&mut state, &entry.data),
            EventKind::Deactivate => apply_deactivate(&mut state, &entry.data),
        }
    }
    Ok(state)
}

// Apply recognized fields; everything else lands in metadata.
fn apply_fields(state: &mut AssetState, data: &Map<String, Value>) {
    for (key, value) in data {
        match (key.as_str(), value) {
            ("operation", _) => {}
            ("did", Value::String(s)) => state.did.clone_from(s),
            ("name", Value::String(s)) => state.name = Some(s.clone()),
            ("layer", Value::String(s)) => {
                if let Ok(layer) = s.parse() {
                    state.layer = layer;
                }
            }
            ("resources", Value::Array(items)) => state.resources.clone_from(items),
            ("creator", Value::String(s)) => state.creator = Some(s.clone()),
            ("createdAt", Value::String(s)) => state.created_at = Some(s.clone()),
            ("updatedAt", Value::String(s)) => state.updated_at = Some(s.clone()),
            _ => {
                state.metadata.insert(key.clone(), value.clone());
            }
        }
    }
}

// An update carrying both targetDid and layer is a migration; it rebinds
// the identifier and records the migration context in metadata.
fn apply_update(state: &mut AssetState, data: &Map<String, Value>) {
    let is_migration = data.contains_key("targetDid") && data.contains_key("layer");
    if !is_migration {
        apply_fields(state, data);
        return;
    }

    if let Some(Value::String(target)) = data.get("targetDid") {
        state.did.clone_from(target);
    }
    if let Some(Value::String(layer)) = data.get("layer") {
        if let Ok(layer) = layer.parse() {
            state.layer = layer;
        }
    }
    if let Some(Value::String(at)) = data.get("migratedAt") {
        state.updated_at = Some(at.clone());
    }
    for key in ["sourceDid", "domain", "txid", "inscriptionId", "satoshi", "blockHeight"] {
        if let Some(value) = data.get(key) {
            state.metadata.insert(key.to_string(), value.clone());
        }
    }
}

fn apply_deactivate(state: &mut AssetState, data: &Map<String, Value>) {
    state.deactivated = true;
    if let Some(Value::String(at)) = data.get("deactivatedAt") {
        state.updated_at = Some(at.clone());
    }
    if let Some(reason) = data.get("reason") {
        state.metadata.insert("deactivationReason".to_string(), reason.clone());
    }
}
