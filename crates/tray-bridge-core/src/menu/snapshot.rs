use std::{panic::Location, sync::Arc};

use error_location::ErrorLocation;
use serde_json::{Map, Value};

use crate::{BridgeError, Result, bridge::args_type_name, menu::MenuItemDescriptor};

/// An immutable, ordered menu at a point in time.
///
/// Every `menuItems` update replaces the snapshot wholesale; there is no
/// incremental diffing. Cloning is a cheap reference-count bump, which is
/// what lets an open popup session keep reading the menu it was built
/// from while a re-entrant update installs a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuSnapshot {
    items: Arc<[MenuItemDescriptor]>,
}

impl MenuSnapshot {
    /// A snapshot with no entries.
    pub fn empty() -> Self {
        Self {
            items: Arc::from(Vec::new()),
        }
    }

    /// Builds a snapshot from an ordered list of descriptors.
    pub fn from_items(items: Vec<MenuItemDescriptor>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }

    /// The entries in display order.
    pub fn items(&self) -> &[MenuItemDescriptor] {
        &self.items
    }

    /// Number of entries, separators included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MenuSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Parses a `menuItems` payload into a snapshot.
///
/// An entry whose `type` field is the string `"separator"` becomes a
/// [`MenuItemDescriptor::Separator`]; anything else must carry `label`
/// (string), `enabled` (bool), and `id` (string). The first malformed
/// entry fails the whole parse, so an update is applied atomically or
/// not at all.
pub fn parse_menu_items(items: &[Value]) -> Result<MenuSnapshot> {
    let mut parsed = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        parsed.push(parse_item(index, item)?);
    }

    Ok(MenuSnapshot::from_items(parsed))
}

#[track_caller]
fn parse_item(index: usize, item: &Value) -> Result<MenuItemDescriptor> {
    let map = item
        .as_object()
        .ok_or_else(|| BridgeError::InvalidMenuItem {
            index,
            reason: format!("entry must be a map, got {}", args_type_name(item)),
            location: ErrorLocation::from(Location::caller()),
        })?;

    match map.get("type") {
        Some(Value::String(kind)) if kind == "separator" => {
            return Ok(MenuItemDescriptor::Separator);
        }
        // Any other string is treated as an action entry.
        Some(Value::String(_)) | None => {}
        Some(other) => {
            return Err(BridgeError::InvalidMenuItem {
                index,
                reason: format!("`type` must be a string, got {}", args_type_name(other)),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    }

    Ok(MenuItemDescriptor::Action {
        label: require_str(map, "label", index)?.to_string(),
        enabled: require_bool(map, "enabled", index)?,
        action_id: require_str(map, "id", index)?.to_string(),
    })
}

#[track_caller]
fn require_str<'a>(map: &'a Map<String, Value>, key: &str, index: usize) -> Result<&'a str> {
    match map.get(key) {
        Some(Value::String(value)) => Ok(value),
        Some(other) => Err(BridgeError::InvalidMenuItem {
            index,
            reason: format!("`{key}` must be a string, got {}", args_type_name(other)),
            location: ErrorLocation::from(Location::caller()),
        }),
        None => Err(BridgeError::InvalidMenuItem {
            index,
            reason: format!("missing required field `{key}`"),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

#[track_caller]
fn require_bool(map: &Map<String, Value>, key: &str, index: usize) -> Result<bool> {
    match map.get(key) {
        Some(Value::Bool(value)) => Ok(*value),
        Some(other) => Err(BridgeError::InvalidMenuItem {
            index,
            reason: format!("`{key}` must be a bool, got {}", args_type_name(other)),
            location: ErrorLocation::from(Location::caller()),
        }),
        None => Err(BridgeError::InvalidMenuItem {
            index,
            reason: format!("missing required field `{key}`"),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}
