//! Identity types shared by every record kind.
//!
//! A record is identified across the whole load order by a [`FormKey`]: the
//! plugin that first defined it plus a 24-bit local id. Later plugins that
//! redefine the record reuse the same key, which is what lets the resolver
//! group layered definitions of "the same thing".

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::PatchError;

// ---------------------------------------------------------------------------
// Plugin identity
// ---------------------------------------------------------------------------

/// File name of a plugin in the load order (`Skyrim.esm`, `Patch.esp`).
///
/// Plugin names are case-insensitive, so equality and hashing fold ASCII case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModKey(String);

impl ModKey {
    /// Create a mod key from a plugin file name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The plugin file name as given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl PartialEq for ModKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for ModKey {}

impl std::hash::Hash for ModKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl PartialOrd for ModKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let a = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let b = other.0.bytes().map(|b| b.to_ascii_lowercase());
        a.cmp(b)
    }
}

impl fmt::Display for ModKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Record identity
// ---------------------------------------------------------------------------

/// Largest local id representable in a form id.
pub const MAX_LOCAL_ID: u32 = 0x00FF_FFFF;

/// Stable identifier of a logical record across all plugins.
///
/// Text form is `012EB7:Skyrim.esm` (six hex digits, colon, plugin name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormKey {
    /// Plugin that originally defined the record.
    pub plugin: ModKey,
    /// 24-bit id local to that plugin.
    pub id: u32,
}

impl FormKey {
    /// Create a form key. The id is masked to 24 bits.
    #[must_use]
    pub fn new(plugin: ModKey, id: u32) -> Self {
        Self {
            plugin,
            id: id & MAX_LOCAL_ID,
        }
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}:{}", self.id, self.plugin)
    }
}

impl FromStr for FormKey {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, plugin) = s
            .split_once(':')
            .ok_or_else(|| PatchError::InvalidFormKey(s.to_string()))?;
        if plugin.trim().is_empty() {
            return Err(PatchError::InvalidFormKey(s.to_string()));
        }
        let id = u32::from_str_radix(id.trim(), 16)
            .map_err(|_| PatchError::InvalidFormKey(s.to_string()))?;
        if id > MAX_LOCAL_ID {
            return Err(PatchError::InvalidFormKey(s.to_string()));
        }
        Ok(Self::new(ModKey::new(plugin.trim()), id))
    }
}

impl Serialize for FormKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for FormKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Load order position
// ---------------------------------------------------------------------------

/// Position of a plugin in the load order. Higher wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Priority(pub usize);

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Case-insensitive substring test used by every editor-id rule.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}
