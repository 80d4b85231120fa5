// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room operation configuration loaded from environment variables.

use serde::{Deserialize, Serialize};

/// Separator used when none is configured.
pub const DEFAULT_NAME_SEPARATOR: &str = "_";

/// Order in which circuits and rooms receive sequence numbers on a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberingOrder {
    /// Whatever order the host enumerates them in.
    #[default]
    Native,
    /// Sorted by planar centroid, x first then y.
    Centroid,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown numbering order \"{0}\" (expected \"native\" or \"centroid\")")]
pub struct UnknownNumberingOrder(pub String);

impl std::str::FromStr for NumberingOrder {
    type Err = UnknownNumberingOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(NumberingOrder::Native),
            "centroid" => Ok(NumberingOrder::Centroid),
            _ => Err(UnknownNumberingOrder(s.to_string())),
        }
    }
}

/// Room operation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomsConfig {
    /// Separator between level number and sequence number in room names.
    pub name_separator: String,
    /// Numbering order within a level.
    pub numbering: NumberingOrder,
}

impl RoomsConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PLANROOM_NAME_SEPARATOR` (default `_`)
    /// - `PLANROOM_NUMBERING`: `native` or `centroid` (default `native`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Missing or invalid values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let numbering = match lookup("PLANROOM_NUMBERING") {
            Some(raw) => raw.parse().unwrap_or_else(|err: UnknownNumberingOrder| {
                tracing::warn!(error = %err, "Falling back to native numbering");
                defaults.numbering
            }),
            None => defaults.numbering,
        };
        Self {
            name_separator: lookup("PLANROOM_NAME_SEPARATOR")
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.name_separator),
            numbering,
        }
    }
}

impl Default for RoomsConfig {
    fn default() -> Self {
        Self {
            name_separator: DEFAULT_NAME_SEPARATOR.into(),
            numbering: NumberingOrder::Native,
        }
    }
}
