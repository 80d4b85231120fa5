// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed named parameters attached to tag-type elements.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::types::TagLabel;

/// A typed parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
}

impl ParamValue {
    /// Returns the boolean payload, if this is a boolean parameter.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Named parameters of one element.
pub type Parameters = FxHashMap<String, ParamValue>;

/// Parameters of a freshly loaded room-tag template: every sub-label visible.
pub fn room_tag_defaults() -> Parameters {
    [
        TagLabel::Number,
        TagLabel::Volume,
        TagLabel::Area,
        TagLabel::Name,
    ]
    .into_iter()
    .map(|label| (label.parameter_name().to_string(), ParamValue::Bool(true)))
    .collect()
}
