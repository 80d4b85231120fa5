// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types raised by the host document.

use crate::keys::{ElementId, RegionId};

/// Result type alias for host document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors the host document can raise while reading or mutating the model.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced element does not exist (or is not of the expected kind).
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),

    /// A referenced level does not exist.
    #[error("level not found: {0}")]
    LevelNotFound(ElementId),

    /// A referenced plan region does not exist.
    #[error("plan region not found: {0}")]
    RegionNotFound(RegionId),

    /// The region boundary cannot enclose a room.
    #[error("plan region {0} is degenerate and cannot hold a room")]
    DegenerateRegion(RegionId),

    /// A room is already bound to the region.
    #[error("plan region {0} is already occupied by a room")]
    RegionOccupied(RegionId),

    /// The document was mutated outside of a write transaction.
    #[error("no active transaction; modifications require an open transaction")]
    NoActiveTransaction,

    /// A transaction was started while another one is still open.
    #[error("transaction \"{0}\" is still active")]
    TransactionAlreadyActive(String),

    /// The named parameter does not exist on the element.
    #[error("parameter \"{name}\" not found on element {element}")]
    ParameterNotFound { element: ElementId, name: String },

    /// The named parameter exists but holds a different value type.
    #[error("parameter \"{name}\" on element {element} is not a {expected}")]
    ParameterType {
        element: ElementId,
        name: String,
        expected: &'static str,
    },

    /// Snapshot serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
