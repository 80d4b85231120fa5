// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for room operations.

/// Result type alias for room operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No room-tag template is loaded in the document.
    #[error("room-tag template not loaded; load it and retry")]
    MissingRoomTagType,

    /// The host rejected part of the batch; nothing was committed.
    #[error("host error: {0}")]
    Host(#[from] planroom_model::Error),
}
