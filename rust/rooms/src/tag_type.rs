// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room-tag template preparation.

use planroom_model::{Category, Document, ElementId, TagLabel, Transaction};

use crate::error::{Error, Result};

pub const TRANSACTION_NAME: &str = "Configure room tag type";

pub const MISSING_TAG_TYPE_TITLE: &str = "Room Tag Missing";
pub const MISSING_TAG_TYPE_MESSAGE: &str = "room-tag template not loaded; load it and retry";

/// Sub-labels switched off so that tags show the room name only.
const HIDDEN_LABELS: [TagLabel; 3] = [TagLabel::Number, TagLabel::Volume, TagLabel::Area];

/// Makes sure a room-tag template exists and shows only the room name.
///
/// Configures the first room-tag type the host reports, in its own batch,
/// and returns its id. When none is loaded the user is told so, the batch is
/// rolled back and [`Error::MissingRoomTagType`] is returned.
pub fn ensure_tag_type_ready<D: Document + ?Sized>(doc: &mut D) -> Result<ElementId> {
    let mut tx = Transaction::start(doc, TRANSACTION_NAME)?;

    let Some(tag_type) = tx.tag_types(Category::RoomTagTypes).into_iter().next() else {
        tracing::warn!("No room tag type loaded");
        tx.show_message(MISSING_TAG_TYPE_TITLE, MISSING_TAG_TYPE_MESSAGE);
        tx.rollback()?;
        return Err(Error::MissingRoomTagType);
    };

    for label in HIDDEN_LABELS {
        tx.set_type_flag(tag_type.id, label.parameter_name(), false)?;
    }
    tx.commit()?;

    tracing::debug!(
        tag_type = %tag_type.id,
        family = %tag_type.family,
        name = %tag_type.name,
        "Room tag type configured"
    );
    Ok(tag_type.id)
}
