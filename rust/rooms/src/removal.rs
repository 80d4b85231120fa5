// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bulk deletion of rooms and room tags.

use planroom_model::{Category, Document, Transaction};

use crate::error::Result;

pub const REMOVE_ROOMS_TRANSACTION: &str = "Remove rooms";
pub const REMOVE_TAGS_TRANSACTION: &str = "Remove room tags";

/// Deletes every room, regardless of level or area. Returns the count removed.
pub fn remove_all_rooms<D: Document + ?Sized>(doc: &mut D) -> Result<usize> {
    remove_category(doc, Category::Rooms, REMOVE_ROOMS_TRANSACTION)
}

/// Deletes every room tag; rooms are untouched. Returns the count removed.
pub fn remove_all_tags<D: Document + ?Sized>(doc: &mut D) -> Result<usize> {
    remove_category(doc, Category::RoomTags, REMOVE_TAGS_TRANSACTION)
}

fn remove_category<D: Document + ?Sized>(
    doc: &mut D,
    category: Category,
    transaction: &str,
) -> Result<usize> {
    let mut tx = Transaction::start(doc, transaction)?;

    let ids = tx.elements_of(category);
    for &id in &ids {
        tx.delete_element(id)?;
    }
    tx.commit()?;

    tracing::info!(category = %category, removed = ids.len(), "Elements removed");
    Ok(ids.len())
}
