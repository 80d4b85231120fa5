// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room renumbering and tag placement.

use planroom_model::{Document, ElementId, Room, Transaction};

use crate::config::RoomsConfig;
use crate::error::Result;
use crate::geometry::anchor_point;
use crate::numbering::{order_rooms, LevelSequence};
use crate::tag_type::ensure_tag_type_ready;

pub const TRANSACTION_NAME: &str = "Tag rooms";

/// Rooms tagged on one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTags {
    pub level: ElementId,
    pub level_index: usize,
    /// `(room, tag)` pairs in numbering order.
    pub tagged: Vec<(ElementId, ElementId)>,
    /// Zero-area rooms left alone.
    pub unplaced: usize,
}

/// Summary of one tagging run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaggingReport {
    pub tag_type: Option<ElementId>,
    pub levels: Vec<LevelTags>,
}

impl TaggingReport {
    pub fn tags_created(&self) -> usize {
        self.levels.iter().map(|l| l.tagged.len()).sum()
    }

    pub fn unplaced_skipped(&self) -> usize {
        self.levels.iter().map(|l| l.unplaced).sum()
    }
}

/// Renumbers every room with a nonzero area and tags it.
///
/// Per level, rooms with area are renamed `"{level}{sep}{n}"` with `n`
/// counting only those rooms, then tagged at their [`anchor_point`]. Rooms
/// without area are neither renamed nor tagged. Everything commits as one
/// batch.
pub fn tag_all_rooms<D: Document + ?Sized>(
    doc: &mut D,
    config: &RoomsConfig,
) -> Result<TaggingReport> {
    let tag_type = ensure_tag_type_ready(doc)?;

    let mut tx = Transaction::start(doc, TRANSACTION_NAME)?;
    let mut report = TaggingReport {
        tag_type: Some(tag_type),
        levels: Vec::new(),
    };

    for (level_index, level) in tx.levels().into_iter().enumerate() {
        let (mut placed, unplaced): (Vec<Room>, Vec<Room>) = tx
            .rooms_on_level(level.id)
            .into_iter()
            .partition(Room::is_placed);
        order_rooms(&mut placed, config.numbering);

        let mut sequence = LevelSequence::new(level_index);
        let mut tagged = Vec::with_capacity(placed.len());
        for room in &placed {
            let name = sequence.next_number().name(&config.name_separator);
            tx.rename_room(room.id, &name)?;
            let tag = tx.create_tag(room.id, anchor_point(room), tag_type)?;
            tagged.push((room.id, tag));
        }

        tracing::debug!(
            level = %level.name,
            level_index,
            tagged = tagged.len(),
            unplaced = unplaced.len(),
            "Tagged rooms on level"
        );

        report.levels.push(LevelTags {
            level: level.id,
            level_index,
            tagged,
            unplaced: unplaced.len(),
        });
    }

    tx.commit()?;

    tracing::info!(
        tags = report.tags_created(),
        skipped = report.unplaced_skipped(),
        "Room tagging committed"
    );
    Ok(report)
}
