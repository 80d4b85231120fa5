// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room creation in unoccupied plan circuits.

use planroom_model::{Circuit, Document, ElementId, Transaction};

use crate::config::RoomsConfig;
use crate::error::Result;
use crate::numbering::{order_circuits, LevelSequence};
use crate::tag_type::ensure_tag_type_ready;

pub const TRANSACTION_NAME: &str = "Generate rooms";

/// Rooms created on one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelRooms {
    pub level: ElementId,
    pub level_index: usize,
    /// New rooms in numbering order (`created[i]` is named `..._{i + 1}`).
    pub created: Vec<ElementId>,
    /// Circuits skipped because a room already occupied them.
    pub occupied: usize,
}

/// Summary of one generation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReport {
    pub levels: Vec<LevelRooms>,
}

impl GenerationReport {
    pub fn rooms_created(&self) -> usize {
        self.levels.iter().map(|l| l.created.len()).sum()
    }

    pub fn occupied_skipped(&self) -> usize {
        self.levels.iter().map(|l| l.occupied).sum()
    }
}

/// Creates a room in every unoccupied circuit of every level.
///
/// Rooms are named `"{level}{sep}{n}"` where `level` is the 1-based position of
/// the level and `n` counts only the rooms created on that level in this run.
/// All creations commit as one batch; any host failure rolls the batch back.
pub fn generate_rooms<D: Document + ?Sized>(
    doc: &mut D,
    config: &RoomsConfig,
) -> Result<GenerationReport> {
    ensure_tag_type_ready(doc)?;

    let mut tx = Transaction::start(doc, TRANSACTION_NAME)?;
    let mut report = GenerationReport::default();

    for (level_index, level) in tx.levels().into_iter().enumerate() {
        let (occupied, mut free): (Vec<Circuit>, Vec<Circuit>) = tx
            .circuits(level.id)?
            .into_iter()
            .partition(|c| c.has_room);
        order_circuits(&mut free, config.numbering);

        let mut sequence = LevelSequence::new(level_index);
        let mut created = Vec::with_capacity(free.len());
        for circuit in &free {
            let room = tx.create_room(circuit)?;
            let name = sequence.next_number().name(&config.name_separator);
            tx.rename_room(room, &name)?;
            created.push(room);
        }

        tracing::debug!(
            level = %level.name,
            level_index,
            created = created.len(),
            occupied = occupied.len(),
            "Generated rooms on level"
        );

        report.levels.push(LevelRooms {
            level: level.id,
            level_index,
            created,
            occupied: occupied.len(),
        });
    }

    tx.commit()?;

    tracing::info!(
        levels = report.levels.len(),
        rooms = report.rooms_created(),
        skipped = report.occupied_skipped(),
        "Room generation committed"
    );
    Ok(report)
}
