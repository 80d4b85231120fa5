// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Capabilities the room automation consumes from the host document.
//!
//! Each entity kind has its own repository trait so callers never need a
//! reflection-style "collect elements of class X" lookup. Mutating methods
//! must be called inside a write transaction; hosts reject them otherwise.

use nalgebra::Point3;

use crate::error::Result;
use crate::keys::{Category, ElementId};
use crate::types::{Circuit, Level, Room, Tag, TagType};

/// Building stories in the host's stable native order.
pub trait LevelRepository {
    fn levels(&self) -> Vec<Level>;
}

/// Plan topology computed by the host from wall geometry.
pub trait PlanTopology {
    /// Enclosed regions on the level, each with its occupancy flag.
    fn circuits(&self, level: ElementId) -> Result<Vec<Circuit>>;
}

/// Category-wide lookup and deletion.
pub trait ElementRepository {
    fn elements_of(&self, category: Category) -> Vec<ElementId>;
    fn delete_element(&mut self, id: ElementId) -> Result<()>;
}

pub trait RoomRepository {
    fn rooms(&self) -> Vec<Room>;

    fn room(&self, id: ElementId) -> Option<Room> {
        self.rooms().into_iter().find(|r| r.id == id)
    }

    fn rooms_on_level(&self, level: ElementId) -> Vec<Room> {
        self.rooms().into_iter().filter(|r| r.level == level).collect()
    }

    /// Creates a room bound to the circuit; the host infers its boundary.
    fn create_room(&mut self, circuit: &Circuit) -> Result<ElementId>;

    fn rename_room(&mut self, id: ElementId, name: &str) -> Result<()>;
}

pub trait TagRepository {
    fn tags(&self) -> Vec<Tag>;

    fn create_tag(
        &mut self,
        room: ElementId,
        point: Point3<f64>,
        tag_type: ElementId,
    ) -> Result<ElementId>;
}

pub trait TagTypeRepository {
    /// Tag templates of the given category, in host order.
    fn tag_types(&self, category: Category) -> Vec<TagType>;

    fn type_flag(&self, tag_type: ElementId, parameter: &str) -> Result<bool>;

    fn set_type_flag(&mut self, tag_type: ElementId, parameter: &str, value: bool) -> Result<()>;
}

/// The host's named write-batch boundary.
///
/// Prefer [`Transaction`](crate::Transaction), which guarantees the batch is
/// closed on every exit path.
pub trait Transactional {
    fn begin_transaction(&mut self, name: &str) -> Result<()>;
    fn commit_transaction(&mut self) -> Result<()>;
    fn rollback_transaction(&mut self) -> Result<()>;
    fn active_transaction(&self) -> Option<&str>;
}

/// User-facing modal messages.
pub trait Notifier {
    fn show_message(&mut self, title: &str, message: &str);
}

/// Everything the room automation needs from a host document.
pub trait Document:
    LevelRepository
    + PlanTopology
    + ElementRepository
    + RoomRepository
    + TagRepository
    + TagTypeRepository
    + Transactional
    + Notifier
{
}

impl<T> Document for T where
    T: LevelRepository
        + PlanTopology
        + ElementRepository
        + RoomRepository
        + TagRepository
        + TagTypeRepository
        + Transactional
        + Notifier
        + ?Sized
{
}
