// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Planroom Model
//!
//! Host-side view of a BIM floor-plan document.
//!
//! The host application owns levels, plan topology, rooms, tags and tag
//! types. This crate describes what the room automation needs from it as a
//! set of typed repository traits ([`LevelRepository`], [`PlanTopology`],
//! [`RoomRepository`], [`TagRepository`], [`TagTypeRepository`],
//! [`ElementRepository`]) plus a write-batch boundary ([`Transactional`])
//! wrapped by the scoped [`Transaction`] guard.
//!
//! [`MemoryDocument`] is a complete in-memory host: arena storage with stable
//! keys, snapshot-based rollback, and JSON round-tripping.

pub mod document;
pub mod error;
pub mod host;
pub mod keys;
pub mod parameters;
pub mod polygon;
pub mod serialization;
pub mod transaction;
pub mod types;

pub use document::{MemoryDocument, UserMessage};
pub use error::{Error, Result};
pub use host::{
    Document, ElementRepository, LevelRepository, Notifier, PlanTopology, RoomRepository,
    TagRepository, TagTypeRepository, Transactional,
};
pub use keys::{Category, ElementId, RegionId};
pub use parameters::{ParamValue, Parameters};
pub use transaction::Transaction;
pub use types::{BoundingBox, Circuit, Level, Room, Tag, TagLabel, TagType};
