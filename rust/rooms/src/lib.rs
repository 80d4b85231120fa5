// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Planroom Rooms
//!
//! Room automation over a BIM host document:
//!
//! 1. **Generate rooms**: create a room in every unoccupied plan circuit and
//!    name it `"{level}_{sequence}"`.
//! 2. **Remove rooms**: delete every room.
//! 3. **Tag rooms**: renumber every room with a nonzero area and place a tag at
//!    its anchor point.
//! 4. **Remove tags**: delete every room tag.
//!
//! Each operation runs as one atomic batch on the host. Generation and tagging
//! first make sure a room-tag template is loaded and configured to show only
//! the room name; without one they fail before touching any room.
//!
//! # Usage
//!
//! ```rust,ignore
//! use planroom_rooms::{run_command, CommandOutcome, RoomCommand, RoomsConfig};
//!
//! let outcome = run_command(&mut document, RoomCommand::TagRooms, &RoomsConfig::from_env())?;
//! assert_eq!(outcome, CommandOutcome::Succeeded);
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod numbering;
pub mod removal;
pub mod tag_type;
pub mod tagger;

pub use command::{run_command, CommandOutcome, RoomCommand, UnknownCommand};
pub use config::{NumberingOrder, RoomsConfig};
pub use error::{Error, Result};
pub use generator::{generate_rooms, GenerationReport, LevelRooms};
pub use geometry::{anchor_point, planar_centroid};
pub use numbering::{LevelSequence, RoomNumber};
pub use removal::{remove_all_rooms, remove_all_tags};
pub use tag_type::ensure_tag_type_ready;
pub use tagger::{tag_all_rooms, LevelTags, TaggingReport};
