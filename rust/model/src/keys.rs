// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element identities and categories.
//!
//! Hosts identify elements by opaque integers. [`MemoryDocument`] stores its
//! elements in `slotmap` arenas and exposes the generational keys through the
//! same integer form, so an id stays valid (and unique) after other elements
//! are removed.
//!
//! [`MemoryDocument`]: crate::MemoryDocument

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, Key, KeyData};

new_key_type! {
    /// Arena key for any element stored in the document.
    pub struct ElementKey;

    /// Arena key for a plan region (circuit) on a level.
    pub struct RegionKey;
}

/// Host identity of an element (level, room, tag, tag type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Host identity of a plan region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "region#{}", self.0)
    }
}

impl From<ElementKey> for ElementId {
    fn from(k: ElementKey) -> Self {
        ElementId(k.data().as_ffi())
    }
}

impl From<ElementId> for ElementKey {
    fn from(id: ElementId) -> Self {
        KeyData::from_ffi(id.0).into()
    }
}

impl From<RegionKey> for RegionId {
    fn from(k: RegionKey) -> Self {
        RegionId(k.data().as_ffi())
    }
}

impl From<RegionId> for RegionKey {
    fn from(id: RegionId) -> Self {
        KeyData::from_ffi(id.0).into()
    }
}

/// Element classification used for bulk lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Levels,
    Rooms,
    RoomTags,
    RoomTagTypes,
    DoorTagTypes,
}

impl Category {
    /// Returns the category name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Levels => "Levels",
            Category::Rooms => "Rooms",
            Category::RoomTags => "Room Tags",
            Category::RoomTagTypes => "Room Tag Types",
            Category::DoorTagTypes => "Door Tag Types",
        }
    }

    /// Returns `true` for categories that hold tag templates.
    pub fn is_tag_type(&self) -> bool {
        matches!(self, Category::RoomTagTypes | Category::DoorTagTypes)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
