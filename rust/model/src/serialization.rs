// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshots of a [`MemoryDocument`].
//!
//! Arena keys are mapped to sequential integer ids per element kind so the
//! format is portable and can be written by hand. Transaction state and user
//! messages are not part of a snapshot.

use std::collections::BTreeMap;

use nalgebra::{Point2, Point3};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use slotmap::Key;

use crate::document::{
    DocumentState, ElementData, LevelData, MemoryDocument, RegionData, RoomData, TagData,
    TagTypeData,
};
use crate::error::{Error, Result};
use crate::keys::{Category, ElementKey, RegionKey};
use crate::parameters::{room_tag_defaults, ParamValue};
use crate::types::BoundingBox;

/// Serializable representation of a whole document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub levels: Vec<LevelSnapshot>,
    #[serde(default)]
    pub tag_types: Vec<TagTypeSnapshot>,
    #[serde(default)]
    pub rooms: Vec<RoomSnapshot>,
    #[serde(default)]
    pub tags: Vec<TagSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LevelSnapshot {
    pub id: usize,
    pub name: String,
    pub elevation: f64,
    pub height: f64,
    #[serde(default)]
    pub regions: Vec<RegionSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegionSnapshot {
    pub id: usize,
    pub boundary: Vec<[f64; 2]>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub id: usize,
    pub level: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<usize>,
    pub name: String,
    pub area: f64,
    pub location: [f64; 3],
    /// `[min, max]` corners.
    pub bounding_box: [[f64; 3]; 2],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagTypeSnapshot {
    pub id: usize,
    pub category: Category,
    pub family: String,
    pub name: String,
    /// Empty means "as loaded": every sub-label visible.
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamValue>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagSnapshot {
    pub id: usize,
    /// `None` when the tagged room has been deleted.
    pub room: Option<usize>,
    pub tag_type: usize,
    pub point: [f64; 3],
}

fn point3(p: &Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

fn from_point3(p: [f64; 3]) -> Point3<f64> {
    Point3::new(p[0], p[1], p[2])
}

impl MemoryDocument {
    /// Serializes the document to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot();
        serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserializes a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: DocumentSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(snapshot)
    }

    /// Creates a serializable snapshot of the current document state.
    pub fn to_snapshot(&self) -> DocumentSnapshot {
        let state = &self.state;

        let mut level_ids: FxHashMap<ElementKey, usize> = FxHashMap::default();
        let mut region_ids: FxHashMap<RegionKey, usize> = FxHashMap::default();
        let mut room_ids: FxHashMap<ElementKey, usize> = FxHashMap::default();
        let mut type_ids: FxHashMap<ElementKey, usize> = FxHashMap::default();

        let mut levels = Vec::new();
        for &key in &state.level_order {
            let Some(ElementData::Level(l)) = state.elements.get(key) else {
                continue;
            };
            let id = levels.len();
            level_ids.insert(key, id);

            let regions = state
                .regions
                .iter()
                .filter(|(_, r)| r.level == key)
                .map(|(rk, r)| {
                    let rid = region_ids.len();
                    region_ids.insert(rk, rid);
                    RegionSnapshot {
                        id: rid,
                        boundary: r.boundary.iter().map(|p| [p.x, p.y]).collect(),
                    }
                })
                .collect();

            levels.push(LevelSnapshot {
                id,
                name: l.name.clone(),
                elevation: l.elevation,
                height: l.height,
                regions,
            });
        }

        let mut tag_types = Vec::new();
        for (key, e) in &state.elements {
            if let ElementData::TagType(t) = e {
                let id = tag_types.len();
                type_ids.insert(key, id);
                tag_types.push(TagTypeSnapshot {
                    id,
                    category: t.category,
                    family: t.family.clone(),
                    name: t.name.clone(),
                    parameters: t
                        .parameters
                        .iter()
                        .map(|(k, v)| (k.clone(), v.clone()))
                        .collect(),
                });
            }
        }

        let mut rooms = Vec::new();
        for (key, e) in &state.elements {
            let ElementData::Room(r) = e else { continue };
            let Some(&level) = level_ids.get(&r.level) else {
                continue;
            };
            let id = rooms.len();
            room_ids.insert(key, id);
            rooms.push(RoomSnapshot {
                id,
                level,
                region: r.region.and_then(|rk| region_ids.get(&rk).copied()),
                name: r.name.clone(),
                area: r.area,
                location: point3(&r.location),
                bounding_box: [point3(&r.bounding_box.min), point3(&r.bounding_box.max)],
            });
        }

        let tags = state
            .elements
            .values()
            .filter_map(|e| match e {
                ElementData::Tag(t) => Some(t),
                _ => None,
            })
            .filter_map(|t| {
                let tag_type = *type_ids.get(&t.tag_type)?;
                Some((t, tag_type))
            })
            .enumerate()
            .map(|(id, (t, tag_type))| TagSnapshot {
                id,
                room: room_ids.get(&t.room).copied(),
                tag_type,
                point: point3(&t.point),
            })
            .collect();

        DocumentSnapshot {
            levels,
            tag_types,
            rooms,
            tags,
        }
    }

    /// Rebuilds a document from a snapshot, validating every reference.
    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Result<Self> {
        let mut state = DocumentState::default();

        let mut level_keys: FxHashMap<usize, ElementKey> = FxHashMap::default();
        let mut region_keys: FxHashMap<usize, RegionKey> = FxHashMap::default();
        let mut room_keys: FxHashMap<usize, ElementKey> = FxHashMap::default();
        let mut type_keys: FxHashMap<usize, ElementKey> = FxHashMap::default();

        for level in snapshot.levels {
            let key = state.elements.insert(ElementData::Level(LevelData {
                name: level.name,
                elevation: level.elevation,
                height: level.height,
            }));
            if level_keys.insert(level.id, key).is_some() {
                return Err(Error::Serialization(format!("duplicate level id {}", level.id)));
            }
            state.level_order.push(key);

            for region in level.regions {
                let rk = state.regions.insert(RegionData {
                    level: key,
                    boundary: region
                        .boundary
                        .iter()
                        .map(|p| Point2::new(p[0], p[1]))
                        .collect(),
                });
                if region_keys.insert(region.id, rk).is_some() {
                    return Err(Error::Serialization(format!(
                        "duplicate region id {}",
                        region.id
                    )));
                }
            }
        }

        for ty in snapshot.tag_types {
            if !ty.category.is_tag_type() {
                return Err(Error::Serialization(format!(
                    "tag type {} has non-tag category {}",
                    ty.id, ty.category
                )));
            }
            let parameters = if ty.parameters.is_empty() {
                room_tag_defaults()
            } else {
                ty.parameters.into_iter().collect()
            };
            let key = state.elements.insert(ElementData::TagType(TagTypeData {
                category: ty.category,
                family: ty.family,
                name: ty.name,
                parameters,
            }));
            if type_keys.insert(ty.id, key).is_some() {
                return Err(Error::Serialization(format!("duplicate tag type id {}", ty.id)));
            }
        }

        for room in snapshot.rooms {
            let level = *level_keys.get(&room.level).ok_or_else(|| {
                Error::Serialization(format!(
                    "room {} references unknown level {}",
                    room.id, room.level
                ))
            })?;
            let region = match room.region {
                Some(rid) => Some(*region_keys.get(&rid).ok_or_else(|| {
                    Error::Serialization(format!(
                        "room {} references unknown region {}",
                        room.id, rid
                    ))
                })?),
                None => None,
            };
            if !room.area.is_finite() {
                return Err(Error::Serialization(format!(
                    "room {} has non-finite area {}",
                    room.id, room.area
                )));
            }
            let key = state.elements.insert(ElementData::Room(RoomData {
                level,
                region,
                name: room.name,
                area: room.area,
                location: from_point3(room.location),
                bounding_box: BoundingBox::new(
                    from_point3(room.bounding_box[0]),
                    from_point3(room.bounding_box[1]),
                ),
            }));
            if room_keys.insert(room.id, key).is_some() {
                return Err(Error::Serialization(format!("duplicate room id {}", room.id)));
            }
        }

        for tag in snapshot.tags {
            let tag_type = *type_keys.get(&tag.tag_type).ok_or_else(|| {
                Error::Serialization(format!(
                    "tag {} references unknown tag type {}",
                    tag.id, tag.tag_type
                ))
            })?;
            let room = match tag.room {
                Some(rid) => *room_keys.get(&rid).ok_or_else(|| {
                    Error::Serialization(format!("tag {} references unknown room {}", tag.id, rid))
                })?,
                None => ElementKey::null(),
            };
            state.elements.insert(ElementData::Tag(TagData {
                room,
                tag_type,
                point: from_point3(tag.point),
            }));
        }

        let mut doc = MemoryDocument::new();
        doc.state = state;
        Ok(doc)
    }
}
