// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host document.
//!
//! [`MemoryDocument`] owns every element in `slotmap` arenas with stable,
//! generational keys. Plan regions are stored per level and their occupancy is
//! derived on demand from room bindings, the way a host recomputes plan
//! topology.
//!
//! ## Transactions
//!
//! Mutations through the repository traits require an open transaction.
//! Beginning one snapshots the document state; rolling back restores the
//! snapshot. The builder methods (`add_level`, `add_region`, ...) populate the
//! model directly, the way loading a file would.

use nalgebra::{Point2, Point3};
use slotmap::SlotMap;

use crate::error::{Error, Result};
use crate::host::{
    ElementRepository, LevelRepository, Notifier, PlanTopology, RoomRepository, TagRepository,
    TagTypeRepository, Transactional,
};
use crate::keys::{Category, ElementId, ElementKey, RegionId, RegionKey};
use crate::parameters::{room_tag_defaults, ParamValue, Parameters};
use crate::polygon;
use crate::types::{BoundingBox, Circuit, Level, Room, Tag, TagType};

/// Default name the host gives a newly created room.
pub const DEFAULT_ROOM_NAME: &str = "Room";

#[derive(Debug, Clone)]
pub(crate) struct LevelData {
    pub name: String,
    pub elevation: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub(crate) struct RegionData {
    pub level: ElementKey,
    pub boundary: Vec<Point2<f64>>,
}

#[derive(Debug, Clone)]
pub(crate) struct RoomData {
    pub level: ElementKey,
    /// `None` for unbound placeholder rooms.
    pub region: Option<RegionKey>,
    pub name: String,
    pub area: f64,
    pub location: Point3<f64>,
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Clone)]
pub(crate) struct TagData {
    pub room: ElementKey,
    pub tag_type: ElementKey,
    pub point: Point3<f64>,
}

#[derive(Debug, Clone)]
pub(crate) struct TagTypeData {
    pub category: Category,
    pub family: String,
    pub name: String,
    pub parameters: Parameters,
}

#[derive(Debug, Clone)]
pub(crate) enum ElementData {
    Level(LevelData),
    Room(RoomData),
    Tag(TagData),
    TagType(TagTypeData),
}

impl ElementData {
    fn category(&self) -> Category {
        match self {
            ElementData::Level(_) => Category::Levels,
            ElementData::Room(_) => Category::Rooms,
            ElementData::Tag(_) => Category::RoomTags,
            ElementData::TagType(t) => t.category,
        }
    }
}

/// Everything a transaction snapshot has to capture.
#[derive(Debug, Clone, Default)]
pub(crate) struct DocumentState {
    pub elements: SlotMap<ElementKey, ElementData>,
    /// Native level order (insertion order).
    pub level_order: Vec<ElementKey>,
    pub regions: SlotMap<RegionKey, RegionData>,
}

#[derive(Debug)]
struct ActiveTransaction {
    name: String,
    snapshot: DocumentState,
}

/// A message shown to the user through [`Notifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage {
    pub title: String,
    pub body: String,
}

/// A complete in-memory [`Document`](crate::Document).
///
/// # Example
///
/// ```
/// use nalgebra::Point2;
/// use planroom_model::{LevelRepository, MemoryDocument, PlanTopology};
///
/// let mut doc = MemoryDocument::new();
/// let level = doc.add_level("Level 1", 0.0, 3.0);
/// doc.add_region(level, vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(4.0, 3.0),
///     Point2::new(0.0, 3.0),
/// ]).unwrap();
///
/// assert_eq!(doc.levels().len(), 1);
/// assert!(!doc.circuits(level).unwrap()[0].has_room);
/// ```
#[derive(Debug, Default)]
pub struct MemoryDocument {
    pub(crate) state: DocumentState,
    transaction: Option<ActiveTransaction>,
    messages: Vec<UserMessage>,
    committed: Vec<String>,
}

impl MemoryDocument {
    /// Creates a new, empty document.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Model population ---

    /// Appends a level to the native level order.
    pub fn add_level(&mut self, name: impl Into<String>, elevation: f64, height: f64) -> ElementId {
        let key = self.state.elements.insert(ElementData::Level(LevelData {
            name: name.into(),
            elevation,
            height,
        }));
        self.state.level_order.push(key);
        key.into()
    }

    /// Adds an enclosed plan region to a level.
    pub fn add_region(&mut self, level: ElementId, boundary: Vec<Point2<f64>>) -> Result<RegionId> {
        let level_key = self.level_key(level)?;
        let key = self.state.regions.insert(RegionData {
            level: level_key,
            boundary,
        });
        Ok(key.into())
    }

    /// Loads a tag template with every sub-label visible.
    pub fn add_tag_type(
        &mut self,
        category: Category,
        family: impl Into<String>,
        name: impl Into<String>,
    ) -> ElementId {
        let key = self.state.elements.insert(ElementData::TagType(TagTypeData {
            category,
            family: family.into(),
            name: name.into(),
            parameters: room_tag_defaults(),
        }));
        key.into()
    }

    /// Places a room that is not bound to any region. Such rooms have no area.
    pub fn place_unbound_room(
        &mut self,
        level: ElementId,
        name: impl Into<String>,
        location: Point2<f64>,
    ) -> Result<ElementId> {
        let level_key = self.level_key(level)?;
        let elevation = self.level_data(level_key)?.elevation;
        let point = Point3::new(location.x, location.y, elevation);
        let key = self.state.elements.insert(ElementData::Room(RoomData {
            level: level_key,
            region: None,
            name: name.into(),
            area: 0.0,
            location: point,
            bounding_box: BoundingBox::from_point(point),
        }));
        Ok(key.into())
    }

    // --- Inspection ---

    /// Messages shown to the user so far.
    pub fn messages(&self) -> &[UserMessage] {
        &self.messages
    }

    /// Drains the recorded user messages.
    pub fn take_messages(&mut self) -> Vec<UserMessage> {
        std::mem::take(&mut self.messages)
    }

    /// Names of committed transactions, oldest first.
    pub fn committed_transactions(&self) -> &[String] {
        &self.committed
    }

    /// Returns the number of elements of any category.
    pub fn element_count(&self) -> usize {
        self.state.elements.len()
    }

    /// Boolean parameters of a tag type, for inspection.
    pub fn tag_type_parameters(&self, tag_type: ElementId) -> Result<&Parameters> {
        match self.state.elements.get(tag_type.into()) {
            Some(ElementData::TagType(t)) => Ok(&t.parameters),
            _ => Err(Error::ElementNotFound(tag_type)),
        }
    }

    // --- Internal helpers ---

    fn require_transaction(&self) -> Result<()> {
        if self.transaction.is_none() {
            return Err(Error::NoActiveTransaction);
        }
        Ok(())
    }

    fn level_key(&self, level: ElementId) -> Result<ElementKey> {
        let key = ElementKey::from(level);
        match self.state.elements.get(key) {
            Some(ElementData::Level(_)) => Ok(key),
            _ => Err(Error::LevelNotFound(level)),
        }
    }

    fn level_data(&self, key: ElementKey) -> Result<&LevelData> {
        match self.state.elements.get(key) {
            Some(ElementData::Level(l)) => Ok(l),
            _ => Err(Error::LevelNotFound(key.into())),
        }
    }

    fn room_key(&self, room: ElementId) -> Result<ElementKey> {
        let key = ElementKey::from(room);
        match self.state.elements.get(key) {
            Some(ElementData::Room(_)) => Ok(key),
            _ => Err(Error::ElementNotFound(room)),
        }
    }

    fn tag_type_data_mut(&mut self, tag_type: ElementId) -> Result<&mut TagTypeData> {
        match self.state.elements.get_mut(tag_type.into()) {
            Some(ElementData::TagType(t)) => Ok(t),
            _ => Err(Error::ElementNotFound(tag_type)),
        }
    }

    fn is_region_occupied(&self, region: RegionKey) -> bool {
        self.state.elements.values().any(|e| match e {
            ElementData::Room(r) => r.region == Some(region),
            _ => false,
        })
    }

    fn room_view(key: ElementKey, data: &RoomData) -> Room {
        Room {
            id: key.into(),
            level: data.level.into(),
            name: data.name.clone(),
            area: data.area,
            location: data.location,
            bounding_box: data.bounding_box,
        }
    }
}

impl LevelRepository for MemoryDocument {
    fn levels(&self) -> Vec<Level> {
        self.state
            .level_order
            .iter()
            .filter_map(|&key| match self.state.elements.get(key) {
                Some(ElementData::Level(l)) => Some(Level {
                    id: key.into(),
                    name: l.name.clone(),
                    elevation: l.elevation,
                    height: l.height,
                }),
                _ => None,
            })
            .collect()
    }
}

impl PlanTopology for MemoryDocument {
    fn circuits(&self, level: ElementId) -> Result<Vec<Circuit>> {
        let level_key = self.level_key(level)?;
        Ok(self
            .state
            .regions
            .iter()
            .filter(|(_, r)| r.level == level_key)
            .map(|(key, r)| Circuit {
                id: key.into(),
                level,
                has_room: self.is_region_occupied(key),
                boundary: r.boundary.clone(),
            })
            .collect())
    }
}

impl ElementRepository for MemoryDocument {
    fn elements_of(&self, category: Category) -> Vec<ElementId> {
        self.state
            .elements
            .iter()
            .filter(|(_, e)| e.category() == category)
            .map(|(key, _)| key.into())
            .collect()
    }

    fn delete_element(&mut self, id: ElementId) -> Result<()> {
        self.require_transaction()?;
        let key = ElementKey::from(id);
        match self.state.elements.remove(key) {
            Some(ElementData::Level(_)) => {
                // Regions and rooms hosted by the level go with it; tags stay.
                self.state.level_order.retain(|&k| k != key);
                self.state.regions.retain(|_, r| r.level != key);
                self.state
                    .elements
                    .retain(|_, e| !matches!(e, ElementData::Room(r) if r.level == key));
                Ok(())
            }
            Some(_) => Ok(()),
            None => Err(Error::ElementNotFound(id)),
        }
    }
}

impl RoomRepository for MemoryDocument {
    fn rooms(&self) -> Vec<Room> {
        self.state
            .elements
            .iter()
            .filter_map(|(key, e)| match e {
                ElementData::Room(r) => Some(Self::room_view(key, r)),
                _ => None,
            })
            .collect()
    }

    fn room(&self, id: ElementId) -> Option<Room> {
        match self.state.elements.get(id.into()) {
            Some(ElementData::Room(r)) => Some(Self::room_view(id.into(), r)),
            _ => None,
        }
    }

    fn create_room(&mut self, circuit: &Circuit) -> Result<ElementId> {
        self.require_transaction()?;

        let region_key = RegionKey::from(circuit.id);
        let region = self
            .state
            .regions
            .get(region_key)
            .ok_or(Error::RegionNotFound(circuit.id))?;
        if self.is_region_occupied(region_key) {
            return Err(Error::RegionOccupied(circuit.id));
        }

        let area = polygon::area(&region.boundary);
        let (min, max) = match polygon::bounds(&region.boundary) {
            Some(b) if region.boundary.len() >= 3 && area > 1e-9 => b,
            _ => return Err(Error::DegenerateRegion(circuit.id)),
        };
        let centroid = polygon::centroid(&region.boundary)
            .ok_or(Error::DegenerateRegion(circuit.id))?;

        let level_key = region.level;
        let level = self.level_data(level_key)?;
        let location = Point3::new(centroid.x, centroid.y, level.elevation);
        let bounding_box = BoundingBox::new(
            Point3::new(min.x, min.y, level.elevation),
            Point3::new(max.x, max.y, level.elevation + level.height),
        );

        let key = self.state.elements.insert(ElementData::Room(RoomData {
            level: level_key,
            region: Some(region_key),
            name: DEFAULT_ROOM_NAME.to_string(),
            area,
            location,
            bounding_box,
        }));
        Ok(key.into())
    }

    fn rename_room(&mut self, id: ElementId, name: &str) -> Result<()> {
        self.require_transaction()?;
        match self.state.elements.get_mut(id.into()) {
            Some(ElementData::Room(r)) => {
                r.name = name.to_string();
                Ok(())
            }
            _ => Err(Error::ElementNotFound(id)),
        }
    }
}

impl TagRepository for MemoryDocument {
    fn tags(&self) -> Vec<Tag> {
        self.state
            .elements
            .iter()
            .filter_map(|(key, e)| match e {
                ElementData::Tag(t) => Some(Tag {
                    id: key.into(),
                    room: t.room.into(),
                    tag_type: t.tag_type.into(),
                    point: t.point,
                }),
                _ => None,
            })
            .collect()
    }

    fn create_tag(
        &mut self,
        room: ElementId,
        point: Point3<f64>,
        tag_type: ElementId,
    ) -> Result<ElementId> {
        self.require_transaction()?;
        let room_key = self.room_key(room)?;
        let type_key = ElementKey::from(tag_type);
        match self.state.elements.get(type_key) {
            Some(ElementData::TagType(t)) if t.category == Category::RoomTagTypes => {}
            _ => return Err(Error::ElementNotFound(tag_type)),
        }

        let key = self.state.elements.insert(ElementData::Tag(TagData {
            room: room_key,
            tag_type: type_key,
            point,
        }));
        Ok(key.into())
    }
}

impl TagTypeRepository for MemoryDocument {
    fn tag_types(&self, category: Category) -> Vec<TagType> {
        self.state
            .elements
            .iter()
            .filter_map(|(key, e)| match e {
                ElementData::TagType(t) if t.category == category => Some(TagType {
                    id: key.into(),
                    family: t.family.clone(),
                    name: t.name.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    fn type_flag(&self, tag_type: ElementId, parameter: &str) -> Result<bool> {
        let params = self.tag_type_parameters(tag_type)?;
        let value = params.get(parameter).ok_or_else(|| Error::ParameterNotFound {
            element: tag_type,
            name: parameter.to_string(),
        })?;
        value.as_bool().ok_or_else(|| Error::ParameterType {
            element: tag_type,
            name: parameter.to_string(),
            expected: "boolean",
        })
    }

    fn set_type_flag(&mut self, tag_type: ElementId, parameter: &str, value: bool) -> Result<()> {
        self.require_transaction()?;
        let data = self.tag_type_data_mut(tag_type)?;
        match data.parameters.get_mut(parameter) {
            Some(ParamValue::Bool(b)) => {
                *b = value;
                Ok(())
            }
            Some(_) => Err(Error::ParameterType {
                element: tag_type,
                name: parameter.to_string(),
                expected: "boolean",
            }),
            None => Err(Error::ParameterNotFound {
                element: tag_type,
                name: parameter.to_string(),
            }),
        }
    }
}

impl Transactional for MemoryDocument {
    fn begin_transaction(&mut self, name: &str) -> Result<()> {
        if let Some(active) = &self.transaction {
            return Err(Error::TransactionAlreadyActive(active.name.clone()));
        }
        self.transaction = Some(ActiveTransaction {
            name: name.to_string(),
            snapshot: self.state.clone(),
        });
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<()> {
        let active = self.transaction.take().ok_or(Error::NoActiveTransaction)?;
        self.committed.push(active.name);
        Ok(())
    }

    fn rollback_transaction(&mut self) -> Result<()> {
        let active = self.transaction.take().ok_or(Error::NoActiveTransaction)?;
        self.state = active.snapshot;
        tracing::debug!(transaction = %active.name, "Restored document snapshot");
        Ok(())
    }

    fn active_transaction(&self) -> Option<&str> {
        self.transaction.as_ref().map(|t| t.name.as_str())
    }
}

impl Notifier for MemoryDocument {
    fn show_message(&mut self, title: &str, message: &str) {
        tracing::info!(title, body = message, "User message");
        self.messages.push(UserMessage {
            title: title.to_string(),
            body: message.to_string(),
        });
    }
}
