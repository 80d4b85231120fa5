// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only views of host elements.
//!
//! These are plain values copied out of the host; mutating them does not
//! touch the document. Changes go through the repository traits.

use nalgebra::{Point2, Point3};

use crate::keys::{ElementId, RegionId};
use crate::polygon;

/// Axis-aligned 3D bounding volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// A zero-extent box around a single point.
    pub fn from_point(p: Point3<f64>) -> Self {
        Self { min: p, max: p }
    }

    /// Midpoint of the min/max corners.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }
}

/// A building story.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: ElementId,
    pub name: String,
    /// Elevation of the story floor.
    pub elevation: f64,
    /// Story height (floor to upper limit of rooms placed on it).
    pub height: f64,
}

/// A closed boundary loop on a level's floor plan.
///
/// Circuits are recomputed by the host on every request and are never
/// stored by callers.
#[derive(Debug, Clone, PartialEq)]
pub struct Circuit {
    pub id: RegionId,
    pub level: ElementId,
    /// Whether a room already occupies this region.
    pub has_room: bool,
    pub boundary: Vec<Point2<f64>>,
}

impl Circuit {
    pub fn centroid(&self) -> Option<Point2<f64>> {
        polygon::centroid(&self.boundary)
    }
}

/// A spatial room element.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: ElementId,
    pub level: ElementId,
    pub name: String,
    /// Host-computed floor area; zero for unbound placeholder rooms.
    pub area: f64,
    /// Placement point; its Z is the elevation of the placement floor.
    pub location: Point3<f64>,
    pub bounding_box: BoundingBox,
}

impl Room {
    /// Returns `true` when the room reports a nonzero area.
    pub fn is_placed(&self) -> bool {
        self.area != 0.0
    }
}

/// A label element bound to one room.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: ElementId,
    pub room: ElementId,
    pub tag_type: ElementId,
    pub point: Point3<f64>,
}

/// A tag template.
#[derive(Debug, Clone, PartialEq)]
pub struct TagType {
    pub id: ElementId,
    pub family: String,
    pub name: String,
}

/// Sub-labels a room tag can render, each driven by one boolean parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagLabel {
    Number,
    Volume,
    Area,
    Name,
}

impl TagLabel {
    /// Name of the boolean type parameter controlling this sub-label.
    pub fn parameter_name(&self) -> &'static str {
        match self {
            TagLabel::Number => "Show Room Number",
            TagLabel::Volume => "Show Volume",
            TagLabel::Area => "Show Area",
            TagLabel::Name => "Show Name",
        }
    }
}
