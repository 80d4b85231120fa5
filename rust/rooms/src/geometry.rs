// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tag placement geometry.

use nalgebra::{Point2, Point3};
use planroom_model::Room;

/// XY midpoint of the room's bounding volume.
pub fn planar_centroid(room: &Room) -> Point2<f64> {
    let c = room.bounding_box.center();
    Point2::new(c.x, c.y)
}

/// Point at which a room's tag is placed.
///
/// XY comes from the bounding volume, Z from the room's location point. The
/// bounding volume spans the room's full height, so its midpoint would float
/// the tag above the placement floor.
pub fn anchor_point(room: &Room) -> Point3<f64> {
    let c = planar_centroid(room);
    Point3::new(c.x, c.y, room.location.z)
}
