// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-level room numbering.
//!
//! Within one level and one operation, numbers run `1..=k` without gaps. The
//! displayed level number is the level's 0-based position in the host's level
//! order plus one.

use std::cmp::Ordering;

use nalgebra::Point2;
use planroom_model::{Circuit, Room};

use crate::config::{NumberingOrder, DEFAULT_NAME_SEPARATOR};

/// A room's position in the numbering of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomNumber {
    /// 0-based position of the level in the host's level order.
    pub level_index: usize,
    /// 1-based sequence number within the level.
    pub sequence: usize,
}

impl RoomNumber {
    /// Room name with the given separator, e.g. `"2_5"`.
    pub fn name(&self, separator: &str) -> String {
        format!("{}{}{}", self.level_index + 1, separator, self.sequence)
    }
}

/// Always uses [`DEFAULT_NAME_SEPARATOR`]; use [`RoomNumber::name`] for a
/// configured separator.
impl std::fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name(DEFAULT_NAME_SEPARATOR))
    }
}

/// Hands out contiguous sequence numbers for one level.
#[derive(Debug, Clone)]
pub struct LevelSequence {
    level_index: usize,
    issued: usize,
}

impl LevelSequence {
    pub fn new(level_index: usize) -> Self {
        Self {
            level_index,
            issued: 0,
        }
    }

    /// Issues the next number; the first call returns sequence 1.
    pub fn next_number(&mut self) -> RoomNumber {
        self.issued += 1;
        RoomNumber {
            level_index: self.level_index,
            sequence: self.issued,
        }
    }

    /// Count of numbers issued so far.
    pub fn issued(&self) -> usize {
        self.issued
    }
}

fn compare_points(a: Option<Point2<f64>>, b: Option<Point2<f64>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Arranges circuits in numbering order. The sort is stable, so ties keep
/// their host order.
pub fn order_circuits(circuits: &mut [Circuit], order: NumberingOrder) {
    if order == NumberingOrder::Centroid {
        circuits.sort_by_cached_key(|c| OrderKey(c.centroid()));
    }
}

/// Arranges rooms in numbering order. The sort is stable, so ties keep their
/// host order.
///
/// Rooms are keyed by their location point, which hosts place at the area
/// centroid of the bound region, so a room sorts where its circuit did.
pub fn order_rooms(rooms: &mut [Room], order: NumberingOrder) {
    if order == NumberingOrder::Centroid {
        rooms.sort_by_cached_key(|r| OrderKey(Some(r.location.xy())));
    }
}

/// Total order over optional points, missing points last.
#[derive(Debug, Clone, Copy)]
struct OrderKey(Option<Point2<f64>>);

impl PartialEq for OrderKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderKey {}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_points(self.0, other.0)
    }
}
