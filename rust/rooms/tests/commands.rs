// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end runs of the room commands against an in-memory document.

use approx::assert_relative_eq;
use nalgebra::Point2;
use planroom_model::{
    Category, ElementId, ElementRepository, MemoryDocument, RoomRepository, TagRepository,
    TagTypeRepository, Transaction, Transactional,
};
use planroom_rooms::{
    generate_rooms, remove_all_rooms, remove_all_tags, run_command, tag_all_rooms,
    CommandOutcome, Error, NumberingOrder, RoomCommand, RoomsConfig,
};

fn rect(x: f64, y: f64, w: f64, h: f64) -> Vec<Point2<f64>> {
    vec![
        Point2::new(x, y),
        Point2::new(x + w, y),
        Point2::new(x + w, y + h),
        Point2::new(x, y + h),
    ]
}

/// Room-tag template plus one level per entry, each with that many 4x4 regions.
fn model(regions_per_level: &[usize]) -> (MemoryDocument, Vec<ElementId>) {
    let mut doc = MemoryDocument::new();
    doc.add_tag_type(Category::RoomTagTypes, "Room Tag", "Name Only");
    let levels = regions_per_level
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let level = doc.add_level(format!("Level {}", i + 1), i as f64 * 3.5, 3.5);
            for r in 0..count {
                doc.add_region(level, rect(r as f64 * 4.0, 0.0, 4.0, 4.0))
                    .unwrap();
            }
            level
        })
        .collect();
    (doc, levels)
}

fn names_on(doc: &MemoryDocument, level: ElementId) -> Vec<String> {
    doc.rooms_on_level(level)
        .into_iter()
        .map(|r| r.name)
        .collect()
}

#[test]
fn three_free_regions_on_one_level() {
    let (mut doc, levels) = model(&[3]);

    let report = generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();
    assert_eq!(report.rooms_created(), 3);
    assert_eq!(names_on(&doc, levels[0]), ["1_1", "1_2", "1_3"]);

    let rerun = generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();
    assert_eq!(rerun.rooms_created(), 0);
    assert_eq!(rerun.occupied_skipped(), 3);
    assert_eq!(doc.rooms().len(), 3);
}

#[test]
fn level_prefix_follows_level_order() {
    let (mut doc, levels) = model(&[2, 1, 0]);

    generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();

    assert_eq!(names_on(&doc, levels[0]), ["1_1", "1_2"]);
    assert_eq!(names_on(&doc, levels[1]), ["2_1"]);
    assert!(names_on(&doc, levels[2]).is_empty());
}

#[test]
fn only_unoccupied_regions_are_numbered() {
    let (mut doc, levels) = model(&[2]);
    generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();
    doc.add_region(levels[0], rect(20.0, 0.0, 2.0, 2.0)).unwrap();

    let report = generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();

    assert_eq!(report.rooms_created(), 1);
    assert_eq!(report.occupied_skipped(), 2);
    let new_room = doc.room(report.levels[0].created[0]).unwrap();
    // Numbering restarts for rooms created in this run.
    assert_eq!(new_room.name, "1_1");
}

#[test]
fn degenerate_region_rolls_back_the_whole_batch() {
    let (mut doc, levels) = model(&[1]);
    doc.add_region(levels[0], vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)])
        .unwrap();

    let err = generate_rooms(&mut doc, &RoomsConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        Error::Host(planroom_model::Error::DegenerateRegion(_))
    ));
    assert!(doc.rooms().is_empty());
    assert_eq!(doc.committed_transactions(), ["Configure room tag type"]);
}

#[test]
fn tagging_renumbers_contiguously() {
    let (mut doc, levels) = model(&[3]);
    let report = generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();
    let middle = report.levels[0].created[1];
    {
        let mut tx = Transaction::start(&mut doc, "Delete middle room").unwrap();
        tx.delete_element(middle).unwrap();
        tx.commit().unwrap();
    }
    assert_eq!(names_on(&doc, levels[0]), ["1_1", "1_3"]);

    let tagging = tag_all_rooms(&mut doc, &RoomsConfig::default()).unwrap();

    assert_eq!(tagging.tags_created(), 2);
    assert_eq!(names_on(&doc, levels[0]), ["1_1", "1_2"]);
    let tags = doc.tags();
    for room in doc.rooms() {
        assert_eq!(tags.iter().filter(|t| t.room == room.id).count(), 1);
    }
}

#[test]
fn zero_area_rooms_are_left_alone() {
    let (mut doc, levels) = model(&[1]);
    generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();
    let lobby = doc
        .place_unbound_room(levels[0], "Lobby", Point2::new(50.0, 50.0))
        .unwrap();

    let report = tag_all_rooms(&mut doc, &RoomsConfig::default()).unwrap();

    assert_eq!(report.tags_created(), 1);
    assert_eq!(report.unplaced_skipped(), 1);
    assert_eq!(doc.room(lobby).unwrap().name, "Lobby");
    assert!(doc.tags().iter().all(|t| t.room != lobby));
}

#[test]
fn tag_sits_on_the_placement_floor() {
    let mut doc = MemoryDocument::new();
    doc.add_tag_type(Category::RoomTagTypes, "Room Tag", "Name Only");
    doc.add_level("Ground", 0.0, 3.0);
    let upper = doc.add_level("Upper", 4.0, 6.0);
    doc.add_region(upper, rect(0.0, 0.0, 8.0, 2.0)).unwrap();
    generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();

    tag_all_rooms(&mut doc, &RoomsConfig::default()).unwrap();

    let room = &doc.rooms()[0];
    let tag = &doc.tags()[0];
    assert_relative_eq!(tag.point.x, 4.0);
    assert_relative_eq!(tag.point.y, 1.0);
    assert_relative_eq!(tag.point.z, room.location.z);
    assert_relative_eq!(tag.point.z, 4.0);
    assert_eq!(room.name, "2_1");
}

#[test]
fn room_removal_is_idempotent() {
    let (mut doc, _) = model(&[2, 2]);
    generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();

    assert_eq!(remove_all_rooms(&mut doc).unwrap(), 4);
    assert_eq!(remove_all_rooms(&mut doc).unwrap(), 0);
    assert!(doc.rooms().is_empty());
    assert!(doc.elements_of(Category::Rooms).is_empty());
}

#[test]
fn tag_removal_keeps_rooms_intact() {
    let (mut doc, _) = model(&[2]);
    generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();
    tag_all_rooms(&mut doc, &RoomsConfig::default()).unwrap();
    let before = doc.rooms();

    assert_eq!(remove_all_tags(&mut doc).unwrap(), 2);

    assert!(doc.tags().is_empty());
    assert_eq!(doc.rooms(), before);
}

#[test]
fn missing_tag_type_fails_without_changes() {
    let mut doc = MemoryDocument::new();
    let level = doc.add_level("Level 1", 0.0, 3.0);
    doc.add_region(level, rect(0.0, 0.0, 4.0, 4.0)).unwrap();

    let outcome = run_command(&mut doc, RoomCommand::GenerateRooms, &RoomsConfig::default());

    assert_eq!(outcome.unwrap(), CommandOutcome::Failed);
    assert!(doc.rooms().is_empty());
    assert_eq!(doc.messages().len(), 1);
    assert_eq!(doc.messages()[0].title, "Room Tag Missing");
    assert!(doc.committed_transactions().is_empty());
}

#[test]
fn tagging_without_template_renames_nothing() {
    let (mut doc, levels) = model(&[1]);
    generate_rooms(&mut doc, &RoomsConfig::default()).unwrap();
    let room = doc.rooms()[0].id;
    let template = doc.tag_types(Category::RoomTagTypes)[0].id;
    {
        let mut tx = Transaction::start(&mut doc, "Edit model").unwrap();
        tx.rename_room(room, "Kitchen").unwrap();
        tx.delete_element(template).unwrap();
        tx.commit().unwrap();
    }

    let outcome = run_command(&mut doc, RoomCommand::TagRooms, &RoomsConfig::default());

    assert_eq!(outcome.unwrap(), CommandOutcome::Failed);
    assert_eq!(names_on(&doc, levels[0]), ["Kitchen"]);
    assert!(doc.tags().is_empty());
    assert_eq!(doc.messages().len(), 1);
}

#[test]
fn centroid_numbering_ignores_host_order() {
    let mut doc = MemoryDocument::new();
    doc.add_tag_type(Category::RoomTagTypes, "Room Tag", "Name Only");
    let level = doc.add_level("Level 1", 0.0, 3.0);
    for x in [10.0, 0.0, 5.0] {
        doc.add_region(level, rect(x, 0.0, 2.0, 2.0)).unwrap();
    }
    let config = RoomsConfig {
        numbering: NumberingOrder::Centroid,
        ..RoomsConfig::default()
    };

    generate_rooms(&mut doc, &config).unwrap();

    let mut rooms = doc.rooms();
    rooms.sort_by(|a, b| a.name.cmp(&b.name));
    let xs: Vec<f64> = rooms.iter().map(|r| r.location.x).collect();
    assert_eq!(
        rooms.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
        ["1_1", "1_2", "1_3"]
    );
    assert_relative_eq!(xs[0], 1.0);
    assert_relative_eq!(xs[1], 6.0);
    assert_relative_eq!(xs[2], 11.0);
}

#[test]
fn every_command_succeeds_on_a_prepared_model() {
    let (mut doc, _) = model(&[2]);
    let config = RoomsConfig::default();

    for command in [
        RoomCommand::ConfigureTagType,
        RoomCommand::GenerateRooms,
        RoomCommand::TagRooms,
        RoomCommand::RemoveTags,
        RoomCommand::RemoveRooms,
    ] {
        assert_eq!(
            run_command(&mut doc, command, &config).unwrap(),
            CommandOutcome::Succeeded,
            "{command}"
        );
    }
    assert!(doc.messages().is_empty());
    let ty = doc.tag_types(Category::RoomTagTypes)[0].id;
    assert!(!doc.type_flag(ty, "Show Area").unwrap());
}

#[test]
fn host_errors_propagate_from_run_command() {
    let (mut doc, levels) = model(&[0]);
    doc.add_region(levels[0], Vec::new()).unwrap();

    let result = run_command(&mut doc, RoomCommand::GenerateRooms, &RoomsConfig::default());
    assert!(matches!(result, Err(Error::Host(_))));
    assert!(doc.active_transaction().is_none());
}

#[test]
fn centroid_numbering_agrees_between_generation_and_tagging() {
    let mut doc = MemoryDocument::new();
    doc.add_tag_type(Category::RoomTagTypes, "Room Tag", "Name Only");
    let level = doc.add_level("Level 1", 0.0, 3.0);
    doc.add_region(level, rect(3.0, 20.0, 2.0, 2.0)).unwrap();
    // L-shape: area centroid x ~ 2.87, bounding box midpoint x = 5.
    doc.add_region(
        level,
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 1.0),
            Point2::new(1.0, 1.0),
            Point2::new(1.0, 10.0),
            Point2::new(0.0, 10.0),
        ],
    )
    .unwrap();
    let config = RoomsConfig {
        numbering: NumberingOrder::Centroid,
        ..RoomsConfig::default()
    };

    generate_rooms(&mut doc, &config).unwrap();
    let named = |doc: &MemoryDocument| {
        let mut rooms: Vec<(String, f64)> =
            doc.rooms().into_iter().map(|r| (r.name, r.area)).collect();
        rooms.sort_by(|a, b| a.0.cmp(&b.0));
        rooms
    };
    let after_generate = named(&doc);
    assert_relative_eq!(after_generate[0].1, 19.0);
    assert_eq!(after_generate[0].0, "1_1");

    tag_all_rooms(&mut doc, &config).unwrap();
    assert_eq!(named(&doc), after_generate);
}

#[test]
fn rooms_with_negative_area_are_tagged() {
    let json = r#"{
        "levels": [ { "id": 0, "name": "Ground", "elevation": 0.0, "height": 3.0 } ],
        "tag_types": [
            { "id": 0, "category": "room_tag_types", "family": "Room Tag", "name": "Standard" }
        ],
        "rooms": [
            { "id": 0, "level": 0, "name": "Neg", "area": -5.0,
              "location": [1,1,0], "bounding_box": [[0,0,0],[2,2,3]] }
        ]
    }"#;
    let mut doc = MemoryDocument::from_json(json).unwrap();

    let report = tag_all_rooms(&mut doc, &RoomsConfig::default()).unwrap();

    assert_eq!(report.tags_created(), 1);
    assert_eq!(doc.rooms()[0].name, "1_1");
}
