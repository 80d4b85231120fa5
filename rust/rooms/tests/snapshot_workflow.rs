// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use planroom_model::{Category, MemoryDocument, RoomRepository, TagRepository, TagTypeRepository};
use planroom_rooms::{run_command, CommandOutcome, RoomCommand, RoomsConfig};

const MODEL: &str = r#"{
    "levels": [
        { "id": 0, "name": "Ground", "elevation": 0.0, "height": 3.0,
          "regions": [
            { "id": 0, "boundary": [[0,0],[5,0],[5,4],[0,4]] },
            { "id": 1, "boundary": [[5,0],[9,0],[9,4],[5,4]] }
          ] },
        { "id": 1, "name": "First", "elevation": 3.0, "height": 3.0,
          "regions": [
            { "id": 2, "boundary": [[0,0],[9,0],[9,4],[0,4]] }
          ] }
    ],
    "tag_types": [
        { "id": 0, "category": "room_tag_types", "family": "Room Tag", "name": "Standard" }
    ]
}"#;

#[test]
fn commands_survive_a_save_and_reload() {
    let config = RoomsConfig::default();
    let mut doc = MemoryDocument::from_json(MODEL).unwrap();

    for command in [RoomCommand::GenerateRooms, RoomCommand::TagRooms] {
        assert_eq!(
            run_command(&mut doc, command, &config).unwrap(),
            CommandOutcome::Succeeded
        );
        let json = doc.to_json().unwrap();
        doc = MemoryDocument::from_json(&json).unwrap();
    }

    let mut names: Vec<String> = doc.rooms().into_iter().map(|r| r.name).collect();
    names.sort();
    assert_eq!(names, ["1_1", "1_2", "2_1"]);
    assert_eq!(doc.tags().len(), 3);

    let ty = doc.tag_types(Category::RoomTagTypes)[0].id;
    assert!(!doc.type_flag(ty, "Show Room Number").unwrap());
    assert!(doc.type_flag(ty, "Show Name").unwrap());

    // Regions stay occupied after reload.
    assert_eq!(
        run_command(&mut doc, RoomCommand::GenerateRooms, &config).unwrap(),
        CommandOutcome::Succeeded
    );
    assert_eq!(doc.rooms().len(), 3);
}
