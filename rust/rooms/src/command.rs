// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User-facing commands and their outcomes.

use std::fmt;
use std::str::FromStr;

use planroom_model::Document;

use crate::config::RoomsConfig;
use crate::error::{Error, Result};
use crate::generator::generate_rooms;
use crate::removal::{remove_all_rooms, remove_all_tags};
use crate::tag_type::ensure_tag_type_ready;
use crate::tagger::tag_all_rooms;

/// A command the user can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoomCommand {
    GenerateRooms,
    RemoveRooms,
    TagRooms,
    RemoveTags,
    ConfigureTagType,
}

impl RoomCommand {
    pub const ALL: [RoomCommand; 5] = [
        RoomCommand::GenerateRooms,
        RoomCommand::RemoveRooms,
        RoomCommand::TagRooms,
        RoomCommand::RemoveTags,
        RoomCommand::ConfigureTagType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomCommand::GenerateRooms => "generate-rooms",
            RoomCommand::RemoveRooms => "remove-rooms",
            RoomCommand::TagRooms => "tag-rooms",
            RoomCommand::RemoveTags => "remove-tags",
            RoomCommand::ConfigureTagType => "configure-tag-type",
        }
    }
}

impl fmt::Display for RoomCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command `{0}`")]
pub struct UnknownCommand(pub String);

impl FromStr for RoomCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// What the invoking mechanism is told after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Succeeded,
    Failed,
}

/// Runs one command against the document.
///
/// A missing room-tag template yields `Ok(CommandOutcome::Failed)`; the user
/// has already been notified by then. Host failures are returned as errors
/// after the batch has rolled back.
pub fn run_command<D: Document + ?Sized>(
    doc: &mut D,
    command: RoomCommand,
    config: &RoomsConfig,
) -> Result<CommandOutcome> {
    let span = tracing::info_span!("command", name = %command);
    let _enter = span.enter();

    let result = match command {
        RoomCommand::GenerateRooms => generate_rooms(doc, config).map(drop),
        RoomCommand::RemoveRooms => remove_all_rooms(doc).map(drop),
        RoomCommand::TagRooms => tag_all_rooms(doc, config).map(drop),
        RoomCommand::RemoveTags => remove_all_tags(doc).map(drop),
        RoomCommand::ConfigureTagType => ensure_tag_type_ready(doc).map(drop),
    };

    match result {
        Ok(()) => Ok(CommandOutcome::Succeeded),
        Err(Error::MissingRoomTagType) => Ok(CommandOutcome::Failed),
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            Err(e)
        }
    }
}
