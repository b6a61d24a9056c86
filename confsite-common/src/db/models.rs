//! Domain models

use crate::locale::Language;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conference edition, keyed by a short identifier such as `confsite17`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub year: i32,
}

/// Registered user; speakers are referenced by login from talks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub firstname: String,
    pub lastname: String,
    pub company: Option<String>,
    pub photo_url: Option<String>,
    /// Profile text, Markdown
    pub description: Option<String>,
}

/// Talk presentation format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalkFormat {
    Talk,
    LightningTalk,
    Workshop,
    Keynote,
    Random,
}

impl TalkFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            TalkFormat::Talk => "talk",
            TalkFormat::LightningTalk => "lightning_talk",
            TalkFormat::Workshop => "workshop",
            TalkFormat::Keynote => "keynote",
            TalkFormat::Random => "random",
        }
    }
}

impl std::str::FromStr for TalkFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "talk" => Ok(TalkFormat::Talk),
            "lightning_talk" => Ok(TalkFormat::LightningTalk),
            "workshop" => Ok(TalkFormat::Workshop),
            "keynote" => Ok(TalkFormat::Keynote),
            "random" => Ok(TalkFormat::Random),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown talk format: {}",
                other
            ))),
        }
    }
}

/// The eight physical rooms, in fixed display order.
///
/// Both the planning grouping and the `rooms.<name>` localization keys are
/// derived from this single enumeration. `Ord` follows declaration order, so
/// sorted collections keyed by `Room` iterate in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Room {
    Amphi1,
    Amphi2,
    Room1,
    Room2,
    Room3,
    Room4,
    Room5,
    Room6,
}

impl Room {
    /// All rooms, in display order
    pub const ALL: [Room; 8] = [
        Room::Amphi1,
        Room::Amphi2,
        Room::Room1,
        Room::Room2,
        Room::Room3,
        Room::Room4,
        Room::Room5,
        Room::Room6,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Room::Amphi1 => "amphi1",
            Room::Amphi2 => "amphi2",
            Room::Room1 => "room1",
            Room::Room2 => "room2",
            Room::Room3 => "room3",
            Room::Room4 => "room4",
            Room::Room5 => "room5",
            Room::Room6 => "room6",
        }
    }

    /// Template localization key, e.g. `rooms.amphi1`
    pub fn locale_key(self) -> String {
        format!("rooms.{}", self.name())
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Room {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Room::ALL
            .into_iter()
            .find(|room| room.name() == s)
            .ok_or_else(|| crate::Error::InvalidInput(format!("Unknown room: {}", s)))
    }
}

/// A scheduled conference presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Talk {
    pub id: i64,
    pub slug: String,
    /// Owning event edition id
    pub event: String,
    pub title: String,
    /// Markdown; empty string when the talk has no summary yet
    pub summary: String,
    /// Markdown
    pub description: Option<String>,
    pub format: TalkFormat,
    /// Speaker logins; unresolvable logins are dropped at projection time
    pub speaker_ids: Vec<String>,
    pub language: Language,
    pub added_at: NaiveDateTime,
    pub video: Option<String>,
    pub topic: Option<String>,
    /// When set, `start` and `end` are expected to be set as well;
    /// talks without a start never appear in the planning view
    pub room: Option<Room>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}
