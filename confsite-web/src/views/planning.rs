//! Planning-view grouping
//!
//! Builds the day → room → talks tree for an event edition. Only talks with
//! a start timestamp contribute a date; only talks with both a room and a
//! start appear in a room list. Every date carries all eight rooms, empty
//! lists included, so the schedule grid stays rectangular.

use crate::views::talks::{speakers_of, TalkDto};
use chrono::{Datelike, NaiveDate};
use confsite_common::db::models::{Room, Talk, User};
use confsite_common::{Language, MarkdownRenderer};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Day → room → talks, ordered chronologically and in room display order
/// (`Room`'s `Ord` follows declaration order)
pub type PlanningTree = BTreeMap<NaiveDate, BTreeMap<Room, Vec<TalkDto>>>;

/// Build the planning tree from the full talk set of one event edition.
///
/// Speakers must be resolved once, in batch, before calling; the grouping
/// itself performs no storage access.
pub fn build_planning(
    talks: &[Talk],
    lang: Language,
    speakers: &HashMap<String, User>,
    markdown: &MarkdownRenderer,
) -> PlanningTree {
    let dates: BTreeSet<NaiveDate> = talks
        .iter()
        .filter_map(|talk| talk.start)
        .map(|start| start.date())
        .collect();

    dates
        .into_iter()
        .map(|date| {
            let rooms = Room::ALL
                .into_iter()
                .map(|room| (room, talks_in_room(talks, date, room, lang, speakers, markdown)))
                .collect();
            (date, rooms)
        })
        .collect()
}

/// Talks of one room on one date, sorted ascending by start time.
/// The sort is stable, so equal start times keep their incoming order.
fn talks_in_room(
    talks: &[Talk],
    date: NaiveDate,
    room: Room,
    lang: Language,
    speakers: &HashMap<String, User>,
    markdown: &MarkdownRenderer,
) -> Vec<TalkDto> {
    let mut scheduled: Vec<&Talk> = talks
        .iter()
        .filter(|talk| talk.room == Some(room))
        .filter(|talk| talk.start.map(|s| s.date()) == Some(date))
        .collect();
    scheduled.sort_by_key(|talk| talk.start);

    scheduled
        .into_iter()
        .map(|talk| TalkDto::project(talk, lang, speakers_of(talk, speakers), markdown))
        .collect()
}

/// Day label used by the schedule template, e.g. `J1` for the 1st
pub fn day_label(date: NaiveDate) -> String {
    format!("J{}", date.day())
}

/// One day of the schedule, shaped for template rendering
#[derive(Debug, Serialize)]
pub struct PlanningDay {
    pub label: String,
    pub date: NaiveDate,
    pub rooms: Vec<PlanningRoom>,
}

/// One room column of a schedule day
#[derive(Debug, Serialize)]
pub struct PlanningRoom {
    pub name: String,
    /// Localization key, e.g. `rooms.amphi1`
    pub key: String,
    pub talks: Vec<TalkDto>,
}

/// Flatten the tree into the ordered day list the template iterates
pub fn planning_days(tree: PlanningTree) -> Vec<PlanningDay> {
    tree.into_iter()
        .map(|(date, rooms)| PlanningDay {
            label: day_label(date),
            date,
            rooms: rooms
                .into_iter()
                .map(|(room, talks)| PlanningRoom {
                    name: room.name().to_string(),
                    key: room.locale_key(),
                    talks,
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use confsite_common::db::models::TalkFormat;

    fn ts(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2017, 6, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn scheduled_talk(id: i64, slug: &str, room: Option<Room>, start: Option<NaiveDateTime>) -> Talk {
        Talk {
            id,
            slug: slug.to_string(),
            event: "confsite17".to_string(),
            title: slug.to_string(),
            summary: String::new(),
            description: None,
            format: TalkFormat::Talk,
            speaker_ids: vec![],
            language: Language::En,
            added_at: ts(1, 0, 0),
            video: None,
            topic: None,
            room,
            start,
            end: start.map(|s| s + chrono::Duration::minutes(45)),
        }
    }

    fn build(talks: &[Talk]) -> PlanningTree {
        build_planning(talks, Language::En, &HashMap::new(), &MarkdownRenderer::new())
    }

    #[test]
    fn test_unscheduled_talk_never_appears() {
        let talks = vec![scheduled_talk(1, "unscheduled", None, None)];
        let tree = build(&talks);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_scheduled_talk_appears_exactly_once() {
        let talks = vec![scheduled_talk(1, "keynote", Some(Room::Amphi1), Some(ts(1, 9, 0)))];
        let tree = build(&talks);

        let date = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
        assert_eq!(tree.len(), 1);

        let rooms = &tree[&date];
        let occurrences: usize = rooms.values().map(|list| list.len()).sum();
        assert_eq!(occurrences, 1);
        assert_eq!(rooms[&Room::Amphi1][0].slug, "keynote");
    }

    #[test]
    fn test_every_room_present_even_when_empty() {
        let talks = vec![scheduled_talk(1, "keynote", Some(Room::Amphi1), Some(ts(1, 9, 0)))];
        let tree = build(&talks);

        let date = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
        let rooms = &tree[&date];
        assert_eq!(rooms.len(), Room::ALL.len());
        assert!(rooms[&Room::Room6].is_empty());
    }

    #[test]
    fn test_room_lists_sorted_by_start_time() {
        // inserted out of order: 10:00 before 09:00
        let talks = vec![
            scheduled_talk(1, "late", Some(Room::Room1), Some(ts(1, 10, 0))),
            scheduled_talk(2, "early", Some(Room::Room1), Some(ts(1, 9, 0))),
        ];
        let tree = build(&talks);

        let date = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
        let slugs: Vec<&str> = tree[&date][&Room::Room1]
            .iter()
            .map(|dto| dto.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["early", "late"]);
    }

    #[test]
    fn test_equal_start_times_keep_incoming_order() {
        let talks = vec![
            scheduled_talk(1, "first", Some(Room::Room2), Some(ts(1, 9, 0))),
            scheduled_talk(2, "second", Some(Room::Room2), Some(ts(1, 9, 0))),
        ];
        let tree = build(&talks);

        let date = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
        let slugs: Vec<&str> = tree[&date][&Room::Room2]
            .iter()
            .map(|dto| dto.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["first", "second"]);
    }

    #[test]
    fn test_roomless_talk_still_contributes_its_date() {
        // start set but no room: the date shows up with empty room lists
        let talks = vec![scheduled_talk(1, "roomless", None, Some(ts(2, 14, 0)))];
        let tree = build(&talks);

        let date = NaiveDate::from_ymd_opt(2017, 6, 2).unwrap();
        let rooms = &tree[&date];
        assert_eq!(rooms.len(), Room::ALL.len());
        assert!(rooms.values().all(|list| list.is_empty()));
    }

    #[test]
    fn test_days_ordered_chronologically() {
        let talks = vec![
            scheduled_talk(1, "day-two", Some(Room::Amphi1), Some(ts(2, 9, 0))),
            scheduled_talk(2, "day-one", Some(Room::Amphi1), Some(ts(1, 9, 0))),
        ];
        let days = planning_days(build(&talks));

        let labels: Vec<&str> = days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["J1", "J2"]);
    }

    #[test]
    fn test_planning_days_room_display_order() {
        let talks = vec![scheduled_talk(1, "keynote", Some(Room::Amphi1), Some(ts(1, 9, 0)))];
        let days = planning_days(build(&talks));

        let names: Vec<&str> = days[0].rooms.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["amphi1", "amphi2", "room1", "room2", "room3", "room4", "room5", "room6"]
        );
        assert_eq!(days[0].rooms[0].key, "rooms.amphi1");
    }
}
