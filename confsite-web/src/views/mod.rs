//! View-assembly pipeline
//!
//! Converts raw talk + speaker records into presentation DTOs and groups
//! them for the planning view. DTOs are built per request and never
//! persisted.

pub mod planning;
pub mod talks;

pub use planning::{build_planning, planning_days, PlanningDay, PlanningRoom, PlanningTree};
pub use talks::{project_all, resolve_speakers, speakers_of, SpeakerDto, TalkDto};
