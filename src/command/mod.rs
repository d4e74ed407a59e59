//! Command dispatch
//!
//! Every operator action is a [`Command`] value. The shell builds them from
//! prompts; tests build them directly. Free-text enums (rank, status, skill,
//! reward) stay as text here and are parsed on execution so bad values come
//! back as ordinary errors.

pub mod executor;

pub use executor::CommandExecutor;

use crate::core::types::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    // === SOLDIERS ===
    CreateSoldier {
        name: String,
        /// Unknown or missing rank text falls back to Recruit
        rank: Option<String>,
        /// Unknown or missing status text falls back to Active
        status: Option<String>,
        location: Vec2,
    },
    ShowSoldier {
        name: String,
    },
    UpdateSoldierStatus {
        name: String,
        status: String,
    },
    GrantEquipment {
        soldier: String,
        item: String,
        quantity: u32,
    },
    UseEquipment {
        soldier: String,
        item: String,
        quantity: u32,
    },
    AdjustHealth {
        soldier: String,
        delta: i32,
    },
    ImproveSkill {
        soldier: String,
        skill: String,
        amount: u32,
    },
    MoveSoldier {
        soldier: String,
        target: Vec2,
    },
    SendMessage {
        soldier: String,
        message: String,
    },
    ListSoldiers,

    // === TEAMS ===
    CreateTeam {
        name: String,
    },
    AddToTeam {
        team: String,
        soldier: String,
    },
    RemoveFromTeam {
        team: String,
        soldier: String,
    },
    SetCommander {
        team: String,
        soldier: String,
    },
    TeamStatus {
        team: String,
    },
    MoveTeam {
        team: String,
        target: Vec2,
        /// Configured default when absent
        spacing: Option<f32>,
    },
    TeamEquipment {
        team: String,
    },
    DistributeEquipment {
        team: String,
        items: Vec<(String, u32)>,
    },
    TeamSkills {
        team: String,
    },
    Broadcast {
        team: String,
        /// "HQ" when absent
        sender: Option<String>,
        message: String,
    },
    DirectMessage {
        team: String,
        sender: String,
        recipient: String,
        message: String,
    },
    ListTeams,

    // === MISSIONS ===
    CreateMission {
        name: String,
        description: String,
        location: Vec2,
        difficulty: Option<i64>,
    },
    AssignTeam {
        mission: String,
        team: String,
    },
    AddObjective {
        mission: String,
        description: String,
    },
    /// 1-based objective number, as shown in reports
    CompleteObjective {
        mission: String,
        number: usize,
    },
    UpdateMissionStatus {
        mission: String,
        status: String,
    },
    MissionReport {
        mission: String,
    },
    EstimateSuccess {
        mission: String,
    },
    SetDifficulty {
        mission: String,
        level: i64,
    },
    AddReward {
        mission: String,
        kind: String,
        value: u32,
    },
    ListMissions,

    // === SIMULATION ===
    SimulateProgress {
        mission: String,
        /// 0-100; the estimator is used when absent
        chance: Option<f64>,
    },
    AutoComplete {
        mission: String,
    },
    Casualty {
        team: String,
    },
    FieldEvent {
        mission: String,
    },

    // === REPORTS ===
    GlobalStatus,
    SkillOverview,
    SuccessOverview,
    RecentEvents,
    EquipmentSummary,
    PersonnelStatus,
    Snapshot,
}
