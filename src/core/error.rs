use thiserror::Error;

#[derive(Error, Debug)]
pub enum GarrisonError {
    #[error("Soldier '{0}' not found")]
    SoldierNotFound(String),

    #[error("Team '{0}' not found")]
    TeamNotFound(String),

    #[error("Mission '{0}' not found")]
    MissionNotFound(String),

    #[error("Unknown record id: {0}")]
    UnknownId(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid skill: {0}")]
    InvalidSkill(String),

    #[error("Invalid reward kind: {0}")]
    InvalidReward(String),

    #[error("Invalid difficulty {0} (expected 1-10)")]
    InvalidDifficulty(i64),

    #[error("Not enough {item}: requested {requested}, available {available}")]
    InsufficientEquipment {
        item: String,
        requested: u32,
        available: u32,
    },

    #[error("Equipment '{0}' is not in the catalog")]
    UnknownEquipment(String),

    #[error("{soldier} is not a member of team {team}")]
    NotATeamMember { soldier: String, team: String },

    #[error("{soldier} is already a member of team {team}")]
    AlreadyMember { soldier: String, team: String },

    #[error("Team {team} is already assigned to mission {mission}")]
    AlreadyAssigned { team: String, mission: String },

    #[error("Team {0} has no members")]
    EmptyTeam(String),

    #[error("Team {0} has no active members")]
    NoActiveMembers(String),

    #[error("Invalid objective number {number} (mission has {count})")]
    ObjectiveOutOfRange { number: usize, count: usize },

    #[error("Mission {mission} is already closed with status {status}")]
    MissionClosed { mission: String, status: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Input stream closed")]
    InputClosed,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GarrisonError>;
