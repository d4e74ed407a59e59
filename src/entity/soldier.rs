//! Individual soldier records

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::Result;
use crate::core::log::EventLog;
use crate::core::types::{SoldierId, Vec2};
use crate::entity::equipment::Inventory;
use crate::entity::rank::Rank;
use crate::entity::skills::{SkillCategory, SkillSet};
use crate::entity::status::SoldierStatus;
use crate::simulation::constants::MAX_HEALTH;

/// A message delivered to a soldier's mailbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub body: String,
    pub received_at: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Soldier {
    pub id: SoldierId,
    pub name: String,
    rank: Rank,
    status: SoldierStatus,
    location: Vec2,
    health: u8,
    equipment: Inventory,
    skills: SkillSet,
    experience: u32,
    /// Label of the mission this soldier was last sent on
    assignment: Option<String>,
    history: EventLog,
    mailbox: Vec<Message>,
}

impl Soldier {
    pub fn new(id: SoldierId, name: &str, rank: Rank, status: SoldierStatus, location: Vec2) -> Self {
        let mut soldier = Self {
            id,
            name: name.to_string(),
            rank,
            status,
            location,
            health: MAX_HEALTH,
            equipment: Inventory::new(),
            skills: SkillSet::default(),
            experience: 0,
            assignment: None,
            history: EventLog::new(),
            mailbox: Vec::new(),
        };
        soldier.log_event(format!("Soldier created with rank {}", rank));
        soldier
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn status(&self) -> SoldierStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn location(&self) -> Vec2 {
        self.location
    }

    pub fn health(&self) -> u8 {
        self.health
    }

    pub fn equipment(&self) -> &Inventory {
        &self.equipment
    }

    pub fn skills(&self) -> &SkillSet {
        &self.skills
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn assignment(&self) -> Option<&str> {
        self.assignment.as_deref()
    }

    pub fn history(&self) -> &EventLog {
        &self.history
    }

    pub fn mailbox(&self) -> &[Message] {
        &self.mailbox
    }

    /// Set a new status, returning the previous one
    pub fn update_status(&mut self, new_status: SoldierStatus) -> SoldierStatus {
        let old = self.status;
        self.status = new_status;
        self.log_event(format!("Status updated from {} to {}", old, new_status));
        old
    }

    /// Move to a new location, returning the distance covered
    pub fn update_location(&mut self, new_location: Vec2) -> f32 {
        let distance = self.location.distance(&new_location);
        self.location = new_location;
        self.log_event(format!(
            "Location updated to {} (moved {:.2} units)",
            new_location, distance
        ));
        distance
    }

    /// Compose an outgoing message line
    pub fn send_message(&mut self, message: &str) -> String {
        self.log_event(format!("Sent message: {}", message));
        format!("{} {} sends: {}", self.rank, self.name, message)
    }

    pub fn receive_message(&mut self, sender: &str, message: &str) {
        self.mailbox.push(Message {
            sender: sender.to_string(),
            body: message.to_string(),
            received_at: Local::now(),
        });
        self.log_event(format!("Received message from {}", sender));
    }

    pub fn assign_mission(&mut self, label: &str) {
        self.assignment = Some(label.to_string());
        self.log_event(format!("Assigned to mission: {}", label));
    }

    /// Apply a health delta, clamped to 0..=100
    ///
    /// Dropping to zero forces the soldier to `Wounded`, whatever the
    /// previous status.
    pub fn update_health(&mut self, delta: i32) -> u8 {
        let old = self.health;
        let new = (old as i32).saturating_add(delta).clamp(0, MAX_HEALTH as i32) as u8;
        self.health = new;

        if new == 0 {
            self.status = SoldierStatus::Wounded;
            self.log_event("Wounded and in need of medical attention!");
        }

        self.log_event(format!("Health changed from {} to {}", old, new));
        new
    }

    pub fn add_equipment(&mut self, item: &str, quantity: u32) {
        self.equipment.add(item, quantity);
        self.log_event(format!("Received {} {}", quantity, item));
    }

    pub fn use_equipment(&mut self, item: &str, quantity: u32) -> Result<()> {
        match self.equipment.take(item, quantity) {
            Ok(()) => {
                self.log_event(format!("Used {} {}", quantity, item));
                Ok(())
            }
            Err(e) => {
                self.log_event(format!("Not enough {}", item));
                Err(e)
            }
        }
    }

    /// Add experience and check for promotion
    ///
    /// At most one rank is gained per call, however large the grant.
    /// Returns the new rank when a promotion happened.
    pub fn gain_experience(&mut self, amount: u32) -> Option<Rank> {
        self.experience = self.experience.saturating_add(amount);
        self.log_event(format!("Gained {} experience points", amount));

        if self.experience < self.rank.promotion_threshold() {
            return None;
        }
        let next = self.rank.next()?;
        self.rank = next;
        self.log_event(format!("Promoted to {}", next));
        tracing::info!("{} promoted to {}", self.name, next);
        Some(next)
    }

    pub fn improve_skill(&mut self, category: SkillCategory, amount: u32) {
        self.skills.improve(category, amount);
        self.log_event(format!("Skill {} improved by {}", category, amount));
    }

    /// Append to the history, prefixed with the current rank and name
    pub fn log_event(&mut self, description: impl AsRef<str>) {
        let text = format!("{} {} - {}", self.rank, self.name, description.as_ref());
        self.history.push(text);
    }

    /// Field summary used by the details report and the JSON snapshot
    pub fn report(&self) -> SoldierReport {
        SoldierReport {
            name: self.name.clone(),
            rank: self.rank,
            status: self.status,
            location: self.location,
            health: self.health,
            equipment: self
                .equipment
                .sorted()
                .into_iter()
                .map(|(item, qty)| (item.to_string(), qty))
                .collect(),
            assignment: self.assignment.clone(),
            experience: self.experience,
            skills: self.skills,
        }
    }
}

impl fmt::Display for Soldier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, Health: {}%)",
            self.rank, self.name, self.status, self.health
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SoldierReport {
    pub name: String,
    pub rank: Rank,
    pub status: SoldierStatus,
    pub location: Vec2,
    pub health: u8,
    pub equipment: Vec<(String, u32)>,
    pub assignment: Option<String>,
    pub experience: u32,
    pub skills: SkillSet,
}
