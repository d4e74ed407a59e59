//! Interactive menu shell
//!
//! Generic over its input and output streams so a whole session can be
//! scripted with an in-memory cursor. Menu choices are turned into
//! [`Command`]s and handed to the [`CommandExecutor`]; errors are printed and
//! the operator is returned to the menu. End of input ends the session
//! cleanly.

use std::io::{BufRead, Write};
use std::str::FromStr;
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};

use crate::command::{Command, CommandExecutor};
use crate::core::error::{GarrisonError, Result};
use crate::core::types::Vec2;
use crate::entity::status::SoldierStatus;
use crate::mission::MissionStatus;
use crate::simulation::Simulator;

#[derive(Debug, Clone, Copy)]
pub struct ShellOptions {
    /// Clear the terminal before each menu
    pub clear_screen: bool,
    /// Wait for Enter after each action
    pub pause_after_action: bool,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            clear_screen: true,
            pause_after_action: true,
        }
    }
}

/// Outcome of reading a submenu choice
enum Selection {
    Run(Command),
    /// Action finished without a command (e.g. bad entry already reported)
    Done,
    Back,
}

const MAIN_MENU: &[&str] = &[
    "Soldier management",
    "Team management",
    "Mission management",
    "Simulation management",
    "Reports",
    "Exit",
];

const SOLDIER_MENU: &[&str] = &[
    "Create new soldier",
    "View soldier details",
    "Update soldier status",
    "Add equipment to soldier",
    "Update soldier health",
    "List all soldiers",
    "Use soldier equipment",
    "Improve soldier skill",
    "Move soldier",
    "Send message as soldier",
];

const TEAM_MENU: &[&str] = &[
    "Create new team",
    "Add soldier to team",
    "Assign team commander",
    "View team status",
    "Move team",
    "Generate equipment report",
    "Distribute equipment",
    "List all teams",
    "Remove soldier from team",
    "Broadcast message to team",
    "Send direct message",
    "Generate skill report",
];

const MISSION_MENU: &[&str] = &[
    "Create new mission",
    "Add team to mission",
    "Add objective to mission",
    "Complete objective",
    "Change mission status",
    "View mission report",
    "Calculate success probability",
    "Set mission difficulty",
    "List all missions",
    "Add mission reward",
];

const SIMULATION_MENU: &[&str] = &[
    "Simulate mission progress",
    "Auto-complete mission",
    "Generate casualty event",
    "Generate random event",
];

const REPORTS_MENU: &[&str] = &[
    "Global status report",
    "Team skill assessment",
    "Mission success probabilities",
    "Recent events log",
    "Equipment summary",
    "Personnel status",
    "Roster snapshot (JSON)",
];

pub struct Shell<R: BufRead, W: Write> {
    sim: Simulator,
    input: R,
    output: W,
    options: ShellOptions,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(sim: Simulator, input: R, output: W, options: ShellOptions) -> Self {
        Self {
            sim,
            input,
            output,
            options,
        }
    }

    pub fn simulator(&self) -> &Simulator {
        &self.sim
    }

    pub fn into_parts(self) -> (Simulator, W) {
        (self.sim, self.output)
    }

    /// Run the main menu until Exit or end of input
    pub fn run(&mut self) -> Result<()> {
        match self.main_loop() {
            Err(GarrisonError::InputClosed) => {
                tracing::debug!("Input closed; ending session");
                writeln!(self.output)?;
                Ok(())
            }
            other => other,
        }
    }

    fn main_loop(&mut self) -> Result<()> {
        loop {
            self.clear()?;
            self.show_menu("MILITARY SIMULATOR", MAIN_MENU, false)?;
            let choice = self.ask(&format!("\nEnter your choice (1-{}): ", MAIN_MENU.len()))?;

            match choice.as_str() {
                "1" => self.submenu("SOLDIER MANAGEMENT", SOLDIER_MENU, Self::soldier_selection)?,
                "2" => self.submenu("TEAM MANAGEMENT", TEAM_MENU, Self::team_selection)?,
                "3" => self.submenu("MISSION MANAGEMENT", MISSION_MENU, Self::mission_selection)?,
                "4" => self.submenu(
                    "SIMULATION MANAGEMENT",
                    SIMULATION_MENU,
                    Self::simulation_selection,
                )?,
                "5" => self.submenu("REPORTS", REPORTS_MENU, Self::report_selection)?,
                "6" => {
                    writeln!(self.output, "Exiting simulator...")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice")?,
            }
        }
    }

    fn submenu(
        &mut self,
        title: &str,
        items: &[&str],
        select: fn(&mut Self, &str) -> Result<Selection>,
    ) -> Result<()> {
        self.clear()?;
        self.show_menu(title, items, true)?;
        let choice = self.ask(&format!("\nEnter your choice (0-{}): ", items.len()))?;

        match select(self, choice.as_str()) {
            Ok(Selection::Run(command)) => self.dispatch(&command)?,
            Ok(Selection::Done) => {}
            Ok(Selection::Back) => return Ok(()),
            Err(GarrisonError::InputClosed) => return Err(GarrisonError::InputClosed),
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        self.pause()
    }

    fn dispatch(&mut self, command: &Command) -> Result<()> {
        match CommandExecutor::execute(&mut self.sim, command) {
            Ok(text) => {
                let pace = self.sim.config.auto_complete_pause_ms;
                if matches!(command, Command::AutoComplete { .. }) && pace > 0 {
                    for line in text.lines() {
                        writeln!(self.output, "{}", line)?;
                        self.output.flush()?;
                        if line.starts_with("Objective completed") {
                            thread::sleep(Duration::from_millis(pace));
                        }
                    }
                } else {
                    writeln!(self.output, "{}", text.trim_end())?;
                }
            }
            Err(e) => {
                tracing::debug!("Command failed: {}", e);
                writeln!(self.output, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    // === MENUS ===

    fn soldier_selection(&mut self, choice: &str) -> Result<Selection> {
        let command = match choice {
            "1" => {
                let name = self.ask("Enter soldier name: ")?;
                let rank = self.ask("Enter soldier rank (default: Recruit): ")?;
                let status = self.ask("Enter status (Active/Wounded/Unavailable, default: Active): ")?;
                Command::CreateSoldier {
                    name,
                    rank: non_empty(rank),
                    status: non_empty(status),
                    location: Vec2::default(),
                }
            }
            "2" => Command::ShowSoldier {
                name: self.ask("Enter soldier name: ")?,
            },
            "3" => {
                let name = self.ask("Enter soldier name: ")?;
                let id = self.sim.registry.require_soldier(&name)?;
                if let Some(s) = self.sim.registry.soldier(id) {
                    writeln!(self.output, "Current status: {}", s.status())?;
                }
                let options: Vec<String> = SoldierStatus::ALL.iter().map(|s| s.to_string()).collect();
                let status = self.ask(&format!("Enter new status ({}): ", options.join("/")))?;
                Command::UpdateSoldierStatus { name, status }
            }
            "4" => {
                let soldier = self.ask("Enter soldier name: ")?;
                self.sim.registry.require_soldier(&soldier)?;
                self.show_catalog()?;
                let item = self.ask("Enter equipment to add: ")?;
                self.sim.registry.catalog().resolve(&item)?;
                let quantity = self.ask_number("Enter quantity: ")?;
                Command::GrantEquipment {
                    soldier,
                    item,
                    quantity,
                }
            }
            "5" => {
                let soldier = self.ask("Enter soldier name: ")?;
                let id = self.sim.registry.require_soldier(&soldier)?;
                if let Some(s) = self.sim.registry.soldier(id) {
                    writeln!(self.output, "Current health: {}", s.health())?;
                }
                let delta =
                    self.ask_number("Enter health change (positive to heal, negative for damage): ")?;
                Command::AdjustHealth { soldier, delta }
            }
            "6" => Command::ListSoldiers,
            "7" => {
                let soldier = self.ask("Enter soldier name: ")?;
                let item = self.ask("Enter equipment to use: ")?;
                let quantity = self.ask_number("Enter quantity: ")?;
                Command::UseEquipment {
                    soldier,
                    item,
                    quantity,
                }
            }
            "8" => {
                let soldier = self.ask("Enter soldier name: ")?;
                let skill = self.ask("Enter skill (Combat/Medical/Recon/Leadership): ")?;
                let amount = self.ask_optional("Enter amount (default: 1): ")?.unwrap_or(1);
                Command::ImproveSkill {
                    soldier,
                    skill,
                    amount,
                }
            }
            "9" => {
                let soldier = self.ask("Enter soldier name: ")?;
                let target = self.ask_point()?;
                Command::MoveSoldier { soldier, target }
            }
            "10" => {
                let soldier = self.ask("Enter soldier name: ")?;
                let message = self.ask("Enter message: ")?;
                Command::SendMessage { soldier, message }
            }
            "0" => return Ok(Selection::Back),
            _ => return self.invalid_choice(),
        };
        Ok(Selection::Run(command))
    }

    fn team_selection(&mut self, choice: &str) -> Result<Selection> {
        let command = match choice {
            "1" => Command::CreateTeam {
                name: self.ask("Enter team name: ")?,
            },
            "2" => {
                let team = self.ask("Enter team name: ")?;
                self.sim.registry.require_team(&team)?;
                let soldier = self.ask("Enter soldier name to add: ")?;
                Command::AddToTeam { team, soldier }
            }
            "3" => {
                let team = self.ask("Enter team name: ")?;
                self.show_members(&team)?;
                let soldier = self.ask("Enter soldier name to appoint as commander: ")?;
                Command::SetCommander { team, soldier }
            }
            "4" => Command::TeamStatus {
                team: self.ask("Enter team name: ")?,
            },
            "5" => {
                let team = self.ask("Enter team name: ")?;
                self.sim.registry.require_team(&team)?;
                let target = self.ask_point()?;
                let spacing = self.ask_optional(&format!(
                    "Enter formation spacing (default: {}): ",
                    self.sim.config.default_formation_spacing
                ))?;
                Command::MoveTeam {
                    team,
                    target,
                    spacing,
                }
            }
            "6" => Command::TeamEquipment {
                team: self.ask("Enter team name: ")?,
            },
            "7" => {
                let team = self.ask("Enter team name: ")?;
                self.sim.registry.require_team(&team)?;
                self.show_catalog()?;
                let items = self.ask_equipment_list()?;
                if items.is_empty() {
                    writeln!(self.output, "Nothing to distribute")?;
                    return Ok(Selection::Done);
                }
                Command::DistributeEquipment { team, items }
            }
            "8" => Command::ListTeams,
            "9" => {
                let team = self.ask("Enter team name: ")?;
                self.show_members(&team)?;
                let soldier = self.ask("Enter soldier name to remove: ")?;
                Command::RemoveFromTeam { team, soldier }
            }
            "10" => {
                let team = self.ask("Enter team name: ")?;
                let message = self.ask("Enter message: ")?;
                let sender = self.ask("Enter sender (default: HQ): ")?;
                Command::Broadcast {
                    team,
                    sender: non_empty(sender),
                    message,
                }
            }
            "11" => {
                let team = self.ask("Enter team name: ")?;
                let sender = self.ask("Enter sender: ")?;
                let recipient = self.ask("Enter recipient name: ")?;
                let message = self.ask("Enter message: ")?;
                Command::DirectMessage {
                    team,
                    sender,
                    recipient,
                    message,
                }
            }
            "12" => Command::TeamSkills {
                team: self.ask("Enter team name: ")?,
            },
            "0" => return Ok(Selection::Back),
            _ => return self.invalid_choice(),
        };
        Ok(Selection::Run(command))
    }

    fn mission_selection(&mut self, choice: &str) -> Result<Selection> {
        let command = match choice {
            "1" => {
                let name = self.ask("Enter mission name: ")?;
                let description = self.ask("Enter mission description: ")?;
                let location = self.ask_point()?;
                let difficulty = self.ask("Enter mission difficulty (1-10, default: 1): ")?;
                let difficulty = match non_empty(difficulty) {
                    Some(text) => match text.parse::<i64>() {
                        Ok(level) => Some(level),
                        Err(_) => {
                            writeln!(self.output, "Invalid difficulty, using default")?;
                            None
                        }
                    },
                    None => None,
                };
                Command::CreateMission {
                    name,
                    description,
                    location,
                    difficulty,
                }
            }
            "2" => {
                let mission = self.ask("Enter mission name: ")?;
                self.sim.registry.require_mission(&mission)?;
                let team = self.ask("Enter team name to add: ")?;
                Command::AssignTeam { mission, team }
            }
            "3" => {
                let mission = self.ask("Enter mission name: ")?;
                self.sim.registry.require_mission(&mission)?;
                let description = self.ask("Enter objective description: ")?;
                Command::AddObjective {
                    mission,
                    description,
                }
            }
            "4" => {
                let mission = self.ask("Enter mission name: ")?;
                let id = self.sim.registry.require_mission(&mission)?;
                if let Some(m) = self.sim.registry.mission(id) {
                    writeln!(self.output, "Current objectives:")?;
                    for (i, objective) in m.objectives().iter().enumerate() {
                        writeln!(
                            self.output,
                            "{}. {} {}",
                            i + 1,
                            objective.mark(),
                            objective.description
                        )?;
                    }
                }
                let number = self.ask_number("Enter objective number to complete: ")?;
                Command::CompleteObjective { mission, number }
            }
            "5" => {
                let mission = self.ask("Enter mission name: ")?;
                let id = self.sim.registry.require_mission(&mission)?;
                if let Some(m) = self.sim.registry.mission(id) {
                    writeln!(self.output, "Current status: {}", m.status())?;
                }
                let options: Vec<String> = MissionStatus::ALL.iter().map(|s| s.to_string()).collect();
                writeln!(self.output, "Available statuses: {}", options.join(", "))?;
                let status = self.ask("Enter new status: ")?;
                Command::UpdateMissionStatus { mission, status }
            }
            "6" => Command::MissionReport {
                mission: self.ask("Enter mission name: ")?,
            },
            "7" => Command::EstimateSuccess {
                mission: self.ask("Enter mission name: ")?,
            },
            "8" => {
                let mission = self.ask("Enter mission name: ")?;
                self.sim.registry.require_mission(&mission)?;
                let level = self.ask_number("Enter difficulty level (1-10): ")?;
                Command::SetDifficulty { mission, level }
            }
            "9" => Command::ListMissions,
            "10" => {
                let mission = self.ask("Enter mission name: ")?;
                self.sim.registry.require_mission(&mission)?;
                let kind = self.ask("Enter reward kind (Experience/Commendation/Supplies): ")?;
                let value = self.ask_number("Enter reward value: ")?;
                Command::AddReward {
                    mission,
                    kind,
                    value,
                }
            }
            "0" => return Ok(Selection::Back),
            _ => return self.invalid_choice(),
        };
        Ok(Selection::Run(command))
    }

    fn simulation_selection(&mut self, choice: &str) -> Result<Selection> {
        let command = match choice {
            "1" => {
                let mission = self.ask("Enter mission name: ")?;
                self.sim.registry.require_mission(&mission)?;
                let chance =
                    self.ask_optional("Enter success chance 0-100 (blank to estimate): ")?;
                Command::SimulateProgress { mission, chance }
            }
            "2" => Command::AutoComplete {
                mission: self.ask("Enter mission name: ")?,
            },
            "3" => Command::Casualty {
                team: self.ask("Enter team name: ")?,
            },
            "4" => Command::FieldEvent {
                mission: self.ask("Enter mission name: ")?,
            },
            "0" => return Ok(Selection::Back),
            _ => return self.invalid_choice(),
        };
        Ok(Selection::Run(command))
    }

    fn report_selection(&mut self, choice: &str) -> Result<Selection> {
        let command = match choice {
            "1" => Command::GlobalStatus,
            "2" => Command::SkillOverview,
            "3" => Command::SuccessOverview,
            "4" => Command::RecentEvents,
            "5" => Command::EquipmentSummary,
            "6" => Command::PersonnelStatus,
            "7" => Command::Snapshot,
            "0" => return Ok(Selection::Back),
            _ => return self.invalid_choice(),
        };
        Ok(Selection::Run(command))
    }

    // === HELPERS ===

    fn invalid_choice(&mut self) -> Result<Selection> {
        writeln!(self.output, "Invalid choice")?;
        Ok(Selection::Done)
    }

    fn show_menu(&mut self, title: &str, items: &[&str], with_back: bool) -> Result<()> {
        writeln!(self.output, "\n===== {} =====", title)?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, item)?;
        }
        if with_back {
            writeln!(self.output, "0. Return to main menu")?;
        }
        Ok(())
    }

    fn show_catalog(&mut self) -> Result<()> {
        writeln!(self.output, "Available equipment:")?;
        for spec in self.sim.registry.catalog().specs() {
            writeln!(self.output, "- {}", spec.name)?;
        }
        Ok(())
    }

    fn show_members(&mut self, team: &str) -> Result<()> {
        let id = self.sim.registry.require_team(team)?;
        let reg = &self.sim.registry;
        let Some(team) = reg.team(id) else {
            return Ok(());
        };
        writeln!(self.output, "Current team members:")?;
        for (i, s) in team
            .members()
            .iter()
            .filter_map(|&m| reg.soldier(m))
            .enumerate()
        {
            writeln!(self.output, "{}. {}", i + 1, s)?;
        }
        Ok(())
    }

    /// Read item/quantity pairs until "done" or a blank line
    fn ask_equipment_list(&mut self) -> Result<Vec<(String, u32)>> {
        let mut items: Vec<(String, u32)> = Vec::new();
        loop {
            let item = self.ask("Enter equipment to distribute (or 'done' to finish): ")?;
            if item.is_empty() || item.eq_ignore_ascii_case("done") {
                return Ok(items);
            }
            let name = match self.sim.registry.catalog().resolve(&item) {
                Ok(name) => name.to_string(),
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    continue;
                }
            };
            match self.ask_number::<u32>("Enter quantity: ") {
                Ok(quantity) => match items.iter_mut().find(|(n, _)| *n == name) {
                    Some(entry) => entry.1 = quantity,
                    None => items.push((name, quantity)),
                },
                Err(GarrisonError::InputClosed) => return Err(GarrisonError::InputClosed),
                Err(e) => writeln!(self.output, "Error: {}", e)?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(GarrisonError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn ask_number<T: FromStr>(&mut self, prompt: &str) -> Result<T> {
        let text = self.ask(prompt)?;
        parse_number(&text)
    }

    /// Blank input is `None`
    fn ask_optional<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        let text = self.ask(prompt)?;
        if text.is_empty() {
            return Ok(None);
        }
        parse_number(&text).map(Some)
    }

    fn ask_point(&mut self) -> Result<Vec2> {
        let x = self.ask_number("Enter x coordinate: ")?;
        let y = self.ask_number("Enter y coordinate: ")?;
        Ok(Vec2::new(x, y))
    }

    fn pause(&mut self) -> Result<()> {
        if self.options.pause_after_action {
            self.ask("\nPress Enter to continue...")?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        if self.options.clear_screen {
            execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn parse_number<T: FromStr>(text: &str) -> Result<T> {
    text.trim()
        .parse()
        .map_err(|_| GarrisonError::InvalidInput(format!("'{}' is not a valid number", text.trim())))
}
