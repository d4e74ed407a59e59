pub mod equipment;
pub mod rank;
pub mod skills;
pub mod soldier;
pub mod status;
pub mod team;

pub use equipment::{EquipmentCatalog, EquipmentSpec, Inventory};
pub use rank::Rank;
pub use skills::{SkillCategory, SkillSet};
pub use soldier::{Message, Soldier, SoldierReport};
pub use status::SoldierStatus;
pub use team::Team;
