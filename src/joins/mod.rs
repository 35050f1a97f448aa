//! Joins across independently loaded tables

pub mod model;
pub mod skill;

pub use model::{fixed_npc_names, ModelEntry, ModelTable, NameCorrection};
pub use skill::{SkillInfo, SkillTable};
