//! Quest Content Module
//!
//! Quest templates loaded from TOML, plus an in-memory quest log and player
//! for hosts that do not bring their own.

pub mod definition;
pub mod player;
pub mod registry;
pub mod state;

pub use definition::{Objective, QuestTemplate};
pub use player::{MemoryBattleground, MemoryPlayer};
pub use registry::QuestTemplateRegistry;
pub use state::{ObjectiveProgress, PlayerQuestState, QuestProgress, QuestStatus};
