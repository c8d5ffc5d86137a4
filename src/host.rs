//! Host Collaborators
//!
//! The battleground, player and quest content objects are owned by the game
//! server. This module only reads and mutates them through these traits.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ids::{CreditTrigger, QuestId};
use crate::quest::QuestTemplate;

/// Battleground side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamId {
    Alliance,
    Horde,
    Neutral,
}

impl TeamId {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamId::Alliance => "alliance",
            TeamId::Horde => "horde",
            TeamId::Neutral => "neutral",
        }
    }
}

/// Flags passed through to the host when rewarding a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewardFlags {
    /// Skip the reward announcement and level-up side effects
    pub suppress_announce: bool,
    /// Reward even if the host's turn-in requirements are not met
    pub bypass_requirements: bool,
}

impl RewardFlags {
    /// Flags used for marker quests granted and completed in one step
    pub const MARKER: RewardFlags = RewardFlags {
        suppress_announce: true,
        bypass_requirements: true,
    };
}

/// A finished battleground or arena instance
pub trait Battleground {
    fn is_arena(&self) -> bool;

    /// Arena type value as reported by the host (1, 2, 3, 4 = solo 3v3, 5)
    fn arena_type(&self) -> u8;
}

/// A connected participant
pub trait Player {
    fn name(&self) -> &str;

    /// Side the player fought on in this battleground
    fn bg_team(&self) -> TeamId;

    fn is_spectator(&self) -> bool;

    /// Whether the quest is currently in the player's quest log
    fn has_quest(&self, quest: QuestId) -> bool;

    /// Signal a kill-credit trigger to the player's active objectives
    fn killed_monster_credit(&mut self, trigger: CreditTrigger);

    /// Whether the player may accept the quest right now
    fn can_take_quest(&self, quest: &QuestTemplate) -> bool;

    fn add_quest(&mut self, quest: &QuestTemplate);

    fn complete_quest(&mut self, quest: QuestId);

    fn reward_quest(&mut self, quest: &QuestTemplate, flags: RewardFlags);

    /// Adjust the PvP currency balance by a signed delta
    fn modify_currency(&mut self, delta: i32);
}

/// Quest content lookup
pub trait QuestTemplates {
    fn quest_template(&self, id: QuestId) -> Option<Arc<QuestTemplate>>;
}

impl<T: QuestTemplates + ?Sized> QuestTemplates for Arc<T> {
    fn quest_template(&self, id: QuestId) -> Option<Arc<QuestTemplate>> {
        (**self).quest_template(id)
    }
}
