//! In-memory player and battleground
//!
//! Reference implementations of the host collaborators, used by embedders
//! without a quest backend of their own and by the reward tests.

use tracing::debug;

use super::definition::QuestTemplate;
use super::state::PlayerQuestState;
use crate::host::{Battleground, Player, RewardFlags, TeamId};
use crate::ids::{CreditTrigger, QuestId};

/// Player backed by a [`PlayerQuestState`]
#[derive(Debug, Clone)]
pub struct MemoryPlayer {
    pub name: String,
    pub level: u8,
    pub team: TeamId,
    pub spectator: bool,
    pub quests: PlayerQuestState,
    /// PvP currency balance
    pub currency: u32,
}

impl MemoryPlayer {
    pub fn new(name: &str, level: u8, team: TeamId) -> Self {
        Self {
            name: name.to_string(),
            level,
            team,
            spectator: false,
            quests: PlayerQuestState::new(),
            currency: 0,
        }
    }

    pub fn spectating(mut self) -> Self {
        self.spectator = true;
        self
    }

    /// Put a quest in the log without eligibility checks
    pub fn with_quest(mut self, quest: &QuestTemplate) -> Self {
        self.quests.start_quest(quest);
        self
    }

    /// Current progress on one objective of an active quest
    pub fn objective_progress(&self, quest: QuestId, trigger: CreditTrigger) -> Option<u32> {
        self.quests
            .get_quest(quest)
            .and_then(|p| p.objective(trigger))
            .map(|o| o.current)
    }
}

impl Player for MemoryPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn bg_team(&self) -> TeamId {
        self.team
    }

    fn is_spectator(&self) -> bool {
        self.spectator
    }

    fn has_quest(&self, quest: QuestId) -> bool {
        self.quests.is_quest_active(quest)
    }

    fn killed_monster_credit(&mut self, trigger: CreditTrigger) {
        let advanced = self.quests.credit(trigger);
        if !advanced.is_empty() {
            debug!("{} advanced {:?} via {}", self.name, advanced, trigger);
        }
    }

    fn can_take_quest(&self, quest: &QuestTemplate) -> bool {
        if self.level < quest.min_level {
            return false;
        }
        if self.quests.is_quest_active(quest.id) {
            return false;
        }
        quest.repeatable || !self.quests.is_quest_rewarded(quest.id)
    }

    fn add_quest(&mut self, quest: &QuestTemplate) {
        self.quests.start_quest(quest);
    }

    fn complete_quest(&mut self, quest: QuestId) {
        self.quests.complete_quest(quest);
    }

    fn reward_quest(&mut self, quest: &QuestTemplate, flags: RewardFlags) {
        let rewarded = self.quests.reward_quest(quest.id, flags.bypass_requirements);
        if rewarded && !flags.suppress_announce {
            debug!("{} completed {}", self.name, quest.name);
        }
    }

    fn modify_currency(&mut self, delta: i32) {
        self.currency = if delta >= 0 {
            self.currency.saturating_add(delta.unsigned_abs())
        } else {
            self.currency.saturating_sub(delta.unsigned_abs())
        };
    }
}

/// Plain battleground description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryBattleground {
    pub arena: bool,
    pub arena_type: u8,
}

impl MemoryBattleground {
    pub fn battleground() -> Self {
        Self {
            arena: false,
            arena_type: 0,
        }
    }

    pub fn arena(arena_type: u8) -> Self {
        Self {
            arena: true,
            arena_type,
        }
    }
}

impl Battleground for MemoryBattleground {
    fn is_arena(&self) -> bool {
        self.arena
    }

    fn arena_type(&self) -> u8 {
        self.arena_type
    }
}
