//! Quest State Tracking
//!
//! Tracks a player's quest log: objective progress, completion and rewards.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::definition::QuestTemplate;
use crate::ids::{CreditTrigger, QuestId};

/// Status of a quest in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestStatus {
    /// Quest is active and in progress
    Active,
    /// All objectives complete, ready to turn in
    ReadyToComplete,
}

/// Progress on a single kill-credit objective
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveProgress {
    pub trigger: CreditTrigger,
    pub current: u32,
    pub target: u32,
    pub completed: bool,
}

impl ObjectiveProgress {
    pub fn new(trigger: CreditTrigger, target: u32) -> Self {
        Self {
            trigger,
            current: 0,
            target,
            completed: target == 0,
        }
    }

    /// Add progress and return true if newly completed
    pub fn add_progress(&mut self, amount: u32) -> bool {
        if self.completed {
            return false;
        }
        self.current = self.current.saturating_add(amount).min(self.target);
        if self.current >= self.target {
            self.completed = true;
            true
        } else {
            false
        }
    }

    /// Mark as complete regardless of count
    pub fn force_complete(&mut self) {
        self.current = self.target;
        self.completed = true;
    }
}

/// Progress of one quest in the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestProgress {
    pub quest_id: QuestId,
    pub status: QuestStatus,
    pub objectives: Vec<ObjectiveProgress>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl QuestProgress {
    pub fn new(quest: &QuestTemplate) -> Self {
        let objectives = quest
            .objectives
            .iter()
            .map(|o| ObjectiveProgress::new(o.trigger, o.count))
            .collect();

        let mut progress = Self {
            quest_id: quest.id,
            status: QuestStatus::Active,
            objectives,
            started_at: Utc::now(),
            completed_at: None,
        };
        progress.check_all_complete();
        progress
    }

    /// Apply one credit to every matching objective. Returns true if any advanced.
    pub fn credit(&mut self, trigger: CreditTrigger) -> bool {
        let mut advanced = false;
        for obj in self.objectives.iter_mut().filter(|o| o.trigger == trigger && !o.completed) {
            obj.add_progress(1);
            advanced = true;
        }
        self.check_all_complete();
        advanced
    }

    /// Check if all objectives are complete and update status
    fn check_all_complete(&mut self) {
        if self.status != QuestStatus::Active {
            return;
        }
        // Quests without objectives stay active until completed explicitly
        if !self.objectives.is_empty() && self.objectives.iter().all(|o| o.completed) {
            self.mark_ready();
        }
    }

    /// Complete all objectives
    pub fn complete(&mut self) {
        self.objectives.iter_mut().for_each(ObjectiveProgress::force_complete);
        if self.status == QuestStatus::Active {
            self.mark_ready();
        }
    }

    fn mark_ready(&mut self) {
        self.status = QuestStatus::ReadyToComplete;
        self.completed_at = Some(Utc::now());
    }

    pub fn is_ready(&self) -> bool {
        self.status == QuestStatus::ReadyToComplete
    }

    pub fn objective(&self, trigger: CreditTrigger) -> Option<&ObjectiveProgress> {
        self.objectives.iter().find(|o| o.trigger == trigger)
    }
}

/// All quest state for a single player
#[derive(Debug, Clone, Default)]
pub struct PlayerQuestState {
    /// Quests in the log (quest_id -> progress)
    pub active_quests: HashMap<QuestId, QuestProgress>,
    /// Times each quest has been rewarded
    pub rewarded_quests: HashMap<QuestId, u32>,
}

impl PlayerQuestState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quest to the log
    pub fn start_quest(&mut self, quest: &QuestTemplate) {
        self.active_quests.insert(quest.id, QuestProgress::new(quest));
    }

    pub fn get_quest(&self, quest_id: QuestId) -> Option<&QuestProgress> {
        self.active_quests.get(&quest_id)
    }

    pub fn is_quest_active(&self, quest_id: QuestId) -> bool {
        self.active_quests.contains_key(&quest_id)
    }

    pub fn is_quest_rewarded(&self, quest_id: QuestId) -> bool {
        self.reward_count(quest_id) > 0
    }

    pub fn reward_count(&self, quest_id: QuestId) -> u32 {
        self.rewarded_quests.get(&quest_id).copied().unwrap_or(0)
    }

    /// Apply a kill credit to every active quest. Returns the quests that advanced.
    pub fn credit(&mut self, trigger: CreditTrigger) -> Vec<QuestId> {
        let mut advanced: Vec<QuestId> = self
            .active_quests
            .values_mut()
            .filter_map(|progress| progress.credit(trigger).then_some(progress.quest_id))
            .collect();
        advanced.sort();
        advanced
    }

    /// Force-complete a quest in the log
    pub fn complete_quest(&mut self, quest_id: QuestId) -> bool {
        match self.active_quests.get_mut(&quest_id) {
            Some(progress) => {
                progress.complete();
                true
            }
            None => false,
        }
    }

    /// Turn in a quest. Unless `force` is set, the quest must be ready.
    pub fn reward_quest(&mut self, quest_id: QuestId, force: bool) -> bool {
        let ready = match self.active_quests.get(&quest_id) {
            Some(progress) => progress.is_ready(),
            None => return false,
        };
        if !ready && !force {
            return false;
        }

        self.active_quests.remove(&quest_id);
        *self.rewarded_quests.entry(quest_id).or_insert(0) += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_daily() -> QuestTemplate {
        QuestTemplate::marker(QuestId(50012), "Arena Daily")
            .with_objective(CreditTrigger(500000), 2)
    }

    #[test]
    fn test_objective_progress() {
        let mut obj = ObjectiveProgress::new(CreditTrigger(1), 2);
        assert!(!obj.add_progress(1));
        assert!(obj.add_progress(1));
        assert!(obj.completed);

        // Can't add more after complete
        assert!(!obj.add_progress(1));
        assert_eq!(obj.current, 2);
    }

    #[test]
    fn test_credit_advances_matching_objectives() {
        let mut state = PlayerQuestState::new();
        state.start_quest(&arena_daily());

        assert!(state.credit(CreditTrigger(999)).is_empty());
        assert_eq!(state.credit(CreditTrigger(500000)), vec![QuestId(50012)]);
        assert!(!state.get_quest(QuestId(50012)).unwrap().is_ready());

        state.credit(CreditTrigger(500000));
        let progress = state.get_quest(QuestId(50012)).unwrap();
        assert!(progress.is_ready());
        assert!(progress.completed_at.is_some());

        // Completed objectives absorb further credit
        assert!(state.credit(CreditTrigger(500000)).is_empty());
    }

    #[test]
    fn test_reward_requires_ready_unless_forced() {
        let mut state = PlayerQuestState::new();
        state.start_quest(&arena_daily());

        assert!(!state.reward_quest(QuestId(50012), false));
        assert!(state.is_quest_active(QuestId(50012)));

        assert!(state.reward_quest(QuestId(50012), true));
        assert!(!state.is_quest_active(QuestId(50012)));
        assert_eq!(state.reward_count(QuestId(50012)), 1);

        // Not in the log anymore
        assert!(!state.reward_quest(QuestId(50012), true));
    }

    #[test]
    fn test_marker_quest_flow() {
        let marker = QuestTemplate::marker(QuestId(50010), "Victory");
        let mut state = PlayerQuestState::new();

        state.start_quest(&marker);
        assert_eq!(state.get_quest(marker.id).unwrap().status, QuestStatus::Active);

        assert!(state.complete_quest(marker.id));
        assert!(state.get_quest(marker.id).unwrap().is_ready());

        assert!(state.reward_quest(marker.id, false));
        assert!(state.is_quest_rewarded(marker.id));
    }
}
