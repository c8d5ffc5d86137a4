//! End-of-match reward handler
//!
//! Arena matches grant kill credit to the "played"/"won" arena quests the
//! player currently holds. Regular battlegrounds hand out a marker quest and
//! PvP currency, which is how win/loss rewards are delivered.

use tracing::debug;

use crate::brackets::{BracketCredit, ANY_BRACKET};
use crate::config::{ConfigSource, RewardSettings};
use crate::host::{Battleground, Player, QuestTemplates, RewardFlags, TeamId};
use crate::ids::{quests, ArenaBracket, QuestId};
use crate::script::{BattlegroundHook, BattlegroundScript};

pub const SCRIPT_NAME: &str = "mod_bg_quest_reward_script";

/// Grants PvP quest progress when a battleground or arena ends
pub struct MatchRewardHandler<C, Q> {
    config: C,
    templates: Q,
}

impl<C: ConfigSource, Q: QuestTemplates> MatchRewardHandler<C, Q> {
    pub fn new(config: C, templates: Q) -> Self {
        Self { config, templates }
    }

    /// Called once per player when the match rewards are handed out
    pub fn on_match_end(
        &self,
        bg: &dyn Battleground,
        player: &mut dyn Player,
        winner_team: TeamId,
    ) {
        // Options are read per call so config reloads apply to the next match
        let settings = RewardSettings::read(&self.config);
        if !settings.enabled {
            return;
        }

        let winner = player.bg_team() == winner_team;

        if bg.is_arena() {
            if player.is_spectator() {
                return;
            }

            grant_bracket_credit(player, &ANY_BRACKET, winner);

            if let Some(bracket) = ArenaBracket::from_arena_type(bg.arena_type()) {
                debug!("{} finished a {} arena match", player.name(), bracket.as_str());
                grant_bracket_credit(player, bracket.credit(), winner);
            }
            return;
        }

        if winner {
            self.reward_marker(player, quests::MARKER_WIN, settings.win_currency);
        } else if settings.loss_currency != 0 {
            self.reward_marker(player, quests::MARKER_DEFEAT, settings.loss_currency);
        }
    }

    /// Accept, complete and turn in a marker quest, then pay out `currency`
    fn reward_marker(&self, player: &mut dyn Player, quest_id: QuestId, currency: i32) {
        let Some(quest) = self.templates.quest_template(quest_id) else {
            return;
        };
        if !player.can_take_quest(&quest) {
            return;
        }

        player.add_quest(&quest);
        player.complete_quest(quest_id);
        player.reward_quest(&quest, RewardFlags::MARKER);
        debug!("{} rewarded marker {}", player.name(), quest_id);

        if currency != 0 {
            player.modify_currency(currency);
            debug!("{} received {} currency", player.name(), currency);
        }
    }
}

fn grant_bracket_credit(player: &mut dyn Player, row: &BracketCredit, winner: bool) {
    if player.has_quest(row.played_quest) {
        player.killed_monster_credit(row.played_trigger);
        debug!("{} credited {} for {}", player.name(), row.played_trigger, row.played_quest);
    }

    if winner && player.has_quest(row.won_quest) {
        player.killed_monster_credit(row.won_trigger);
        debug!("{} credited {} for {}", player.name(), row.won_trigger, row.won_quest);
    }
}

impl<C, Q> BattlegroundScript for MatchRewardHandler<C, Q>
where
    C: ConfigSource + Send + Sync,
    Q: QuestTemplates + Send + Sync,
{
    fn name(&self) -> &str {
        SCRIPT_NAME
    }

    fn hooks(&self) -> &[BattlegroundHook] {
        &[BattlegroundHook::EndReward]
    }

    fn on_battleground_end_reward(
        &self,
        bg: &dyn Battleground,
        player: &mut dyn Player,
        winner_team: TeamId,
    ) {
        self.on_match_end(bg, player, winner_team);
    }
}
