//! PvP quest rewards for battleground and arena matches.
//!
//! When a match ends the host calls the registered script once per player.
//! Arena participants receive kill credit toward the generic and per-bracket
//! "played"/"won" quests they hold. Battleground winners (and, when enabled,
//! losers) receive a marker quest plus a configurable amount of PvP currency.

pub mod brackets;
pub mod config;
pub mod handler;
pub mod host;
pub mod ids;
pub mod quest;
pub mod script;

use std::sync::Arc;

pub use config::{
    ConfigFile, ConfigSource, ConfigTable, ConfigWatcher, ReloadEvent, RewardSettings,
};
pub use handler::MatchRewardHandler;
pub use host::{Battleground, Player, QuestTemplates, RewardFlags, TeamId};
pub use ids::{ArenaBracket, CreditTrigger, QuestId};
pub use script::{BattlegroundHook, BattlegroundScript, ScriptRegistry};

/// Register all PvP quest scripts with the host
pub fn add_pvp_quests_scripts<C, Q>(
    registry: &mut ScriptRegistry,
    config: C,
    templates: Q,
) -> Result<(), String>
where
    C: ConfigSource + Send + Sync + 'static,
    Q: QuestTemplates + Send + Sync + 'static,
{
    registry.register(Arc::new(MatchRewardHandler::new(config, templates)))
}
