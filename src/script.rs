//! Battleground Script Registry
//!
//! The host owns one registry and dispatches battleground events through it.
//! Scripts declare which hooks they listen to when registered.

use std::sync::Arc;

use tracing::{debug, info};

use crate::host::{Battleground, Player, TeamId};

/// Battleground event categories a script can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattlegroundHook {
    /// Per-player reward step after a battleground or arena ends
    EndReward,
}

/// A script reacting to battleground events
pub trait BattlegroundScript: Send + Sync {
    /// Unique script name
    fn name(&self) -> &str;

    /// Hooks this script is dispatched for
    fn hooks(&self) -> &[BattlegroundHook];

    fn on_battleground_end_reward(
        &self,
        _bg: &dyn Battleground,
        _player: &mut dyn Player,
        _winner_team: TeamId,
    ) {
    }
}

/// Registry of loaded battleground scripts
#[derive(Default)]
pub struct ScriptRegistry {
    scripts: Vec<Arc<dyn BattlegroundScript>>,
}

impl ScriptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a script. Names must be unique.
    pub fn register(&mut self, script: Arc<dyn BattlegroundScript>) -> Result<(), String> {
        if self.get(script.name()).is_some() {
            return Err(format!("Script '{}' is already registered", script.name()));
        }

        info!("Registered battleground script {} ({:?})", script.name(), script.hooks());
        self.scripts.push(script);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn BattlegroundScript>> {
        self.scripts.iter().find(|s| s.name() == name)
    }

    /// Scripts subscribed to `hook`, in registration order
    pub fn scripts_for(
        &self,
        hook: BattlegroundHook,
    ) -> impl Iterator<Item = &Arc<dyn BattlegroundScript>> {
        self.scripts.iter().filter(move |s| s.hooks().contains(&hook))
    }

    /// Run the end-reward step for one player
    pub fn dispatch_end_reward(
        &self,
        bg: &dyn Battleground,
        player: &mut dyn Player,
        winner_team: TeamId,
    ) {
        debug!(
            "End reward for {} ({}), winner {}",
            player.name(),
            player.bg_team().as_str(),
            winner_team.as_str()
        );
        for script in self.scripts_for(BattlegroundHook::EndReward) {
            script.on_battleground_end_reward(bg, player, winner_team);
        }
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::{MemoryBattleground, MemoryPlayer};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter {
        name: &'static str,
        hooks: Vec<BattlegroundHook>,
        calls: AtomicUsize,
    }

    impl Counter {
        fn new(name: &'static str, hooks: Vec<BattlegroundHook>) -> Arc<Self> {
            Arc::new(Self {
                name,
                hooks,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl BattlegroundScript for Counter {
        fn name(&self) -> &str {
            self.name
        }

        fn hooks(&self) -> &[BattlegroundHook] {
            &self.hooks
        }

        fn on_battleground_end_reward(&self, _: &dyn Battleground, _: &mut dyn Player, _: TeamId) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_dispatch_only_to_subscribers() {
        let listening = Counter::new("listening", vec![BattlegroundHook::EndReward]);
        let idle = Counter::new("idle", Vec::new());

        let mut registry = ScriptRegistry::new();
        registry.register(listening.clone()).unwrap();
        registry.register(idle.clone()).unwrap();

        let mut player = MemoryPlayer::new("Garrosh", 80, TeamId::Horde);
        let bg = MemoryBattleground::battleground();
        registry.dispatch_end_reward(&bg, &mut player, TeamId::Horde);

        assert_eq!(listening.calls.load(Ordering::SeqCst), 1);
        assert_eq!(idle.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = ScriptRegistry::new();
        registry.register(Counter::new("dup", Vec::new())).unwrap();
        assert!(registry.register(Counter::new("dup", Vec::new())).is_err());
        assert_eq!(registry.len(), 1);
    }
}
