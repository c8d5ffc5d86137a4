//! Module Configuration
//!
//! Options are read through [`ConfigSource`] on every hook invocation, so an
//! operator can change them at runtime. [`ConfigFile`] backs the source with a
//! TOML file and can hot-reload it when the file changes on disk.

use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, PoisonError, RwLock};
use std::time::Duration;

use tracing::{error, info, warn};

pub const KEY_ENABLE: &str = "ModPvPQuests.Enable";
pub const KEY_WIN_CURRENCY: &str = "ModPvPQuests.WinCurrency";
pub const KEY_LOSS_CURRENCY: &str = "ModPvPQuests.LossCurrency";

pub const DEFAULT_ENABLE: bool = true;
pub const DEFAULT_WIN_CURRENCY: i32 = 10;
pub const DEFAULT_LOSS_CURRENCY: i32 = 0;

/// External key-value option store
pub trait ConfigSource {
    fn get_bool(&self, key: &str, default: bool) -> bool;
    fn get_int(&self, key: &str, default: i64) -> i64;
}

impl<T: ConfigSource + ?Sized> ConfigSource for Arc<T> {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        (**self).get_bool(key, default)
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        (**self).get_int(key, default)
    }
}

/// Options for a single reward pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardSettings {
    pub enabled: bool,
    /// Currency granted with the battleground win marker (0 disables)
    pub win_currency: i32,
    /// Currency granted with the battleground loss marker (0 disables the loss flow)
    pub loss_currency: i32,
}

impl Default for RewardSettings {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_ENABLE,
            win_currency: DEFAULT_WIN_CURRENCY,
            loss_currency: DEFAULT_LOSS_CURRENCY,
        }
    }
}

impl RewardSettings {
    pub fn read(config: &dyn ConfigSource) -> Self {
        Self {
            enabled: config.get_bool(KEY_ENABLE, DEFAULT_ENABLE),
            win_currency: read_currency(config, KEY_WIN_CURRENCY, DEFAULT_WIN_CURRENCY),
            loss_currency: read_currency(config, KEY_LOSS_CURRENCY, DEFAULT_LOSS_CURRENCY),
        }
    }
}

fn read_currency(config: &dyn ConfigSource, key: &str, default: i32) -> i32 {
    let raw = config.get_int(key, default as i64);
    i32::try_from(raw).unwrap_or_else(|_| {
        warn!("Config value {} = {} is out of range, using {}", key, raw, default);
        default
    })
}

/// Parsed TOML option table
///
/// `Section.Option` resolves either as a quoted top-level key or as a nested
/// table, so both `"ModPvPQuests.Enable" = true` and `[ModPvPQuests]` layouts work.
#[derive(Debug, Clone, Default)]
pub struct ConfigTable {
    table: toml::Table,
}

impl ConfigTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let table: toml::Table = toml::from_str(content)
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        Ok(Self { table })
    }

    fn lookup(&self, key: &str) -> Option<&toml::Value> {
        if let Some(value) = self.table.get(key) {
            return Some(value);
        }

        let mut parts = key.split('.');
        let mut value = self.table.get(parts.next()?)?;
        for part in parts {
            value = value.as_table()?.get(part)?;
        }
        Some(value)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl ConfigSource for ConfigTable {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.lookup(key) {
            None => default,
            Some(toml::Value::Boolean(b)) => *b,
            // Legacy `.conf` style 0/1 flags
            Some(toml::Value::Integer(i)) => *i != 0,
            Some(other) => {
                warn!("Config value {} has type {}, expected boolean", key, other.type_str());
                default
            }
        }
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.lookup(key) {
            None => default,
            Some(toml::Value::Integer(i)) => *i,
            Some(other) => {
                warn!("Config value {} has type {}, expected integer", key, other.type_str());
                default
            }
        }
    }
}

/// Events from the config hot-reload watcher
#[derive(Debug, Clone)]
pub enum ReloadEvent {
    /// The file was reloaded successfully
    Reloaded(PathBuf),
    /// Reload failed; the previous options stay in effect
    Error(String),
}

/// Config table backed by a file on disk
pub struct ConfigFile {
    path: PathBuf,
    table: RwLock<ConfigTable>,
}

impl ConfigFile {
    /// Load options from `path`. A missing file yields all defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        let table = if path.exists() {
            Self::read_table(path)?
        } else {
            warn!("Config file does not exist: {:?}, using defaults", path);
            ConfigTable::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            table: RwLock::new(table),
        })
    }

    fn read_table(path: &Path) -> Result<ConfigTable, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;

        ConfigTable::parse(&content).map_err(|e| format!("{:?}: {}", path, e))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file. On failure, including a missing file, the previous
    /// table is kept.
    pub fn reload(&self) -> Result<(), String> {
        let table = Self::read_table(&self.path)?;
        let count = table.len();
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = table;
        info!("Reloaded config {:?} ({} entries)", self.path, count);
        Ok(())
    }

    /// Start a file watcher that reloads the config when it changes.
    /// Watching stops when the returned handle is dropped.
    pub fn start_file_watcher(self: &Arc<Self>) -> Result<ConfigWatcher, String> {
        use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

        let (tx, rx) = mpsc::channel();
        let (notify_tx, notify_rx) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<notify::Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(1)),
        )
        .map_err(|e| format!("Failed to create file watcher: {}", e))?;

        // Watch the directory: editors often replace the file instead of writing in place
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| format!("Failed to watch {:?}: {}", dir, e))?;

        info!("Config hot-reload watcher started for {:?}", self.path);

        let config = Arc::clone(self);
        let file_name = self.path.file_name().map(|n| n.to_os_string());

        // Exits once the watcher (and with it `notify_tx`) is dropped
        std::thread::spawn(move || {
            while let Ok(event) = notify_rx.recv() {
                if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                    continue;
                }

                let touched = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if !touched {
                    continue;
                }

                let result = match config.reload() {
                    Ok(()) => ReloadEvent::Reloaded(config.path().to_path_buf()),
                    Err(e) => {
                        error!("Config hot-reload failed: {}", e);
                        ReloadEvent::Error(e)
                    }
                };

                // Nobody listening is fine, the reload already applied
                let _ = tx.send(result);
            }
        });

        Ok(ConfigWatcher {
            _watcher: watcher,
            events: rx,
        })
    }
}

/// Running config watcher. Dropping it stops watching.
pub struct ConfigWatcher {
    _watcher: notify::RecommendedWatcher,
    events: mpsc::Receiver<ReloadEvent>,
}

impl ConfigWatcher {
    /// Reload results, in the order they happened
    pub fn events(&self) -> &mpsc::Receiver<ReloadEvent> {
        &self.events
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<ReloadEvent, mpsc::RecvTimeoutError> {
        self.events.recv_timeout(timeout)
    }
}

impl ConfigSource for ConfigFile {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get_bool(key, default)
    }

    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get_int(key, default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_empty() {
        let settings = RewardSettings::read(&ConfigTable::new());
        assert_eq!(settings, RewardSettings::default());
        assert!(settings.enabled);
        assert_eq!(settings.win_currency, 10);
        assert_eq!(settings.loss_currency, 0);
    }

    #[test]
    fn test_section_and_dotted_keys() {
        let nested = ConfigTable::parse(
            r#"
[ModPvPQuests]
Enable = false
WinCurrency = 25
LossCurrency = 5
"#,
        )
        .unwrap();
        let settings = RewardSettings::read(&nested);
        assert!(!settings.enabled);
        assert_eq!(settings.win_currency, 25);
        assert_eq!(settings.loss_currency, 5);

        let quoted = ConfigTable::parse(r#""ModPvPQuests.WinCurrency" = 3"#).unwrap();
        assert_eq!(RewardSettings::read(&quoted).win_currency, 3);

        // Unquoted dotted keys are nested tables in TOML
        let dotted = ConfigTable::parse("ModPvPQuests.Enable = 0").unwrap();
        assert!(!RewardSettings::read(&dotted).enabled);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let table = ConfigTable::parse(
            r#"
[ModPvPQuests]
Enable = "yes"
WinCurrency = 5000000000
LossCurrency = 1.5
"#,
        )
        .unwrap();
        assert_eq!(RewardSettings::read(&table), RewardSettings::default());
    }

    #[test]
    fn test_config_file_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mod_pvp_quests.toml");
        std::fs::write(&path, "[ModPvPQuests]\nWinCurrency = 15\n").unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert_eq!(RewardSettings::read(&config).win_currency, 15);

        std::fs::write(&path, "[ModPvPQuests]\nWinCurrency = 20\n").unwrap();
        config.reload().unwrap();
        assert_eq!(RewardSettings::read(&config).win_currency, 20);

        // Broken file keeps the previous options
        std::fs::write(&path, "[ModPvPQuests\nWinCurrency = ").unwrap();
        assert!(config.reload().is_err());
        assert_eq!(RewardSettings::read(&config).win_currency, 20);
    }

    #[test]
    fn test_reload_of_removed_file_keeps_options() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mod_pvp_quests.toml");
        std::fs::write(&path, "[ModPvPQuests]\nEnable = false\n").unwrap();

        let config = ConfigFile::load(&path).unwrap();
        assert!(!RewardSettings::read(&config).enabled);

        std::fs::remove_file(&path).unwrap();
        assert!(config.reload().is_err());
        assert!(!RewardSettings::read(&config).enabled);
    }

    /// Write through a temp file and rename, so the watcher never sees a half-written file
    fn replace_file(path: &Path, content: &str) {
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, content).unwrap();
        std::fs::rename(&tmp, path).unwrap();
    }

    fn wait_for(watcher: &ConfigWatcher, done: impl Fn(&ReloadEvent) -> bool) -> ReloadEvent {
        let deadline = std::time::Instant::now() + Duration::from_secs(10);
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            let event = watcher
                .recv_timeout(remaining)
                .expect("no matching reload event before timeout");
            if done(&event) {
                return event;
            }
        }
    }

    #[test]
    fn test_file_watcher_reloads_on_change() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("mod_pvp_quests.toml");
        std::fs::write(&path, "[ModPvPQuests]\nWinCurrency = 15\n").unwrap();

        let config = Arc::new(ConfigFile::load(&path).unwrap());
        let watcher = config.start_file_watcher().unwrap();

        replace_file(&path, "[ModPvPQuests]\nWinCurrency = 20\n");
        let event = wait_for(&watcher, |e| {
            matches!(e, ReloadEvent::Reloaded(_))
                && RewardSettings::read(&*config).win_currency == 20
        });
        match event {
            ReloadEvent::Reloaded(reloaded) => assert_eq!(reloaded, config.path()),
            ReloadEvent::Error(e) => panic!("unexpected reload error: {}", e),
        }

        replace_file(&path, "[ModPvPQuests\nWinCurrency = ");
        wait_for(&watcher, |e| matches!(e, ReloadEvent::Error(_)));
        assert_eq!(RewardSettings::read(&*config).win_currency, 20);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = ConfigFile::load(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(RewardSettings::read(&config), RewardSettings::default());
    }
}
