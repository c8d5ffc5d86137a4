//! Quest Template Registry
//!
//! Loads and caches quest templates from TOML files.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};

use super::definition::{QuestTemplate, RawQuestFile};
use crate::host::QuestTemplates;
use crate::ids::QuestId;

/// Registry for all quest templates
pub struct QuestTemplateRegistry {
    quests: HashMap<QuestId, Arc<QuestTemplate>>,
}

impl QuestTemplateRegistry {
    pub fn new() -> Self {
        Self {
            quests: HashMap::new(),
        }
    }

    /// Load all quest templates from `<data_dir>/quests`, recursively
    pub fn load_from_directory(&mut self, data_dir: &Path) -> Result<(), String> {
        let quest_dir = data_dir.join("quests");

        if !quest_dir.exists() {
            warn!("Quest directory does not exist: {:?}", quest_dir);
            return Ok(());
        }

        let mut paths = Vec::new();
        collect_toml_files(&quest_dir, &mut paths)?;
        paths.sort();

        for path in paths {
            if let Err(e) = self.load_quest_file(&path) {
                warn!("Failed to load quest {:?}: {}", path, e);
            }
        }

        info!("Loaded {} quest templates", self.quests.len());
        Ok(())
    }

    fn load_quest_file(&mut self, path: &Path) -> Result<(), String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {:?}: {}", path, e))?;

        let raw: RawQuestFile = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse {:?}: {}", path, e))?;

        let quest = QuestTemplate::from_raw(&raw.quest)?;
        if self.quests.contains_key(&quest.id) {
            warn!("Duplicate quest id {} in {:?}, overwriting", quest.id, path);
        }
        self.insert(quest);
        Ok(())
    }

    pub fn insert(&mut self, quest: QuestTemplate) {
        self.quests.insert(quest.id, Arc::new(quest));
    }

    pub fn get(&self, id: QuestId) -> Option<Arc<QuestTemplate>> {
        self.quests.get(&id).cloned()
    }

    pub fn contains(&self, id: QuestId) -> bool {
        self.quests.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.quests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quests.is_empty()
    }
}

impl Default for QuestTemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestTemplates for QuestTemplateRegistry {
    fn quest_template(&self, id: QuestId) -> Option<Arc<QuestTemplate>> {
        self.get(id)
    }
}

fn collect_toml_files(dir: &Path, paths: &mut Vec<std::path::PathBuf>) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {:?}: {}", dir, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Failed to read entry: {}", e))?;
        let path = entry.path();

        if path.is_dir() {
            collect_toml_files(&path, paths)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const WIN_MARKER: &str = r#"
[quest]
id = 50010
name = "Battleground Victory"
repeatable = true
"#;

    const ARENA_DAILY: &str = r#"
[quest]
id = 50012
name = "Arena Daily"
min_level = 70
repeatable = true

[[quest.objectives]]
credit = 500000
count = 3
description = "Complete 3 arena matches"
"#;

    #[test]
    fn test_load_quests() {
        let temp_dir = TempDir::new().unwrap();
        let quest_dir = temp_dir.path().join("quests");
        std::fs::create_dir_all(quest_dir.join("arena")).unwrap();

        std::fs::write(quest_dir.join("marker_win.toml"), WIN_MARKER).unwrap();
        std::fs::write(quest_dir.join("arena").join("daily.toml"), ARENA_DAILY).unwrap();
        std::fs::write(quest_dir.join("broken.toml"), "[quest]\nid = \"x\"").unwrap();
        std::fs::write(quest_dir.join("notes.txt"), "ignored").unwrap();

        let mut registry = QuestTemplateRegistry::new();
        registry.load_from_directory(temp_dir.path()).unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(QuestId(50010)));

        let daily = registry.quest_template(QuestId(50012)).unwrap();
        assert_eq!(daily.name, "Arena Daily");
        assert_eq!(daily.objectives.len(), 1);
        assert_eq!(daily.objectives[0].count, 3);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut registry = QuestTemplateRegistry::new();
        registry.load_from_directory(temp_dir.path()).unwrap();
        assert!(registry.is_empty());
        assert!(registry.quest_template(QuestId(50010)).is_none());
    }
}
