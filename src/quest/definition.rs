//! Quest Template Structures
//!
//! These structures are deserialized from TOML quest files.

use serde::{Deserialize, Serialize};

use crate::ids::{CreditTrigger, QuestId};

/// A quest file as it appears on disk
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestFile {
    pub quest: RawQuestTemplate,
}

/// Raw quest template as it appears in TOML
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestTemplate {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub min_level: u8,
    /// Daily/weekly quests can be taken again after being rewarded
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default)]
    pub objectives: Vec<RawObjective>,
}

/// Raw kill-credit objective
#[derive(Debug, Clone, Deserialize)]
pub struct RawObjective {
    pub credit: u32,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub description: String,
}

fn default_count() -> u32 {
    1
}

/// A resolved kill-credit objective
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Objective {
    pub trigger: CreditTrigger,
    /// Number of credits required
    pub count: u32,
    pub description: String,
}

/// A fully resolved quest template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestTemplate {
    pub id: QuestId,
    pub name: String,
    pub min_level: u8,
    pub repeatable: bool,
    /// Empty for marker quests, which are completed directly
    pub objectives: Vec<Objective>,
}

impl QuestTemplate {
    /// Create a template from raw TOML data
    pub fn from_raw(raw: &RawQuestTemplate) -> Result<Self, String> {
        let objectives = raw
            .objectives
            .iter()
            .enumerate()
            .map(|(i, o)| {
                if o.count == 0 {
                    return Err(format!(
                        "Quest {} objective {} has a zero count",
                        raw.id, i
                    ));
                }
                Ok(Objective {
                    trigger: CreditTrigger(o.credit),
                    count: o.count,
                    description: o.description.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id: QuestId(raw.id),
            name: raw.name.clone(),
            min_level: raw.min_level,
            repeatable: raw.repeatable,
            objectives,
        })
    }

    /// Marker template with no objectives
    pub fn marker(id: QuestId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            min_level: 0,
            repeatable: true,
            objectives: Vec::new(),
        }
    }

    /// Builder for a single kill-credit objective
    pub fn with_objective(mut self, trigger: CreditTrigger, count: u32) -> Self {
        self.objectives.push(Objective {
            trigger,
            count,
            description: String::new(),
        });
        self
    }

    pub fn get_objective(&self, trigger: CreditTrigger) -> Option<&Objective> {
        self.objectives.iter().find(|o| o.trigger == trigger)
    }
}
