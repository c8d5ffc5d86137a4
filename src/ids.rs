//! Content Identifiers
//!
//! Quest and kill-credit entries shipped with the PvP quest content data,
//! plus the arena bracket values reported by the battleground host.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quest template entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(pub u32);

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "quest:{}", self.0)
    }
}

/// Kill-credit entry that advances quest objectives listening for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreditTrigger(pub u32);

impl fmt::Display for CreditTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "credit:{}", self.0)
    }
}

pub mod quests {
    use super::QuestId;

    /// Battleground win marker
    pub const MARKER_WIN: QuestId = QuestId(50010);
    /// Battleground loss marker
    pub const MARKER_DEFEAT: QuestId = QuestId(50011);

    /// Arena games played, any bracket
    pub const ARENA_DAILY: QuestId = QuestId(50012);
    /// Arena games won, any bracket
    pub const ARENA_WEEKLY: QuestId = QuestId(50013);
    pub const ARENA_DAILY_2V2: QuestId = QuestId(50014);
    pub const ARENA_WEEKLY_2V2: QuestId = QuestId(50015);
    pub const ARENA_DAILY_3V3: QuestId = QuestId(50016);
    pub const ARENA_WEEKLY_3V3: QuestId = QuestId(50017);
    pub const ARENA_DAILY_5V5: QuestId = QuestId(50018);
    pub const ARENA_WEEKLY_5V5: QuestId = QuestId(50019);
    pub const ARENA_DAILY_1V1: QuestId = QuestId(50020);
    pub const ARENA_WEEKLY_1V1: QuestId = QuestId(50021);
    pub const ARENA_DAILY_SOLO: QuestId = QuestId(50022);
    pub const ARENA_WEEKLY_SOLO: QuestId = QuestId(50023);
}

pub mod credits {
    use super::CreditTrigger;

    pub const ARENA_COMPLETED: CreditTrigger = CreditTrigger(500000);
    pub const ARENA_WON: CreditTrigger = CreditTrigger(500001);
    pub const ARENA_2V2_COMPLETED: CreditTrigger = CreditTrigger(500002);
    pub const ARENA_2V2_WON: CreditTrigger = CreditTrigger(500003);
    pub const ARENA_3V3_COMPLETED: CreditTrigger = CreditTrigger(500004);
    pub const ARENA_3V3_WON: CreditTrigger = CreditTrigger(500005);
    pub const ARENA_5V5_COMPLETED: CreditTrigger = CreditTrigger(500006);
    pub const ARENA_5V5_WON: CreditTrigger = CreditTrigger(500007);
    pub const ARENA_1V1_COMPLETED: CreditTrigger = CreditTrigger(500008);
    pub const ARENA_1V1_WON: CreditTrigger = CreditTrigger(500009);
    pub const ARENA_SOLO_COMPLETED: CreditTrigger = CreditTrigger(500010);
    pub const ARENA_SOLO_WON: CreditTrigger = CreditTrigger(500011);
}

/// Arena team-size category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArenaBracket {
    OneVsOne,
    TwoVsTwo,
    ThreeVsThree,
    /// 3v3 solo queue
    Solo,
    FiveVsFive,
}

impl ArenaBracket {
    pub const ALL: [ArenaBracket; 5] = [
        ArenaBracket::OneVsOne,
        ArenaBracket::TwoVsTwo,
        ArenaBracket::ThreeVsThree,
        ArenaBracket::Solo,
        ArenaBracket::FiveVsFive,
    ];

    /// Map the host's arena type value to a bracket
    pub fn from_arena_type(arena_type: u8) -> Option<Self> {
        match arena_type {
            1 => Some(ArenaBracket::OneVsOne),
            2 => Some(ArenaBracket::TwoVsTwo),
            3 => Some(ArenaBracket::ThreeVsThree),
            4 => Some(ArenaBracket::Solo),
            5 => Some(ArenaBracket::FiveVsFive),
            _ => None,
        }
    }

    pub fn arena_type(&self) -> u8 {
        match self {
            ArenaBracket::OneVsOne => 1,
            ArenaBracket::TwoVsTwo => 2,
            ArenaBracket::ThreeVsThree => 3,
            ArenaBracket::Solo => 4,
            ArenaBracket::FiveVsFive => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArenaBracket::OneVsOne => "1v1",
            ArenaBracket::TwoVsTwo => "2v2",
            ArenaBracket::ThreeVsThree => "3v3",
            ArenaBracket::Solo => "solo",
            ArenaBracket::FiveVsFive => "5v5",
        }
    }
}
