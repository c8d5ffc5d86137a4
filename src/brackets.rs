//! Per-bracket arena quest credit table.

use crate::ids::{credits, quests, ArenaBracket, CreditTrigger, QuestId};

/// Quest/credit pair granted on every match ("played") and on wins ("won")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketCredit {
    pub played_quest: QuestId,
    pub played_trigger: CreditTrigger,
    pub won_quest: QuestId,
    pub won_trigger: CreditTrigger,
}

const ONE_VS_ONE: BracketCredit = BracketCredit {
    played_quest: quests::ARENA_DAILY_1V1,
    played_trigger: credits::ARENA_1V1_COMPLETED,
    won_quest: quests::ARENA_WEEKLY_1V1,
    won_trigger: credits::ARENA_1V1_WON,
};

const TWO_VS_TWO: BracketCredit = BracketCredit {
    played_quest: quests::ARENA_DAILY_2V2,
    played_trigger: credits::ARENA_2V2_COMPLETED,
    won_quest: quests::ARENA_WEEKLY_2V2,
    won_trigger: credits::ARENA_2V2_WON,
};

const THREE_VS_THREE: BracketCredit = BracketCredit {
    played_quest: quests::ARENA_DAILY_3V3,
    played_trigger: credits::ARENA_3V3_COMPLETED,
    won_quest: quests::ARENA_WEEKLY_3V3,
    won_trigger: credits::ARENA_3V3_WON,
};

const SOLO: BracketCredit = BracketCredit {
    played_quest: quests::ARENA_DAILY_SOLO,
    played_trigger: credits::ARENA_SOLO_COMPLETED,
    won_quest: quests::ARENA_WEEKLY_SOLO,
    won_trigger: credits::ARENA_SOLO_WON,
};

const FIVE_VS_FIVE: BracketCredit = BracketCredit {
    played_quest: quests::ARENA_DAILY_5V5,
    played_trigger: credits::ARENA_5V5_COMPLETED,
    won_quest: quests::ARENA_WEEKLY_5V5,
    won_trigger: credits::ARENA_5V5_WON,
};

/// Bracket-independent arena quests
pub const ANY_BRACKET: BracketCredit = BracketCredit {
    played_quest: quests::ARENA_DAILY,
    played_trigger: credits::ARENA_COMPLETED,
    won_quest: quests::ARENA_WEEKLY,
    won_trigger: credits::ARENA_WON,
};

impl ArenaBracket {
    pub fn credit(&self) -> &'static BracketCredit {
        match self {
            ArenaBracket::OneVsOne => &ONE_VS_ONE,
            ArenaBracket::TwoVsTwo => &TWO_VS_TWO,
            ArenaBracket::ThreeVsThree => &THREE_VS_THREE,
            ArenaBracket::Solo => &SOLO,
            ArenaBracket::FiveVsFive => &FIVE_VS_FIVE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_rows_are_distinct() {
        let mut quest_ids = HashSet::new();
        let mut triggers = HashSet::new();

        let rows = ArenaBracket::ALL
            .iter()
            .map(|b| b.credit())
            .chain(std::iter::once(&ANY_BRACKET));

        for row in rows {
            assert!(quest_ids.insert(row.played_quest));
            assert!(quest_ids.insert(row.won_quest));
            assert!(triggers.insert(row.played_trigger));
            assert!(triggers.insert(row.won_trigger));
        }

        assert_eq!(quest_ids.len(), 12);
        assert_eq!(triggers.len(), 12);
    }

    #[test]
    fn test_solo_queue_is_type_four() {
        let row = ArenaBracket::from_arena_type(4).unwrap().credit();
        assert_eq!(row.played_quest, QuestId(50022));
        assert_eq!(row.won_trigger, CreditTrigger(500011));
        assert_eq!(ArenaBracket::Solo.as_str(), "solo");
    }
}
