//! Intent classification.
//!
//! The rules form an ordered table evaluated top to bottom; the first rule
//! whose predicate holds decides the intent, however many others would also
//! match.

use log::debug;

use crate::config::*;

/// What a rule looks at.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Trigger {
    /// Any of the phrases occurs in the lowercased question.
    Phrases(&'static [&'static str]),
    BoothId,
    Constituency,
    District,
}

impl Trigger {
    fn holds(&self, text_lower: &str, slots: &ExtractedSlots) -> bool {
        match self {
            Trigger::Phrases(phrases) => phrases.iter().any(|p| text_lower.contains(p)),
            Trigger::BoothId => slots.booth_id.is_some(),
            Trigger::Constituency => slots.constituency.is_some(),
            Trigger::District => slots.district.is_some(),
        }
    }
}

/// The classification rules, in priority order. `Intent::Fallback` is implied
/// after the last rule.
pub const RULES: &[(Trigger, Intent)] = &[
    (Trigger::BoothId, Intent::Booth),
    (
        Trigger::Phrases(&["who won", "winner", "won in", "victory", "elected"]),
        Intent::Winner,
    ),
    (
        Trigger::Phrases(&[
            "runner up",
            "second place",
            "came second",
            "2nd place",
            "runner-up",
        ]),
        Intent::RunnerUp,
    ),
    (
        Trigger::Phrases(&["how many votes", "votes did", "vote count", "total votes"]),
        Intent::VoteCount,
    ),
    (
        Trigger::Phrases(&["margin", "won by", "victory margin", "winning margin"]),
        Intent::Margin,
    ),
    (
        Trigger::Phrases(&["closest", "narrowest", "tightest", "nail-biter"]),
        Intent::ClosestContest,
    ),
    (
        Trigger::Phrases(&["compare", "comparison", "vs", "versus", "difference between"]),
        Intent::YearComparison,
    ),
    (
        Trigger::Phrases(&["party", "seats", "how many seats"]),
        Intent::PartySeats,
    ),
    (
        Trigger::Phrases(&["results for", "show results", "all results", "district summary"]),
        Intent::DistrictSummary,
    ),
    (
        Trigger::Phrases(&["exit poll", "prediction", "forecast"]),
        Intent::ExitPoll,
    ),
    (
        Trigger::Phrases(&["help", "what can you", "how to use"]),
        Intent::Help,
    ),
    (Trigger::Constituency, Intent::ConstituencyOverview),
    (Trigger::District, Intent::DistrictOverview),
];

/// All the intents whose rule holds, in priority order, ending with
/// `Intent::Fallback`.
///
/// The first element is the classification. The rest is used when an
/// overview declines to answer.
pub fn candidates(text: &str, slots: &ExtractedSlots) -> Vec<Intent> {
    let text_lower = text.trim().to_lowercase();
    let mut res: Vec<Intent> = RULES
        .iter()
        .filter(|(trigger, _)| trigger.holds(&text_lower, slots))
        .map(|(_, intent)| *intent)
        .collect();
    res.push(Intent::Fallback);
    res
}

pub fn classify(text: &str, slots: &ExtractedSlots) -> Intent {
    let text_lower = text.trim().to_lowercase();
    let intent = RULES
        .iter()
        .find(|(trigger, _)| trigger.holds(&text_lower, slots))
        .map_or(Intent::Fallback, |(_, intent)| *intent);
    debug!("classify: {:?} -> {:?}", text_lower, intent);
    intent
}
