// ********* Input data structures ***********

use std::borrow::Cow;
use std::error::Error;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One row of the election table: one candidate in one constituency for one
/// election year.
///
/// Within a (year, constituency) partition exactly one row is expected to carry
/// `winner == true`. The engine trusts that flag and does not re-check it.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionRecord {
    pub year: u32,
    pub district: String,
    pub constituency: String,
    pub candidate: String,
    pub party: String,
    pub votes: u64,
    #[serde(with = "yes_no")]
    pub winner: bool,
}

/// One row of the booth table: one candidate at one polling booth.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BoothRecord {
    pub year: u32,
    pub district: String,
    pub constituency: String,
    pub booth_id: u64,
    pub booth_name: String,
    pub total_voters: u64,
    pub votes_polled: u64,
    #[serde(default)]
    pub postal_votes: u64,
    #[serde(default)]
    pub tendered_votes: u64,
    pub candidate: String,
    pub party: String,
    pub votes: u64,
    #[serde(with = "yes_no")]
    pub winner: bool,
}

/// The winner column is stored as `"Yes"` / `"No"` in the source tables.
mod yes_no {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(winner: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(if *winner { "Yes" } else { "No" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let s = String::deserialize(d)?;
        match s.as_str() {
            "Yes" | "yes" | "YES" => Ok(true),
            "No" | "no" | "NO" | "" => Ok(false),
            x => Err(D::Error::custom(format!(
                "winner must be \"Yes\" or \"No\", got {:?}",
                x
            ))),
        }
    }
}

// ******** Per-query structures *********

/// The pieces of information pulled out of a free-text question.
///
/// Absence is represented, not defaulted. Handlers decide on defaults.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ExtractedSlots {
    pub year: Option<u32>,
    pub district: Option<String>,
    pub constituency: Option<String>,
    pub candidate: Option<String>,
    pub party: Option<String>,
    pub booth_id: Option<u64>,
}

impl ExtractedSlots {
    /// The most specific location that was extracted, if any.
    pub fn location(&self) -> Option<&str> {
        self.constituency.as_deref().or(self.district.as_deref())
    }
}

/// The categories of questions the engine knows how to answer.
///
/// The declaration order is the priority order of classification.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Intent {
    Booth,
    Winner,
    RunnerUp,
    VoteCount,
    Margin,
    ClosestContest,
    YearComparison,
    PartySeats,
    DistrictSummary,
    ExitPoll,
    Help,
    /// Only a constituency was recognised: answer with its margin summary.
    ConstituencyOverview,
    /// Only a district was recognised: answer with its party-win summary.
    DistrictOverview,
    Fallback,
}

/// Errors raised while assembling an engine.
///
/// Answering a question never fails: misses are reported as text.
#[derive(PartialEq, Debug, Clone)]
pub enum EngineErrors {
    /// The fuzzy cutoff must lie in `[0, 1]`.
    InvalidCutoff(f64),
    NoSupportedYears,
}

impl Error for EngineErrors {}

impl Display for EngineErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineErrors::InvalidCutoff(c) => {
                write!(f, "fuzzy cutoff must be between 0 and 1, got {}", c)
            }
            EngineErrors::NoSupportedYears => write!(f, "at least one election year is required"),
        }
    }
}

// ********* Configuration **********

#[derive(PartialEq, Debug, Clone)]
pub struct EngineSettings {
    /// The election years recognised in free text. Only these 4-digit numbers
    /// are ever extracted as years.
    pub supported_years: Cow<'static, [u32]>,
    /// Minimum similarity ratio for a fuzzy match to be accepted.
    pub fuzzy_cutoff: f64,
    /// The year assumed when a question needs one and the dataset is empty.
    pub fallback_year: u32,
}

impl EngineSettings {
    pub const DEFAULT: EngineSettings = EngineSettings {
        supported_years: Cow::Borrowed(&[2023, 2024, 2025]),
        fuzzy_cutoff: 0.6,
        fallback_year: 2024,
    };

    pub fn validate(&self) -> Result<(), EngineErrors> {
        if !(0.0..=1.0).contains(&self.fuzzy_cutoff) {
            return Err(EngineErrors::InvalidCutoff(self.fuzzy_cutoff));
        }
        if self.supported_years.is_empty() {
            return Err(EngineErrors::NoSupportedYears);
        }
        Ok(())
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings::DEFAULT
    }
}
