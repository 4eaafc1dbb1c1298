/*!
Answers free-text questions about Kerala assembly election results.

The engine is built once from an election table (and optionally a booth
table) and then answers questions with [`QueryEngine::process_query`]:

```
use election_query::{ElectionRecord, QueryEngine};

let row = |candidate: &str, party: &str, votes: u64, winner: bool| ElectionRecord {
    year: 2024,
    district: "Thiruvananthapuram".to_string(),
    constituency: "Nemom".to_string(),
    candidate: candidate.to_string(),
    party: party.to_string(),
    votes,
    winner,
};
let engine = QueryEngine::new(vec![row("A", "CPI", 50000, true), row("B", "INC", 45000, false)], None);

let answer = engine.process_query("Who won in Nemom in 2024?");
assert!(answer.starts_with("**A** (CPI) won in **Nemom** in 2024"));
```

See the [manual] for the list of questions that are understood.
*/

mod config;

pub mod builder;
pub mod dataset;
pub mod extract;
pub mod format;
pub mod handlers;
pub mod intent;
pub mod manual;
pub mod similarity;

use log::debug;

pub use crate::config::*;
pub use crate::dataset::Dataset;
use crate::extract::EntityExtractor;
use crate::handlers::{Outcome, Query};

/// The question answering engine.
///
/// Immutable once built, and safe to share between threads. To use new data,
/// build a new engine and swap it in.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    pub(crate) dataset: Dataset,
    pub(crate) settings: EngineSettings,
}

impl QueryEngine {
    /// Builds an engine with the default settings.
    pub fn new(records: Vec<ElectionRecord>, booths: Option<Vec<BoothRecord>>) -> QueryEngine {
        QueryEngine {
            dataset: Dataset::new(records, booths),
            settings: EngineSettings::DEFAULT,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// The slots found in a question.
    pub fn extract(&self, text: &str) -> ExtractedSlots {
        EntityExtractor::new(&self.dataset, &self.settings).extract(text)
    }

    /// The intent a question is classified as.
    pub fn classify(&self, text: &str) -> Intent {
        intent::classify(text, &self.extract(text))
    }

    /// Answers a question.
    ///
    /// Always returns some text: questions that cannot be answered get a
    /// guidance message or the fallback text.
    pub fn process_query(&self, text: &str) -> String {
        let extractor = EntityExtractor::new(&self.dataset, &self.settings);
        let query = Query {
            text,
            slots: extractor.extract(text),
            years_in_text: extractor.years(text),
        };
        for intent in intent::candidates(text, &query.slots) {
            let outcome = handlers::handle(intent, &self.dataset, &self.settings, &query);
            debug!("process_query: {:?} -> {:?}", intent, outcome);
            if outcome != Outcome::Decline {
                return format::render(&outcome);
            }
        }
        format::FALLBACK_TEXT.to_string()
    }

    pub fn help_text() -> &'static str {
        format::HELP_TEXT
    }

    pub fn example_questions() -> &'static [&'static str] {
        format::EXAMPLE_QUESTIONS
    }

    pub fn fallback_text() -> &'static str {
        format::FALLBACK_TEXT
    }
}
