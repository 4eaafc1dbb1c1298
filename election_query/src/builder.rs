pub use crate::config::*;
use crate::dataset::Dataset;
use crate::QueryEngine;

/// A builder for assembling the tables of an engine.
///
/// The tables are frozen when `build` is called: the engine offers no way to
/// change them afterwards.
///
/// ```
/// use election_query::builder::Builder;
/// use election_query::{ElectionRecord, EngineSettings};
/// # use election_query::EngineErrors;
///
/// let mut builder = Builder::new(&EngineSettings::DEFAULT)?;
/// builder.add_result(ElectionRecord {
///     year: 2024,
///     district: "Thiruvananthapuram".to_string(),
///     constituency: "Nemom".to_string(),
///     candidate: "A".to_string(),
///     party: "CPI".to_string(),
///     votes: 50000,
///     winner: true,
/// });
/// builder.add_result(ElectionRecord {
///     year: 2024,
///     district: "Thiruvananthapuram".to_string(),
///     constituency: "Nemom".to_string(),
///     candidate: "B".to_string(),
///     party: "INC".to_string(),
///     votes: 45000,
///     winner: false,
/// });
/// let engine = builder.build();
///
/// let answer = engine.process_query("What was the margin in Nemom in 2024?");
/// assert!(answer.contains("5,000"));
///
/// # Ok::<(), EngineErrors>(())
/// ```
pub struct Builder {
    pub(crate) _settings: EngineSettings,
    pub(crate) _records: Vec<ElectionRecord>,
    pub(crate) _booths: Option<Vec<BoothRecord>>,
}

impl Builder {
    pub fn new(settings: &EngineSettings) -> Result<Builder, EngineErrors> {
        settings.validate()?;
        Ok(Builder {
            _settings: settings.clone(),
            _records: Vec::new(),
            _booths: None,
        })
    }

    /// Replaces the election table.
    pub fn elections(self, records: Vec<ElectionRecord>) -> Builder {
        Builder {
            _settings: self._settings,
            _records: records,
            _booths: self._booths,
        }
    }

    /// Replaces the booth table.
    pub fn booths(self, booths: Vec<BoothRecord>) -> Builder {
        Builder {
            _settings: self._settings,
            _records: self._records,
            _booths: Some(booths),
        }
    }

    /// Appends one row to the election table.
    pub fn add_result(&mut self, record: ElectionRecord) {
        self._records.push(record);
    }

    /// Appends one row to the booth table, creating the table if needed.
    pub fn add_booth_row(&mut self, row: BoothRecord) {
        self._booths.get_or_insert_with(Vec::new).push(row);
    }

    pub fn build(self) -> QueryEngine {
        QueryEngine {
            dataset: Dataset::new(self._records, self._booths),
            settings: self._settings,
        }
    }
}
