use log::info;

use crate::config::*;

/// Distinct values of a column, in first-seen order.
fn distinct<'a, I: Iterator<Item = &'a str>>(values: I) -> Vec<String> {
    let mut res: Vec<String> = Vec::new();
    for v in values {
        // Blank cells would match every question as a substring.
        if v.trim().is_empty() {
            continue;
        }
        if !res.iter().any(|x| x == v) {
            res.push(v.to_string());
        }
    }
    res
}

/// The read-only tables behind the engine, and the value sets derived from
/// them at construction.
///
/// There is no mutation API: a new dataset (and engine) must be built to
/// change the data.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ElectionRecord>,
    booths: Option<Vec<BoothRecord>>,
    districts: Vec<String>,
    constituencies: Vec<String>,
    candidates: Vec<String>,
    parties: Vec<String>,
    years: Vec<u32>,
}

impl Dataset {
    pub fn new(records: Vec<ElectionRecord>, booths: Option<Vec<BoothRecord>>) -> Dataset {
        let districts = distinct(records.iter().map(|r| r.district.as_str()));
        let constituencies = distinct(records.iter().map(|r| r.constituency.as_str()));
        let candidates = distinct(records.iter().map(|r| r.candidate.as_str()));
        let parties = distinct(records.iter().map(|r| r.party.as_str()));
        let mut years: Vec<u32> = Vec::new();
        for r in records.iter() {
            if !years.contains(&r.year) {
                years.push(r.year);
            }
        }
        info!(
            "Dataset: {} rows, {} booth rows, {} districts, {} constituencies, {} candidates, {} parties, years {:?}",
            records.len(),
            booths.as_ref().map_or(0, |b| b.len()),
            districts.len(),
            constituencies.len(),
            candidates.len(),
            parties.len(),
            years
        );
        Dataset {
            records,
            booths,
            districts,
            constituencies,
            candidates,
            parties,
            years,
        }
    }

    pub fn records(&self) -> &[ElectionRecord] {
        &self.records
    }

    pub fn booths(&self) -> &[BoothRecord] {
        self.booths.as_deref().unwrap_or(&[])
    }

    pub fn districts(&self) -> &[String] {
        &self.districts
    }

    pub fn constituencies(&self) -> &[String] {
        &self.constituencies
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    pub fn parties(&self) -> &[String] {
        &self.parties
    }

    pub fn years(&self) -> &[u32] {
        &self.years
    }

    /// The most recent election year present in the data.
    pub fn latest_year(&self) -> Option<u32> {
        self.years.iter().max().cloned()
    }

    /// Rows matching every filter that is provided.
    pub fn select(&self, filter: &RowFilter) -> Vec<&ElectionRecord> {
        self.records.iter().filter(|r| filter.accepts(r)).collect()
    }

    /// Rows of the booth, in table order.
    pub fn booth_rows(&self, booth_id: u64) -> Vec<&BoothRecord> {
        self.booths()
            .iter()
            .filter(|b| b.booth_id == booth_id)
            .collect()
    }

    /// The smallest and largest booth ids, if there is booth data.
    pub fn booth_id_range(&self) -> Option<(u64, u64)> {
        let min = self.booths().iter().map(|b| b.booth_id).min()?;
        let max = self.booths().iter().map(|b| b.booth_id).max()?;
        Some((min, max))
    }
}

/// A conjunction of optional equality filters over election rows.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RowFilter<'a> {
    pub year: Option<u32>,
    pub district: Option<&'a str>,
    pub constituency: Option<&'a str>,
    pub candidate: Option<&'a str>,
    pub party: Option<&'a str>,
}

impl<'a> RowFilter<'a> {
    fn accepts(&self, r: &ElectionRecord) -> bool {
        self.year.map_or(true, |y| r.year == y)
            && self.district.map_or(true, |d| r.district == d)
            && self.constituency.map_or(true, |c| r.constituency == c)
            && self.candidate.map_or(true, |c| r.candidate == c)
            && self.party.map_or(true, |p| r.party == p)
    }
}

/// Sorts rows by decreasing votes. Rows with equal votes keep their table order.
pub fn by_votes_desc<'a>(rows: &[&'a ElectionRecord]) -> Vec<&'a ElectionRecord> {
    let mut sorted: Vec<&ElectionRecord> = rows.to_vec();
    sorted.sort_by(|x, y| y.votes.cmp(&x.votes));
    sorted
}
