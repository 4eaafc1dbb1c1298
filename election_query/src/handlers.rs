//! One handler per intent.
//!
//! Handlers only compute: they return the fields of an answer, or a miss,
//! and leave the wording to the `format` module.

use std::collections::BTreeMap;

use log::debug;

use crate::config::*;
use crate::dataset::{by_votes_desc, Dataset, RowFilter};
use crate::extract::booth_digits;

/// A question after extraction, as seen by the handlers.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Query<'a> {
    /// The question as asked.
    pub text: &'a str,
    pub slots: ExtractedSlots,
    /// Every supported year in the text, in textual order. The year slot only
    /// holds the first one.
    pub years_in_text: Vec<u32>,
}

/// The result of running a handler.
#[derive(PartialEq, Debug, Clone)]
pub enum Outcome {
    Answered(Answer),
    /// A required slot is missing.
    Specify {
        what: &'static str,
        example: String,
    },
    /// The filters were valid but selected nothing usable.
    NoData(NoData),
    /// Let the next matching rule answer instead.
    Decline,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct NoData {
    pub topic: &'static str,
    pub subject: Option<String>,
    pub year: Option<u32>,
    pub hint: Option<String>,
}

#[derive(PartialEq, Debug, Clone)]
pub enum Answer {
    Winner(WinnerReport),
    RunnerUp(MarginReport),
    Votes(VoteReport),
    Margin(MarginReport),
    Closest(ClosestReport),
    Comparison(ComparisonReport),
    Party(PartyReport),
    District(DistrictReport),
    Booth(BoothReport),
    ExitPoll,
    Help,
    ConstituencyOverview(MarginReport),
    DistrictOverview(DistrictReport),
    Fallback,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Placing {
    pub candidate: String,
    pub party: String,
    pub votes: u64,
}

impl Placing {
    fn of(r: &ElectionRecord) -> Placing {
        Placing {
            candidate: r.candidate.clone(),
            party: r.party.clone(),
            votes: r.votes,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum WinnerReport {
    Constituency {
        year: u32,
        constituency: String,
        winner: Placing,
        margin: Option<u64>,
    },
    District {
        year: u32,
        district: String,
        /// (constituency, winner), in table order.
        winners: Vec<(String, Placing)>,
    },
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MarginReport {
    pub year: u32,
    pub constituency: String,
    pub winner: Placing,
    pub runner_up: Placing,
    pub margin: u64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteLine {
    pub year: u32,
    pub constituency: String,
    pub votes: u64,
    pub won: bool,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteReport {
    pub candidate: String,
    /// Never empty.
    pub lines: Vec<VoteLine>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ClosestReport {
    /// The year the question was restricted to, if any.
    pub scope_year: Option<u32>,
    pub constituency: String,
    pub year: u32,
    pub winner: String,
    pub runner_up: String,
    pub margin: u64,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ComparisonReport {
    pub constituency: String,
    pub first_year: u32,
    pub second_year: u32,
    /// `None` when no row of that year carries the winner flag.
    pub first: Option<Placing>,
    pub second: Option<Placing>,
}

impl ComparisonReport {
    pub fn winner_changed(&self) -> bool {
        let name = |p: &Option<Placing>| p.as_ref().map(|x| x.candidate.clone());
        name(&self.first) != name(&self.second)
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PartyReport {
    pub party: String,
    pub year: Option<u32>,
    pub seats: usize,
    /// Votes over every row of the party, won or lost.
    pub total_votes: u64,
    pub constituencies: Vec<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DistrictReport {
    pub district: String,
    pub year: Option<u32>,
    pub constituencies: usize,
    pub seats_by_party: BTreeMap<String, usize>,
}

#[derive(PartialEq, Debug, Clone)]
pub struct BoothReport {
    pub booth_id: u64,
    pub booth_name: String,
    pub constituency: String,
    pub district: String,
    pub total_voters: u64,
    pub votes_polled: u64,
    /// Percentage of registered voters who voted.
    pub turnout: Option<f64>,
    pub leader: Option<Placing>,
    /// Percentage of the booth's candidate votes that went to the leader.
    pub leader_share: Option<f64>,
}

/// Runs the handler of the intent.
pub fn handle(intent: Intent, ds: &Dataset, settings: &EngineSettings, q: &Query) -> Outcome {
    match intent {
        Intent::Booth => booth(ds, q),
        Intent::Winner => winner(ds, settings, q),
        Intent::RunnerUp => runner_up(ds, settings, q),
        Intent::VoteCount => vote_count(ds, q),
        Intent::Margin => margin_query(ds, settings, q),
        Intent::ClosestContest => closest(ds, q),
        Intent::YearComparison => comparison(ds, q),
        Intent::PartySeats => party(ds, q),
        Intent::DistrictSummary => district_summary(ds, q),
        Intent::ExitPoll => Outcome::Answered(Answer::ExitPoll),
        Intent::Help => Outcome::Answered(Answer::Help),
        Intent::ConstituencyOverview => constituency_overview(ds, settings, q),
        Intent::DistrictOverview => district_overview(ds, q),
        Intent::Fallback => Outcome::Answered(Answer::Fallback),
    }
}

/// The year to use when a question needs one: the extracted one, else the
/// latest year of the data.
fn year_or_latest(ds: &Dataset, settings: &EngineSettings, year: Option<u32>) -> u32 {
    year.or_else(|| ds.latest_year())
        .unwrap_or(settings.fallback_year)
}

fn no_data(topic: &'static str, subject: Option<&str>, year: Option<u32>) -> Outcome {
    Outcome::NoData(NoData {
        topic,
        subject: subject.map(|s| s.to_string()),
        year,
        hint: None,
    })
}

/// Winner and runner-up of a constituency, by votes.
///
/// `None` when the constituency has fewer than two rows that year.
pub fn margin(ds: &Dataset, year: u32, constituency: &str) -> Option<MarginReport> {
    let rows = ds.select(&RowFilter {
        year: Some(year),
        constituency: Some(constituency),
        ..Default::default()
    });
    let sorted = by_votes_desc(&rows);
    match sorted.as_slice() {
        [first, second, ..] => Some(MarginReport {
            year,
            constituency: constituency.to_string(),
            winner: Placing::of(first),
            runner_up: Placing::of(second),
            margin: first.votes.saturating_sub(second.votes),
        }),
        _ => None,
    }
}

fn winner(ds: &Dataset, settings: &EngineSettings, q: &Query) -> Outcome {
    let year = year_or_latest(ds, settings, q.slots.year);
    let district = q.slots.district.as_deref();
    let constituency = q.slots.constituency.as_deref();
    if district.is_none() && constituency.is_none() {
        return Outcome::Specify {
            what: "a district or constituency",
            example: format!("Who won in Thiruvananthapuram in {}?", year),
        };
    }

    let rows = ds.select(&RowFilter {
        year: Some(year),
        district,
        constituency,
        ..Default::default()
    });
    let winners: Vec<&ElectionRecord> = rows.into_iter().filter(|r| r.winner).collect();
    debug!("winner: {} winner rows for {:?}", winners.len(), q.slots);

    match (constituency, district, winners.first()) {
        (_, _, None) => no_data("winner", q.slots.location(), Some(year)),
        (Some(c), _, Some(w)) => Outcome::Answered(Answer::Winner(WinnerReport::Constituency {
            year,
            constituency: c.to_string(),
            winner: Placing::of(w),
            margin: margin(ds, year, c).map(|m| m.margin),
        })),
        (None, Some(d), Some(_)) => Outcome::Answered(Answer::Winner(WinnerReport::District {
            year,
            district: d.to_string(),
            winners: winners
                .iter()
                .map(|w| (w.constituency.clone(), Placing::of(w)))
                .collect(),
        })),
        (None, None, Some(_)) => no_data("winner", None, Some(year)),
    }
}

fn runner_up(ds: &Dataset, settings: &EngineSettings, q: &Query) -> Outcome {
    let year = year_or_latest(ds, settings, q.slots.year);
    match q.slots.constituency.as_deref() {
        None => Outcome::Specify {
            what: "a constituency",
            example: "Who was the runner up in Nemom in 2024?".to_string(),
        },
        Some(c) => match margin(ds, year, c) {
            Some(m) => Outcome::Answered(Answer::RunnerUp(m)),
            None => no_data("runner-up", Some(c), Some(year)),
        },
    }
}

fn vote_count(ds: &Dataset, q: &Query) -> Outcome {
    let candidate = match q.slots.candidate.as_deref() {
        Some(c) => c,
        None => {
            return Outcome::Specify {
                what: "a candidate name",
                example: "How many votes did Suresh get in 2024?".to_string(),
            }
        }
    };
    let rows = ds.select(&RowFilter {
        year: q.slots.year,
        constituency: q.slots.constituency.as_deref(),
        candidate: Some(candidate),
        ..Default::default()
    });
    if rows.is_empty() {
        return no_data("vote", Some(candidate), q.slots.year);
    }
    Outcome::Answered(Answer::Votes(VoteReport {
        candidate: candidate.to_string(),
        lines: rows
            .iter()
            .map(|r| VoteLine {
                year: r.year,
                constituency: r.constituency.clone(),
                votes: r.votes,
                won: r.winner,
            })
            .collect(),
    }))
}

fn margin_query(ds: &Dataset, settings: &EngineSettings, q: &Query) -> Outcome {
    let year = year_or_latest(ds, settings, q.slots.year);
    match q.slots.constituency.as_deref() {
        None => Outcome::Specify {
            what: "a constituency",
            example: "What was the margin in Kovalam in 2024?".to_string(),
        },
        Some(c) => match margin(ds, year, c) {
            Some(m) => Outcome::Answered(Answer::Margin(m)),
            None => no_data("margin", Some(c), Some(year)),
        },
    }
}

/// The constituency with the smallest gap between its two best candidates.
///
/// Without a year, all rows of a constituency are ranked together.
pub fn closest_contest(ds: &Dataset, year: Option<u32>) -> Option<ClosestReport> {
    let rows = ds.select(&RowFilter {
        year,
        ..Default::default()
    });
    let mut seen: Vec<&str> = Vec::new();
    for r in rows.iter() {
        if !seen.contains(&r.constituency.as_str()) {
            seen.push(r.constituency.as_str());
        }
    }

    let mut best: Option<ClosestReport> = None;
    for c in seen {
        let const_rows: Vec<&ElectionRecord> = rows
            .iter()
            .filter(|r| r.constituency == c)
            .cloned()
            .collect();
        let sorted = by_votes_desc(&const_rows);
        if let [first, second, ..] = sorted.as_slice() {
            let m = first.votes.saturating_sub(second.votes);
            if best.as_ref().map_or(true, |b| m < b.margin) {
                best = Some(ClosestReport {
                    scope_year: year,
                    constituency: c.to_string(),
                    year: first.year,
                    winner: first.candidate.clone(),
                    runner_up: second.candidate.clone(),
                    margin: m,
                });
            }
        }
    }
    best
}

fn closest(ds: &Dataset, q: &Query) -> Outcome {
    match closest_contest(ds, q.slots.year) {
        Some(c) => Outcome::Answered(Answer::Closest(c)),
        None => no_data("contest", None, q.slots.year),
    }
}

fn flagged_winner(ds: &Dataset, year: u32, constituency: &str) -> Option<Option<Placing>> {
    let rows = ds.select(&RowFilter {
        year: Some(year),
        constituency: Some(constituency),
        ..Default::default()
    });
    if rows.is_empty() {
        return None;
    }
    Some(rows.iter().find(|r| r.winner).map(|r| Placing::of(r)))
}

fn comparison(ds: &Dataset, q: &Query) -> Outcome {
    let (years, constituency) = match (q.years_in_text.as_slice(), q.slots.constituency.as_deref()) {
        ([y1, y2, ..], Some(c)) => ((*y1, *y2), c),
        _ => {
            return Outcome::Specify {
                what: "two years and a constituency",
                example: "Compare 2023 and 2024 in Nemom".to_string(),
            }
        }
    };
    let first = flagged_winner(ds, years.0, constituency);
    let second = flagged_winner(ds, years.1, constituency);
    match (first, second) {
        (Some(first), Some(second)) => Outcome::Answered(Answer::Comparison(ComparisonReport {
            constituency: constituency.to_string(),
            first_year: years.0,
            second_year: years.1,
            first,
            second,
        })),
        _ => Outcome::NoData(NoData {
            topic: "comparison",
            subject: Some(format!("{} ({} and {})", constituency, years.0, years.1)),
            year: None,
            hint: None,
        }),
    }
}

/// Seats and votes of a party, optionally for one year.
pub fn party_performance(ds: &Dataset, party: &str, year: Option<u32>) -> Option<PartyReport> {
    let rows = ds.select(&RowFilter {
        year,
        party: Some(party),
        ..Default::default()
    });
    if rows.is_empty() {
        return None;
    }
    let wins: Vec<&&ElectionRecord> = rows.iter().filter(|r| r.winner).collect();
    Some(PartyReport {
        party: party.to_string(),
        year,
        seats: wins.len(),
        total_votes: rows.iter().map(|r| r.votes).sum(),
        constituencies: wins.iter().map(|r| r.constituency.clone()).collect(),
    })
}

fn party(ds: &Dataset, q: &Query) -> Outcome {
    match q.slots.party.as_deref() {
        None => Outcome::Specify {
            what: "a party",
            example: "How many seats did CPI win in 2024?".to_string(),
        },
        Some(p) => match party_performance(ds, p, q.slots.year) {
            Some(report) => Outcome::Answered(Answer::Party(report)),
            None => no_data("party", Some(p), q.slots.year),
        },
    }
}

/// Constituency count and seats per party in a district.
pub fn district_report(ds: &Dataset, district: &str, year: Option<u32>) -> Option<DistrictReport> {
    let rows = ds.select(&RowFilter {
        year,
        district: Some(district),
        ..Default::default()
    });
    if rows.is_empty() {
        return None;
    }
    let mut constituencies: Vec<&str> = Vec::new();
    let mut seats_by_party: BTreeMap<String, usize> = BTreeMap::new();
    for r in rows.iter() {
        if !constituencies.contains(&r.constituency.as_str()) {
            constituencies.push(r.constituency.as_str());
        }
        if r.winner {
            *seats_by_party.entry(r.party.clone()).or_insert(0) += 1;
        }
    }
    Some(DistrictReport {
        district: district.to_string(),
        year,
        constituencies: constituencies.len(),
        seats_by_party,
    })
}

fn district_summary(ds: &Dataset, q: &Query) -> Outcome {
    match q.slots.district.as_deref() {
        None => Outcome::Specify {
            what: "a district",
            example: "Show results for Kollam district".to_string(),
        },
        Some(d) => match district_report(ds, d, q.slots.year) {
            Some(report) => Outcome::Answered(Answer::District(report)),
            None => no_data("district", Some(d), q.slots.year),
        },
    }
}

/// Booth details. The leading candidate is found by scanning the votes; the
/// stored winner flag is not consulted.
pub fn booth_report(ds: &Dataset, booth_id: u64) -> Option<BoothReport> {
    let rows = ds.booth_rows(booth_id);
    let info = rows.first()?;

    let mut leader: Option<Placing> = None;
    let mut max_votes: u64 = 0;
    for r in rows.iter() {
        if r.votes > max_votes {
            max_votes = r.votes;
            leader = Some(Placing {
                candidate: r.candidate.clone(),
                party: r.party.clone(),
                votes: r.votes,
            });
        }
    }
    let counted: u64 = rows.iter().map(|r| r.votes).sum();
    let leader_share = match (&leader, counted) {
        (Some(l), c) if c > 0 => Some(l.votes as f64 * 100.0 / c as f64),
        _ => None,
    };
    let turnout = if info.total_voters > 0 {
        Some(info.votes_polled as f64 * 100.0 / info.total_voters as f64)
    } else {
        None
    };

    Some(BoothReport {
        booth_id,
        booth_name: info.booth_name.clone(),
        constituency: info.constituency.clone(),
        district: info.district.clone(),
        total_voters: info.total_voters,
        votes_polled: info.votes_polled,
        turnout,
        leader,
        leader_share,
    })
}

fn booth(ds: &Dataset, q: &Query) -> Outcome {
    let booth_id = match q.slots.booth_id {
        Some(id) => id,
        None => return Outcome::Answered(Answer::Fallback),
    };
    match booth_report(ds, booth_id) {
        Some(report) => Outcome::Answered(Answer::Booth(report)),
        None => Outcome::NoData(NoData {
            topic: "booth",
            // As written: ids too large for a u64 are saturated in the slot.
            subject: Some(format!(
                "booth {}",
                booth_digits(q.text).unwrap_or_else(|| booth_id.to_string())
            )),
            year: None,
            hint: Some(match ds.booth_id_range() {
                Some((lo, hi)) => format!("Try booth IDs between {}-{}.", lo, hi),
                None => "No booth data is loaded.".to_string(),
            }),
        }),
    }
}

fn constituency_overview(ds: &Dataset, settings: &EngineSettings, q: &Query) -> Outcome {
    let year = year_or_latest(ds, settings, q.slots.year);
    q.slots
        .constituency
        .as_deref()
        .and_then(|c| margin(ds, year, c))
        .map_or(Outcome::Decline, |m| {
            Outcome::Answered(Answer::ConstituencyOverview(m))
        })
}

fn district_overview(ds: &Dataset, q: &Query) -> Outcome {
    q.slots
        .district
        .as_deref()
        .and_then(|d| district_report(ds, d, q.slots.year))
        .map_or(Outcome::Decline, |r| {
            Outcome::Answered(Answer::DistrictOverview(r))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::rec;

    fn booth_rec(booth_id: u64, candidate: &str, party: &str, votes: u64, winner: bool) -> BoothRecord {
        BoothRecord {
            year: 2024,
            district: "Kollam".to_string(),
            constituency: "Kundara".to_string(),
            booth_id,
            booth_name: format!("Booth {} - LP School North", booth_id),
            total_voters: 1000,
            votes_polled: 800,
            postal_votes: 16,
            tendered_votes: 2,
            candidate: candidate.to_string(),
            party: party.to_string(),
            votes,
            winner,
        }
    }

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                rec(2024, "Thiruvananthapuram", "Nemom", "A", "CPI", 50000, true),
                rec(2024, "Thiruvananthapuram", "Nemom", "B", "INC", 45000, false),
                rec(2024, "Thiruvananthapuram", "Kovalam", "C", "BJP", 30000, true),
                rec(2024, "Thiruvananthapuram", "Kovalam", "D", "CPI", 29000, false),
                rec(2024, "Thiruvananthapuram", "Kovalam", "E", "INC", 1000, false),
                rec(2024, "Kollam", "Kundara", "F", "INC", 41000, true),
                rec(2024, "Kollam", "Kundara", "G", "CPI", 40500, false),
                rec(2024, "Kollam", "Punalur", "H", "CPI", 12000, true),
                rec(2023, "Thiruvananthapuram", "Nemom", "B", "INC", 47000, true),
                rec(2023, "Thiruvananthapuram", "Nemom", "A", "CPI", 46900, false),
                rec(2023, "Kollam", "Kundara", "F", "INC", 30000, true),
                rec(2023, "Kollam", "Kundara", "G", "CPI", 20000, false),
            ],
            Some(vec![
                booth_rec(1001, "F", "INC", 300, false),
                booth_rec(1001, "G", "CPI", 420, true),
                booth_rec(1001, "H", "BJP", 80, false),
                booth_rec(1002, "F", "INC", 0, false),
            ]),
        )
    }

    fn query(text: &str, slots: ExtractedSlots) -> Query {
        Query {
            text,
            slots,
            years_in_text: vec![],
        }
    }

    fn at(year: Option<u32>, constituency: &str) -> ExtractedSlots {
        ExtractedSlots {
            year,
            constituency: Some(constituency.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn margin_is_top_minus_second() {
        let ds = dataset();
        let m = margin(&ds, 2024, "Kovalam").unwrap();
        assert_eq!(m.winner.candidate, "C");
        assert_eq!(m.runner_up.candidate, "D");
        assert_eq!(m.margin, 1000);
        assert_eq!(margin(&ds, 2024, "Punalur"), None);
        assert_eq!(margin(&ds, 2025, "Nemom"), None);
    }

    #[test]
    fn winner_defaults_to_latest_year() {
        let ds = dataset();
        let q = query("who won in nemom", at(None, "Nemom"));
        match winner(&ds, &EngineSettings::DEFAULT, &q) {
            Outcome::Answered(Answer::Winner(WinnerReport::Constituency {
                year,
                winner,
                margin,
                ..
            })) => {
                assert_eq!(year, 2024);
                assert_eq!(winner.candidate, "A");
                assert_eq!(winner.votes, 50000);
                assert_eq!(margin, Some(5000));
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn winner_of_district_lists_every_seat() {
        let ds = dataset();
        let slots = ExtractedSlots {
            district: Some("Kollam".to_string()),
            ..Default::default()
        };
        match winner(&ds, &EngineSettings::DEFAULT, &query("", slots)) {
            Outcome::Answered(Answer::Winner(WinnerReport::District { winners, .. })) => {
                let names: Vec<&str> = winners.iter().map(|(c, _)| c.as_str()).collect();
                assert_eq!(names, vec!["Kundara", "Punalur"]);
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn winner_needs_a_location() {
        let ds = dataset();
        let out = winner(&ds, &EngineSettings::DEFAULT, &query("who won", ExtractedSlots::default()));
        assert!(matches!(out, Outcome::Specify { what: "a district or constituency", .. }));
        let out = winner(&ds, &EngineSettings::DEFAULT, &query("", at(Some(2025), "Nemom")));
        assert!(matches!(out, Outcome::NoData(NoData { topic: "winner", year: Some(2025), .. })));
    }

    #[test]
    fn runner_up_and_missing_partition() {
        let ds = dataset();
        match runner_up(&ds, &EngineSettings::DEFAULT, &query("", at(Some(2023), "Nemom"))) {
            Outcome::Answered(Answer::RunnerUp(m)) => {
                assert_eq!(m.runner_up.candidate, "A");
                assert_eq!(m.margin, 100);
            }
            x => panic!("unexpected {:?}", x),
        }
        let out = runner_up(&ds, &EngineSettings::DEFAULT, &query("", at(None, "Punalur")));
        assert!(matches!(out, Outcome::NoData(_)));
    }

    #[test]
    fn vote_count_single_and_multiple() {
        let ds = dataset();
        let slots = ExtractedSlots {
            candidate: Some("A".to_string()),
            ..Default::default()
        };
        match vote_count(&ds, &query("", slots.clone())) {
            Outcome::Answered(Answer::Votes(v)) => {
                assert_eq!(v.lines.len(), 2);
                assert!(v.lines[0].won);
                assert!(!v.lines[1].won);
            }
            x => panic!("unexpected {:?}", x),
        }
        let one = ExtractedSlots {
            year: Some(2023),
            ..slots
        };
        match vote_count(&ds, &query("", one)) {
            Outcome::Answered(Answer::Votes(v)) => {
                assert_eq!(v.lines.len(), 1);
                assert_eq!(v.lines[0].votes, 46900);
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn closest_contest_fixture() {
        let ds = dataset();
        let c = closest_contest(&ds, Some(2024)).unwrap();
        assert_eq!(c.constituency, "Kundara");
        assert_eq!(c.margin, 500);
        let c = closest_contest(&ds, Some(2023)).unwrap();
        assert_eq!(c.constituency, "Nemom");
        assert_eq!(c.margin, 100);
        assert_eq!(closest_contest(&ds, Some(2025)), None);
    }

    #[test]
    fn closest_contest_ties_keep_first_constituency() {
        let ds = Dataset::new(
            vec![
                rec(2024, "X", "First", "a", "P", 10, true),
                rec(2024, "X", "First", "b", "Q", 7, false),
                rec(2024, "X", "Second", "c", "P", 20, true),
                rec(2024, "X", "Second", "d", "Q", 17, false),
            ],
            None,
        );
        assert_eq!(closest_contest(&ds, None).unwrap().constituency, "First");
    }

    #[test]
    fn comparison_reports_change() {
        let ds = dataset();
        let q = Query {
            text: "compare 2023 and 2024 in nemom",
            slots: at(Some(2023), "Nemom"),
            years_in_text: vec![2023, 2024],
        };
        match comparison(&ds, &q) {
            Outcome::Answered(Answer::Comparison(c)) => {
                assert_eq!(c.first.as_ref().unwrap().candidate, "B");
                assert_eq!(c.second.as_ref().unwrap().candidate, "A");
                assert!(c.winner_changed());
            }
            x => panic!("unexpected {:?}", x),
        }
        let q = Query {
            years_in_text: vec![2024],
            ..q
        };
        assert!(matches!(comparison(&ds, &q), Outcome::Specify { .. }));
    }

    #[test]
    fn party_seats_match_independent_count() {
        let ds = dataset();
        for party in ["CPI", "INC", "BJP"] {
            for year in [2023, 2024] {
                let expected = ds
                    .records()
                    .iter()
                    .filter(|r| r.party == party && r.year == year && r.winner)
                    .count();
                let got = party_performance(&ds, party, Some(year)).map_or(0, |p| p.seats);
                assert_eq!(got, expected, "{} {}", party, year);
            }
        }
        let cpi = party_performance(&ds, "CPI", Some(2024)).unwrap();
        assert_eq!(cpi.total_votes, 50000 + 29000 + 40500 + 12000);
        assert_eq!(cpi.constituencies, vec!["Nemom", "Punalur"]);
    }

    #[test]
    fn district_report_groups_by_party() {
        let ds = dataset();
        let r = district_report(&ds, "Thiruvananthapuram", Some(2024)).unwrap();
        assert_eq!(r.constituencies, 2);
        assert_eq!(r.seats_by_party.get("CPI"), Some(&1));
        assert_eq!(r.seats_by_party.get("BJP"), Some(&1));
        assert_eq!(r.seats_by_party.get("INC"), None);
        let all_years = district_report(&ds, "Kollam", None).unwrap();
        assert_eq!(all_years.seats_by_party.get("INC"), Some(&2));
        assert_eq!(district_report(&ds, "Wayanad", None), None);
    }

    #[test]
    fn booth_leader_ignores_winner_flag() {
        let ds = dataset();
        let b = booth_report(&ds, 1001).unwrap();
        assert_eq!(b.leader.as_ref().unwrap().candidate, "G");
        assert_eq!(b.turnout, Some(80.0));
        assert_eq!(b.leader_share, Some(52.5));

        // All-zero booths have no leader.
        let empty = booth_report(&ds, 1002).unwrap();
        assert_eq!(empty.leader, None);
        assert_eq!(empty.leader_share, None);
    }

    #[test]
    fn unknown_booth_is_no_data() {
        let ds = dataset();
        let slots = ExtractedSlots {
            booth_id: Some(4242),
            ..Default::default()
        };
        match booth(&ds, &query("booth 4242", slots)) {
            Outcome::NoData(nd) => {
                assert_eq!(nd.subject.as_deref(), Some("booth 4242"));
                assert_eq!(nd.hint.as_deref(), Some("Try booth IDs between 1001-1002."));
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn unknown_booth_keeps_the_digits_as_written() {
        let ds = dataset();
        let text = "who won booth 123456789012345678901234";
        let slots = ExtractedSlots {
            booth_id: crate::extract::booth_id(text),
            ..Default::default()
        };
        assert_eq!(slots.booth_id, Some(u64::MAX));
        match booth(&ds, &query(text, slots)) {
            Outcome::NoData(nd) => {
                assert_eq!(nd.subject.as_deref(), Some("booth 123456789012345678901234"));
            }
            x => panic!("unexpected {:?}", x),
        }
    }

    #[test]
    fn overviews_decline_without_data() {
        let ds = dataset();
        let out = constituency_overview(&ds, &EngineSettings::DEFAULT, &query("", at(None, "Punalur")));
        assert_eq!(out, Outcome::Decline);
        let slots = ExtractedSlots {
            district: Some("Kollam".to_string()),
            year: Some(2025),
            ..Default::default()
        };
        assert_eq!(district_overview(&ds, &query("", slots)), Outcome::Decline);
    }
}
