//! Entity extraction: turns a free-text question into `ExtractedSlots`.
//!
//! Every field is extracted independently. Exact (case-insensitive)
//! substring matches are tried first; districts, constituencies and candidates
//! then fall back to fuzzy matching of individual words.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::config::*;
use crate::dataset::Dataset;
use crate::similarity::closest_match;

lazy_static! {
    static ref YEAR_TOKEN: Regex = Regex::new(r"\b(\d{4})\b").unwrap();
    static ref BOOTH_ID: Regex = Regex::new(r"booth\s*(?:id\s*)?(\d+)").unwrap();
    static ref LONG_WORD: Regex = Regex::new(r"\b[a-zA-Z]{4,}\b").unwrap();
    static ref CAPITALIZED_WORD: Regex = Regex::new(r"\b[A-Z][a-z]+\b").unwrap();
}

/// Generic question words that are never treated as misspelled place names.
const LOCATION_STOP_WORDS: &[&str] = &[
    "what",
    "which",
    "where",
    "when",
    "winner",
    "votes",
    "party",
    "margin",
    "results",
    "show",
    "tell",
    "about",
    "many",
    "district",
    "constituency",
    "election",
    "booth",
    "compare",
    "between",
];

pub struct EntityExtractor<'a> {
    dataset: &'a Dataset,
    settings: &'a EngineSettings,
}

impl<'a> EntityExtractor<'a> {
    pub fn new(dataset: &'a Dataset, settings: &'a EngineSettings) -> EntityExtractor<'a> {
        EntityExtractor { dataset, settings }
    }

    pub fn extract(&self, text: &str) -> ExtractedSlots {
        let (district, constituency) = self.location(text);
        let slots = ExtractedSlots {
            year: self.year(text),
            district,
            constituency,
            candidate: self.candidate(text),
            party: self.party(text),
            booth_id: booth_id(text),
        };
        debug!("extract: {:?} -> {:?}", text, slots);
        slots
    }

    /// All the supported years appearing as whole words, in textual order.
    pub fn years(&self, text: &str) -> Vec<u32> {
        YEAR_TOKEN
            .captures_iter(text)
            .filter_map(|c| c[1].parse::<u32>().ok())
            .filter(|y| self.settings.supported_years.contains(y))
            .collect()
    }

    pub fn year(&self, text: &str) -> Option<u32> {
        self.years(text).first().cloned()
    }

    /// Returns the (district, constituency) pair mentioned in the text.
    ///
    /// With several names in the text, the first one in table order wins,
    /// not the first one in the text.
    pub fn location(&self, text: &str) -> (Option<String>, Option<String>) {
        let text_lower = text.to_lowercase();
        let mut district = first_contained(self.dataset.districts(), &text_lower);
        let mut constituency = first_contained(self.dataset.constituencies(), &text_lower);

        if district.is_none() && constituency.is_none() {
            let cutoff = self.settings.fuzzy_cutoff;
            for word in LONG_WORD.find_iter(text).map(|m| m.as_str()) {
                if LOCATION_STOP_WORDS.contains(&word.to_lowercase().as_str()) {
                    continue;
                }
                if let Some(m) = closest_match(word, self.dataset.districts(), cutoff) {
                    debug!("location: fuzzy district {:?} -> {:?}", word, m);
                    district = Some(m.to_string());
                    break;
                }
                if let Some(m) = closest_match(word, self.dataset.constituencies(), cutoff) {
                    debug!("location: fuzzy constituency {:?} -> {:?}", word, m);
                    constituency = Some(m.to_string());
                    break;
                }
            }
        }
        (district, constituency)
    }

    pub fn candidate(&self, text: &str) -> Option<String> {
        let text_lower = text.to_lowercase();
        if let Some(c) = first_contained(self.dataset.candidates(), &text_lower) {
            return Some(c);
        }
        CAPITALIZED_WORD
            .find_iter(text)
            .find_map(|m| {
                closest_match(
                    m.as_str(),
                    self.dataset.candidates(),
                    self.settings.fuzzy_cutoff,
                )
            })
            .map(|c| c.to_string())
    }

    /// Party codes are short and would collide under fuzzy matching: only
    /// exact substrings count.
    pub fn party(&self, text: &str) -> Option<String> {
        let text_upper = text.to_uppercase();
        self.dataset
            .parties()
            .iter()
            .find(|p| text_upper.contains(&p.to_uppercase()))
            .cloned()
    }
}

fn first_contained(names: &[String], text_lower: &str) -> Option<String> {
    names
        .iter()
        .find(|n| text_lower.contains(&n.to_lowercase()))
        .cloned()
}

/// The digits after "booth", "booth id" or "booth" with no space, without
/// leading zeros. No fuzzy fallback.
pub fn booth_digits(text: &str) -> Option<String> {
    let text_lower = text.to_lowercase();
    BOOTH_ID.captures(&text_lower).map(|c| {
        let digits = c[1].trim_start_matches('0');
        if digits.is_empty() {
            "0".to_string()
        } else {
            digits.to_string()
        }
    })
}

/// The booth number in the text. Numbers too large for a `u64` saturate: they
/// still name a booth, one that no table contains.
pub fn booth_id(text: &str) -> Option<u64> {
    booth_digits(text).map(|d| d.parse::<u64>().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::rec;

    fn dataset() -> Dataset {
        Dataset::new(
            vec![
                rec(2024, "Thiruvananthapuram", "Nemom", "Suresh", "CPI", 50000, true),
                rec(2024, "Thiruvananthapuram", "Nemom", "Rajan", "INC", 45000, false),
                rec(2024, "Thiruvananthapuram", "Kovalam", "Meera", "BJP", 30000, true),
                rec(2024, "Thiruvananthapuram", "Kovalam", "Anand", "CPIM", 20000, false),
                rec(2024, "Kollam", "Kundara", "Priya", "INC", 41000, true),
                rec(2024, "Kollam", "Kundara", "Manoj", "CPI", 40000, false),
                rec(2023, "Alappuzha", "Haripad", "Deepa", "KC(M)", 39000, true),
                rec(2023, "Alappuzha", "Haripad", "Sunil", "INC", 38000, false),
            ],
            None,
        )
    }

    #[test]
    fn year_alone_regardless_of_context() {
        let ds = dataset();
        let ex = EntityExtractor::new(&ds, &EngineSettings::DEFAULT);
        for text in [
            "2024",
            "Who won in Nemom in 2024?",
            "in 2024, who won",
            "(2024) results please",
            "what happened during the 2024 election at Kundara",
        ] {
            assert_eq!(ex.year(text), Some(2024), "{}", text);
        }
        assert_eq!(ex.year("Who won in 2019?"), None);
        assert_eq!(ex.year("Code 20245 or x2024"), None);
        assert_eq!(ex.year("Compare 2023 and 2025"), Some(2023));
        assert_eq!(ex.years("Compare 2025 with 2023"), vec![2025, 2023]);
    }

    #[test]
    fn exact_locations_are_case_insensitive() {
        let ds = dataset();
        let ex = EntityExtractor::new(&ds, &EngineSettings::DEFAULT);
        assert_eq!(
            ex.location("who won in NEMOM?"),
            (None, Some("Nemom".to_string()))
        );
        assert_eq!(
            ex.location("show results for kollam district"),
            (Some("Kollam".to_string()), None)
        );
    }

    #[test]
    fn table_order_beats_text_order() {
        let ds = dataset();
        let ex = EntityExtractor::new(&ds, &EngineSettings::DEFAULT);
        let (d, _) = ex.location("Kollam or Thiruvananthapuram?");
        assert_eq!(d.as_deref(), Some("Thiruvananthapuram"));
        let (_, c) = ex.location("Kundara then Nemom");
        assert_eq!(c.as_deref(), Some("Nemom"));
    }

    #[test]
    fn fuzzy_district_boundary() {
        let ds = dataset();
        let ex = EntityExtractor::new(&ds, &EngineSettings::DEFAULT);
        // One letter dropped: well above the cutoff.
        assert_eq!(
            ex.location("Who won in Alapuzha?"),
            (Some("Alappuzha".to_string()), None)
        );
        // "kolm" vs "kollam": 4 matches over 10 characters, ratio 0.8.
        assert_eq!(ex.location("kolm"), (Some("Kollam".to_string()), None));
        // "Kxyzqwm" vs "kollam": only "k" and "m" match, ratio 4/13.
        assert_eq!(ex.location("Kxyzqwm"), (None, None));
    }

    #[test]
    fn fuzzy_constituency_after_districts() {
        let ds = dataset();
        let ex = EntityExtractor::new(&ds, &EngineSettings::DEFAULT);
        assert_eq!(
            ex.location("what about Haripaad"),
            (None, Some("Haripad".to_string()))
        );
        // "kovalum" is within the cutoff of "kollam" (8/13), and districts
        // are tried before constituencies.
        assert_eq!(
            ex.location("what about Kovalum"),
            (Some("Kollam".to_string()), None)
        );
    }

    #[test]
    fn stop_words_are_not_fuzzy_matched() {
        let ds = dataset();
        let ex = EntityExtractor::new(&ds, &EngineSettings::DEFAULT);
        assert_eq!(ex.location("show me the margin"), (None, None));
    }

    #[test]
    fn candidates_exact_then_fuzzy() {
        let ds = dataset();
        let ex = EntityExtractor::new(&ds, &EngineSettings::DEFAULT);
        assert_eq!(ex.candidate("votes for suresh"), Some("Suresh".to_string()));
        assert_eq!(
            ex.candidate("How many votes did Sures get?"),
            Some("Suresh".to_string())
        );
        // Lowercase words are not candidates for fuzzy matching.
        assert_eq!(ex.candidate("how many votes did sures get"), None);
    }

    #[test]
    fn parties_exact_only() {
        let ds = dataset();
        let ex = EntityExtractor::new(&ds, &EngineSettings::DEFAULT);
        assert_eq!(ex.party("how many seats did kc(m) win"), Some("KC(M)".to_string()));
        assert_eq!(ex.party("how many seats did cpi win"), Some("CPI".to_string()));
        assert_eq!(ex.party("how many seats did BJ win"), None);
    }

    #[test]
    fn booth_ids() {
        assert_eq!(booth_id("Tell me about booth 1001"), Some(1001));
        assert_eq!(booth_id("BOOTH ID 1042"), Some(1042));
        assert_eq!(booth_id("booth1005"), Some(1005));
        assert_eq!(booth_id("booth abc"), None);
        assert_eq!(booth_id("booth 99999999999"), Some(99999999999));
        assert_eq!(booth_id("booth 99999999999999999999"), Some(u64::MAX));
        assert_eq!(booth_id("booth 0042"), Some(42));
        assert_eq!(booth_id("booth 000"), Some(0));
        assert_eq!(
            booth_digits("booth 00123456789012345678901234").as_deref(),
            Some("123456789012345678901234")
        );
        assert_eq!(booth_id("show booth statistics"), None);
    }

    #[test]
    fn full_extraction() {
        let ds = dataset();
        let ex = EntityExtractor::new(&ds, &EngineSettings::DEFAULT);
        let slots = ex.extract("How many votes did Suresh get in Nemom in 2024?");
        assert_eq!(
            slots,
            ExtractedSlots {
                year: Some(2024),
                district: None,
                constituency: Some("Nemom".to_string()),
                candidate: Some("Suresh".to_string()),
                party: None,
                booth_id: None,
            }
        );
    }
}
