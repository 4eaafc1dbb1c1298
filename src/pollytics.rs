use log::{debug, info, warn};

use election_query::builder::Builder;
use election_query::format::emphasis_to_html;
use election_query::*;
use snafu::{prelude::*, Snafu};

use std::borrow::Cow;
use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use text_diff::print_diff;

use crate::args::Args;

#[derive(Debug, Snafu)]
pub enum PollyticsError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the transcript"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error reading questions from the standard input"))]
    ReadingStdin { source: std::io::Error },
    #[snafu(display("Invalid settings: {source}"))]
    BuildingEngine { source: EngineErrors },
    #[snafu(display("No election file: use --elections or electionFile in the configuration"))]
    MissingElectionFile {},

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PollyticsResult<T> = Result<T, PollyticsError>;

#[derive(PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(rename = "electionFile")]
    pub election_file: Option<String>,
    #[serde(rename = "boothFile")]
    pub booth_file: Option<String>,
    #[serde(rename = "supportedYears")]
    pub supported_years: Option<Vec<u32>>,
    #[serde(rename = "fuzzyCutoff")]
    pub fuzzy_cutoff: Option<f64>,
    #[serde(rename = "fallbackYear")]
    pub fallback_year: Option<u32>,
}

impl QueryConfig {
    pub fn settings(&self) -> EngineSettings {
        let d = EngineSettings::DEFAULT;
        EngineSettings {
            supported_years: match &self.supported_years {
                Some(years) => Cow::Owned(years.clone()),
                None => d.supported_years,
            },
            fuzzy_cutoff: self.fuzzy_cutoff.unwrap_or(d.fuzzy_cutoff),
            fallback_year: self.fallback_year.unwrap_or(d.fallback_year),
        }
    }
}

/// One question and its answer, as stored in a transcript file.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

fn read_json<T: DeserializeOwned>(path: &str) -> PollyticsResult<T> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_json: {} bytes from {:?}", contents.len(), path);
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

/// Reads a configuration file. The paths it contains are resolved against the
/// directory of the file.
pub fn read_config(path: &str) -> PollyticsResult<QueryConfig> {
    let config: QueryConfig = read_json(path)?;
    info!("config: {:?}", config);
    let root = Path::new(path).parent().unwrap_or_else(|| Path::new(""));
    let resolve = |p: &Option<String>| -> Option<String> {
        p.as_ref().map(|p| {
            let full: PathBuf = root.join(p);
            full.as_path().display().to_string()
        })
    };
    Ok(QueryConfig {
        election_file: resolve(&config.election_file),
        booth_file: resolve(&config.booth_file),
        ..config
    })
}

/// Builds the engine from the configuration file and the command line paths,
/// which take precedence.
pub fn load_engine(
    config_path: Option<&str>,
    elections: Option<&str>,
    booths: Option<&str>,
) -> PollyticsResult<QueryEngine> {
    let config = match config_path {
        Some(p) => read_config(p)?,
        None => QueryConfig::default(),
    };
    let settings = config.settings();

    let election_path = elections
        .map(|s| s.to_string())
        .or(config.election_file)
        .context(MissingElectionFileSnafu {})?;
    info!("Attempting to read election file {:?}", election_path);
    let records: Vec<ElectionRecord> = read_json(&election_path)?;

    let builder = Builder::new(&settings)
        .context(BuildingEngineSnafu {})?
        .elections(records);
    let builder = match booths.map(|s| s.to_string()).or(config.booth_file) {
        Some(booth_path) => {
            info!("Attempting to read booth file {:?}", booth_path);
            let rows: Vec<BoothRecord> = read_json(&booth_path)?;
            builder.booths(rows)
        }
        None => builder,
    };
    Ok(builder.build())
}

fn read_questions() -> PollyticsResult<Vec<String>> {
    let stdin = std::io::stdin();
    let lines: Vec<String> = stdin
        .lock()
        .lines()
        .collect::<Result<Vec<String>, std::io::Error>>()
        .context(ReadingStdinSnafu {})?;
    Ok(lines
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .collect())
}

pub fn answer_all(engine: &QueryEngine, questions: &[String], html: bool) -> Vec<Exchange> {
    questions
        .iter()
        .map(|q| {
            let answer = engine.process_query(q);
            Exchange {
                question: q.clone(),
                answer: if html {
                    emphasis_to_html(&answer)
                } else {
                    answer
                },
            }
        })
        .collect()
}

/// Compares the answers with a reference transcript and prints the differences.
pub fn check_transcript(exchanges: &[Exchange], reference_path: &str) -> PollyticsResult<()> {
    let reference: Vec<Exchange> = read_json(reference_path)?;
    let pretty_ref = serde_json::to_string_pretty(&reference).context(WritingJsonSnafu {})?;
    let pretty_answers = serde_json::to_string_pretty(&exchanges).context(WritingJsonSnafu {})?;
    if pretty_ref != pretty_answers {
        warn!("Found differences with the reference transcript");
        print_diff(pretty_ref.as_str(), pretty_answers.as_str(), "\n");
        whatever!("Difference detected between the answers and the reference transcript")
    }
    Ok(())
}

pub fn run(args: &Args) -> PollyticsResult<()> {
    if args.examples {
        for q in QueryEngine::example_questions() {
            println!("{}", q);
        }
        return Ok(());
    }

    let engine = load_engine(
        args.config.as_deref(),
        args.elections.as_deref(),
        args.booths.as_deref(),
    )?;

    let questions = if args.query.is_empty() {
        read_questions()?
    } else {
        args.query.clone()
    };

    let exchanges = answer_all(&engine, &questions, args.html);
    for e in exchanges.iter() {
        println!("> {}\n{}\n", e.question, e.answer);
    }

    if let Some(reference) = &args.transcript {
        check_transcript(&exchanges, reference)?;
    }
    Ok(())
}
