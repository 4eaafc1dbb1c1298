use clap::Parser;

/// Answers questions about Kerala election results.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file. It may name the data files and
    /// change the recognized years and the fuzzy matching cutoff. Paths in the file are
    /// relative to the file itself. See the manual of the election_query crate for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The election results, as a JSON list of records. Setting this option
    /// overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub elections: Option<String>,

    /// (file path, optional) The booth results, as a JSON list of records. Setting this
    /// option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub booths: Option<String>,

    /// (text, repeatable) A question to answer. If no question is given, questions are
    /// read from the standard input, one per line.
    #[clap(short, long, value_parser)]
    pub query: Vec<String>,

    /// (file path) A reference transcript in JSON format. If provided, pollytics will
    /// check that the answers match the reference.
    #[clap(short, long, value_parser)]
    pub transcript: Option<String>,

    /// If passed as an argument, answers are printed as HTML instead of markdown emphasis.
    #[clap(long, takes_value = false)]
    pub html: bool,

    /// If passed as an argument, prints some example questions and exits.
    #[clap(long, takes_value = false)]
    pub examples: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
