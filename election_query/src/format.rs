//! Response templates.
//!
//! Names and key numbers are wrapped in `**` so that a presentation layer can
//! make them bold (see `emphasis_to_html`). Nothing else is rendered here.

use lazy_static::lazy_static;
use regex::Regex;

use crate::handlers::*;

lazy_static! {
    static ref EMPHASIS: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
}

pub const HELP_TEXT: &str = "**Kerala Election Chatbot - Help**

I can answer questions about Kerala election data! Here's what you can ask:

**Winner Queries:**
• \"Who won in Thiruvananthapuram in 2024?\"
• \"Winner of Nemom constituency\"

**Vote Queries:**
• \"How many votes did Suresh get?\"
• \"Vote count for BJP in 2024\"

**Margin & Comparison:**
• \"What was the margin in Kovalam?\"
• \"Compare 2023 and 2024 in Nemom\"

**District/Party Info:**
• \"Show results for Kollam district\"
• \"How many seats did CPI win?\"

**Special Queries:**
• \"Which constituency had the closest contest?\"
• \"Who was the runner up in Alappuzha?\"
• \"Tell me about booth 1001\"

Just type your question naturally!";

pub const FALLBACK_TEXT: &str = "I cannot answer that question.

I can only answer questions about Kerala election data such as:

• **Winners:** \"Who won in Thiruvananthapuram in 2024?\"
• **Results:** \"Show results for Kollam district\"
• **Votes:** \"How many votes did Suresh get?\"
• **Margins:** \"What was the margin in Nemom?\"
• **Party seats:** \"How many seats did CPI win?\"

Type **\"help\"** for more examples!";

pub const EXIT_POLL_TEXT: &str = "**Exit Poll Predictions:**

I provide analysis based on actual election results data. For exit poll predictions, please check official news sources!

I can help you with:
• Historical results (2023-2025)
• Winner information
• Vote margins
• Party performance";

pub const EXAMPLE_QUESTIONS: &[&str] = &[
    "Who won in Thiruvananthapuram in 2024?",
    "Show results for Kollam district",
    "What was the margin in Nemom?",
    "How many seats did CPI win in 2024?",
    "Which constituency had the closest contest?",
    "Compare 2023 and 2024 in Vattiyoorkavu",
];

/// Formats an integer with comma thousands separators: `45000` -> `45,000`.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut res = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            res.push(',');
        }
        res.push(c);
    }
    res
}

/// A percentage with one decimal place: `72.44` -> `72.4%`.
pub fn format_percent(pct: f64) -> String {
    format!("{:.1}%", pct)
}

/// Converts the emphasis markup to HTML, the way the chat page displays
/// answers: `**x**` becomes `<b>x</b>` and newlines become `<br>`.
pub fn emphasis_to_html(text: &str) -> String {
    EMPHASIS
        .replace_all(text, "<b>$1</b>")
        .replace("\n\n", "<br><br>")
        .replace('\n', "<br>")
}

fn year_suffix(prefix: &str, year: Option<u32>, suffix: &str) -> String {
    year.map_or(String::new(), |y| format!("{}{}{}", prefix, y, suffix))
}

pub fn render(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Answered(answer) => render_answer(answer),
        Outcome::Specify { what, example } => {
            format!("Please specify {}. For example: '{}'", what, example)
        }
        Outcome::NoData(nd) => render_no_data(nd),
        // Only produced by overview rules, which are followed by the fallback.
        Outcome::Decline => FALLBACK_TEXT.to_string(),
    }
}

fn render_no_data(nd: &NoData) -> String {
    let mut res = format!("I couldn't find {} data", nd.topic);
    if let Some(s) = &nd.subject {
        res.push_str(&format!(" for {}", s));
    }
    res.push_str(&year_suffix(" in ", nd.year, ""));
    res.push('.');
    match &nd.hint {
        Some(h) => res.push_str(&format!(" {}", h)),
        None => res.push_str(" Please check the name and year."),
    }
    res
}

fn render_answer(answer: &Answer) -> String {
    match answer {
        Answer::Winner(w) => render_winner(w),
        Answer::RunnerUp(m) => format!(
            "**Runner-up in {} ({}):**\n\n**{}** ({})\nVotes: {}\n\nLost to {} by {} votes.",
            m.constituency,
            m.year,
            m.runner_up.candidate,
            m.runner_up.party,
            format_number(m.runner_up.votes),
            m.winner.candidate,
            format_number(m.margin)
        ),
        Answer::Votes(v) => render_votes(v),
        Answer::Margin(m) => format!(
            "**Margin in {} ({}):**\n\nWinner: **{}** ({}) - {} votes\nRunner-up: **{}** ({}) - {} votes\n\n**Winning Margin: {} votes**",
            m.constituency,
            m.year,
            m.winner.candidate,
            m.winner.party,
            format_number(m.winner.votes),
            m.runner_up.candidate,
            m.runner_up.party,
            format_number(m.runner_up.votes),
            format_number(m.margin)
        ),
        Answer::Closest(c) => format!(
            "**Closest Contest{}:**\n\n**{}** ({})\nWinner: {}\nRunner-up: {}\nMargin: **Only {} votes!**",
            year_suffix(" in ", c.scope_year, ""),
            c.constituency,
            c.year,
            c.winner,
            c.runner_up,
            format_number(c.margin)
        ),
        Answer::Comparison(c) => render_comparison(c),
        Answer::Party(p) => render_party(p),
        Answer::District(d) => {
            let mut res = format!(
                "**{} District{}:**\n\nConstituencies: {}\n\n**Party-wise Wins:**\n",
                d.district,
                year_suffix(" (", d.year, ")"),
                d.constituencies
            );
            res.push_str(&seat_lines(d));
            res
        }
        Answer::Booth(b) => render_booth(b),
        Answer::ExitPoll => EXIT_POLL_TEXT.to_string(),
        Answer::Help => HELP_TEXT.to_string(),
        Answer::ConstituencyOverview(m) => format!(
            "**{} ({}):**\n\nWinner: **{}** ({})\nVotes: {}\nMargin: {} votes",
            m.constituency,
            m.year,
            m.winner.candidate,
            m.winner.party,
            format_number(m.winner.votes),
            format_number(m.margin)
        ),
        Answer::DistrictOverview(d) => {
            let mut res = format!(
                "**{} District{}:**\n\n{} constituencies\n\n",
                d.district,
                year_suffix(" (", d.year, ")"),
                d.constituencies
            );
            res.push_str(&seat_lines(d));
            res
        }
        Answer::Fallback => FALLBACK_TEXT.to_string(),
    }
}

fn render_winner(w: &WinnerReport) -> String {
    match w {
        WinnerReport::Constituency {
            year,
            constituency,
            winner,
            margin,
        } => {
            let margin_text = margin.map_or(String::new(), |m| {
                format!(" with a margin of {} votes", format_number(m))
            });
            format!(
                "**{}** ({}) won in **{}** in {}{}!\n\nTotal Votes: {}",
                winner.candidate,
                winner.party,
                constituency,
                year,
                margin_text,
                format_number(winner.votes)
            )
        }
        WinnerReport::District {
            year,
            district,
            winners,
        } => {
            let mut res = format!("**Winners in {} District ({}):**\n\n", district, year);
            for (constituency, p) in winners {
                res.push_str(&format!(
                    "• **{}**: {} ({}) - {} votes\n",
                    constituency,
                    p.candidate,
                    p.party,
                    format_number(p.votes)
                ));
            }
            res
        }
    }
}

fn render_votes(v: &VoteReport) -> String {
    match v.lines.as_slice() {
        [line] => format!(
            "**{}** received **{}** votes in {} ({}).",
            v.candidate,
            format_number(line.votes),
            line.constituency,
            line.year
        ),
        lines => {
            let mut res = format!("**Vote counts for {}:**\n\n", v.candidate);
            for l in lines {
                res.push_str(&format!(
                    "• {} - {}: {} votes{}\n",
                    l.year,
                    l.constituency,
                    format_number(l.votes),
                    if l.won { " (Won)" } else { "" }
                ));
            }
            res
        }
    }
}

fn render_comparison(c: &ComparisonReport) -> String {
    let line = |p: &Option<Placing>| match p {
        Some(p) => format!("{} ({}) - {} votes", p.candidate, p.party, format_number(p.votes)),
        None => "N/A (N/A) - 0 votes".to_string(),
    };
    format!(
        "**Comparison: {}**\n\n**{}:**\n{}\n\n**{}:**\n{}\n\n{}",
        c.constituency,
        c.first_year,
        line(&c.first),
        c.second_year,
        line(&c.second),
        if c.winner_changed() {
            "Winner changed!"
        } else {
            "Same winner"
        }
    )
}

fn render_party(p: &PartyReport) -> String {
    let mut res = format!(
        "**{} Performance{}:**\n\nSeats Won: **{}**\nTotal Votes: {}",
        p.party,
        year_suffix(" in ", p.year, ""),
        p.seats,
        format_number(p.total_votes)
    );
    if !p.constituencies.is_empty() && p.constituencies.len() <= 5 {
        res.push_str(&format!("\n\nWon in: {}", p.constituencies.join(", ")));
    }
    res
}

fn seat_lines(d: &DistrictReport) -> String {
    d.seats_by_party
        .iter()
        .map(|(party, seats)| format!("• {}: {} seat(s)\n", party, seats))
        .collect()
}

fn render_booth(b: &BoothReport) -> String {
    let mut res = format!("**Booth {}** - {}\n\n", b.booth_id, b.booth_name);
    res.push_str(&format!("Location: {}, {}\n", b.constituency, b.district));
    res.push_str(&format!("Total Voters: {}\n", format_number(b.total_voters)));
    res.push_str(&format!("Votes Polled: {}", format_number(b.votes_polled)));
    if let Some(t) = b.turnout {
        res.push_str(&format!(" ({} turnout)", format_percent(t)));
    }
    res.push_str("\n\n");
    if let Some(l) = &b.leader {
        res.push_str(&format!(
            "Winner: **{}** ({}) - {} votes",
            l.candidate,
            l.party,
            format_number(l.votes)
        ));
        if let Some(share) = b.leader_share {
            res.push_str(&format!(" ({} of booth votes)", format_percent(share)));
        }
    }
    res.trim_end().to_string()
}
