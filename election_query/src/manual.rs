/*!

This is the long-form manual for `election_query` and `pollytics`.

## Input tables

### Election results

One row per candidate, constituency and year:

| field          | type    | notes                          |
|----------------|---------|--------------------------------|
| `year`         | integer | election year                  |
| `district`     | text    |                                |
| `constituency` | text    |                                |
| `candidate`    | text    |                                |
| `party`        | text    | party code such as `CPI`       |
| `votes`        | integer |                                |
| `winner`       | text    | `"Yes"` or `"No"`              |

Exactly one row of each (year, constituency) is expected to be marked as the
winner. The flag is trusted as is.

### Booth results (optional)

The same fields as above for one polling booth, plus `booth_id`, `booth_name`,
`total_voters` and `votes_polled`. `postal_votes` and `tendered_votes` may be
omitted.

## Questions

Questions are matched against the following categories, in this order. The
first category that matches decides the answer, even if the question would
also match a later one.

1. **Booth**: the question mentions `booth 1001`, `booth id 1001` or
   `booth1001`. Reports the booth location, the turnout and the leading
   candidate with their share of the booth votes.
2. **Winner**: `who won`, `winner`, `won in`, `victory`, `elected`. Needs a
   district or a constituency. With a district only, all the winners of the
   district are listed.
3. **Runner-up**: `runner up`, `runner-up`, `second place`, `came second`,
   `2nd place`. Needs a constituency.
4. **Votes**: `how many votes`, `votes did`, `vote count`, `total votes`. Needs
   a candidate. Without a year, every election of the candidate is listed.
5. **Margin**: `margin`, `won by`. Needs a constituency.
6. **Closest contest**: `closest`, `narrowest`, `tightest`, `nail-biter`.
7. **Comparison**: `compare`, `comparison`, `vs`, `versus`,
   `difference between`. Needs two years and a constituency.
8. **Party**: `party`, `seats`. Needs a party code.
9. **District summary**: `results for`, `show results`, `all results`,
   `district summary`. Needs a district.
10. **Exit polls**: `exit poll`, `prediction`, `forecast`.
11. **Help**: `help`, `what can you`, `how to use`.
12. A question that only names a constituency gets a short overview of its
    result, and one that only names a district gets its seat counts.

Anything else gets the fallback message.

Phrases are matched anywhere in the lowercased question, including inside
other words: `canvs` counts as `vs`.

## Years

Only the years listed in the settings (2023, 2024 and 2025 by default) are
recognized, and only as whole words. Winner, runner-up, margin and
constituency overview questions without a year use the most recent year of
the data. The other categories consider every year.

## Names

Districts, constituencies and candidates are first looked up as exact
substrings of the question, ignoring case. If no location is found, the
words of four letters or more are compared to the known names with a
similarity ratio, so that `Alapuzha` finds `Alappuzha`. Districts are
tried before constituencies. The cutoff is 0.6 by default.

Candidate names are only matched approximately when the word is capitalized.
Party codes are never matched approximately.

## Configuration

The `pollytics` program reads an optional JSON configuration file:

```json
{
  "electionFile": "elections.json",
  "boothFile": "booths.json",
  "supportedYears": [2023, 2024, 2025],
  "fuzzyCutoff": 0.6,
  "fallbackYear": 2024
}
```

Relative paths are resolved against the directory of the configuration file.
The command line options `--elections` and `--booths` take precedence.

*/
