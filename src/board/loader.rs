//! Clue file loading
//!
//! Reads a delimited text file into a [`Board`]. The delimiter is sniffed
//! from the header line. Rows that lack a required field are skipped and
//! reported; fields that cannot be coerced fall back to defaults from
//! [`crate::constants::clue`]. Only a missing file, an unreadable file, or a
//! header without the required columns fails the whole load.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use csv::ReaderBuilder;
use itertools::Itertools;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::clue::{DEFAULT_POINTS, DEFAULT_ROUND, DEFAULT_TIME_LIMIT};

use super::{
    Board, Choice, Clue, RoundKey,
    columns::{ColumnMapping, Columns, RawRow},
};

/// Errors that abort loading a clue file
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file does not exist
    #[error("clue file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The file exists but could not be read
    #[error("failed to read clue file")]
    Io(#[from] io::Error),
    /// The file is not valid delimited text
    #[error("malformed clue file")]
    Csv(#[from] csv::Error),
    /// The header lacks a column every clue needs
    #[error("missing required column `{0}`")]
    MissingColumn(&'static str),
}

/// Why a row was left out of the board
#[derive(Error, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The category cell is blank
    #[error("row has no category")]
    MissingCategory,
    /// The prompt cell is blank
    #[error("row has no prompt")]
    MissingPrompt,
    /// Neither a reveal cell nor any option is present
    #[error("row has no answer or options")]
    MissingReveal,
    /// The point column exists but the cell is blank
    #[error("row has no point value")]
    MissingPoints,
}

/// Outcome of loading a clue file
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// The grouped clues
    pub board: Board,
    /// Line number and reason of every skipped row
    pub skipped: Vec<(u64, SkipReason)>,
    /// Number of cells that fell back to a default value
    pub coerced: usize,
}

/// A clue together with where it goes on the board
struct Entry {
    key: RoundKey,
    category: String,
    clue: Clue,
    coerced: usize,
}

/// Picks the delimiter for a file from its header line
///
/// Tab if the header contains one, comma otherwise.
pub fn sniff_delimiter(header_line: &str) -> u8 {
    if header_line.contains('\t') { b'\t' } else { b',' }
}

/// Parses a point cell
///
/// Accepts a plain integer, or else takes the first run of digits in a
/// decorated label such as `$1,000` (grouping commas inside the run are
/// ignored).
///
/// # Returns
///
/// `None` if the label contains no digits
pub fn parse_points(label: &str) -> Option<i64> {
    let label = label.trim();
    if let Ok(points) = label.parse() {
        return Some(points);
    }

    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == ',')
        .filter(char::is_ascii_digit)
        .collect();

    digits.parse().ok()
}

/// Parses a correct-option indicator
///
/// `1`-`4` and `A`-`D` select an option by position; any other non-empty
/// text is kept for matching against the option texts.
pub fn parse_correct(cell: &str) -> Option<Choice> {
    let cell = cell.trim();
    let mut chars = cell.chars();
    match (chars.next(), chars.next()) {
        (None, _) => None,
        (Some(c @ '1'..='4'), None) => Some(Choice::Index(c as usize - '1' as usize)),
        (Some(c), None) if ('A'..='D').contains(&c.to_ascii_uppercase()) => {
            Some(Choice::Index(c.to_ascii_uppercase() as usize - 'A' as usize))
        }
        _ => Some(Choice::Text(cell.to_owned())),
    }
}

/// Turns one row into a board entry
///
/// # Errors
///
/// Returns the [`SkipReason`] if a required field is blank.
fn build_clue(row: &RawRow<'_>, line: u64) -> Result<Entry, SkipReason> {
    if row.category.is_empty() {
        return Err(SkipReason::MissingCategory);
    }
    if row.prompt.is_empty() {
        return Err(SkipReason::MissingPrompt);
    }
    if row.reveal.is_empty() && row.options.is_empty() {
        return Err(SkipReason::MissingReveal);
    }

    let mut coerced = 0;

    let (points, label) = match row.points {
        None => (DEFAULT_POINTS, DEFAULT_POINTS.to_string()),
        Some("") => return Err(SkipReason::MissingPoints),
        Some(cell) => {
            let points = parse_points(cell).unwrap_or_else(|| {
                warn!(line, cell, fallback = DEFAULT_POINTS, "unparseable point value");
                coerced += 1;
                DEFAULT_POINTS
            });
            (points, cell.to_owned())
        }
    };

    let time_limit = row.time.map(|cell| {
        let seconds = match cell {
            "" => DEFAULT_TIME_LIMIT,
            cell => cell.parse::<u64>().unwrap_or_else(|_| {
                warn!(line, cell, fallback = DEFAULT_TIME_LIMIT, "unparseable time limit");
                coerced += 1;
                DEFAULT_TIME_LIMIT
            }),
        };
        Duration::from_secs(seconds)
    });

    let number = match row.round.filter(|cell| !cell.is_empty()) {
        None => DEFAULT_ROUND,
        Some(cell) => cell.parse().unwrap_or_else(|_| {
            warn!(line, cell, fallback = DEFAULT_ROUND, "unparseable round number");
            coerced += 1;
            DEFAULT_ROUND
        }),
    };

    let key = RoundKey {
        air_date: row
            .air_date
            .filter(|air_date| !air_date.is_empty())
            .map(str::to_owned),
        number,
    };

    let clue = Clue::new(row.prompt, row.reveal, points)
        .with_label(label)
        .with_options(
            row.options.iter().map(|option| (*option).to_owned()).collect_vec(),
            parse_correct(row.correct),
        )
        .with_time_limit(time_limit);

    Ok(Entry {
        key,
        category: row.category.to_owned(),
        clue,
        coerced,
    })
}

/// Loads clue file contents that are already in memory
///
/// # Errors
///
/// Returns a [`LoadError`] if the header is unreadable or lacks a required
/// column.
pub fn parse_str(text: &str, mapping: ColumnMapping) -> Result<LoadReport, LoadError> {
    let text = text.trim_start_matches('\u{feff}');
    let delimiter = sniff_delimiter(text.lines().next().unwrap_or_default());

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = Columns::from_headers(reader.headers()?, mapping)?;

    let mut report = LoadReport::default();
    let mut entries = Vec::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, csv::Position::line);
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        match build_clue(&columns.row(&record), line) {
            Ok(entry) => {
                report.coerced += entry.coerced;
                entries.push((entry.key, entry.category, entry.clue));
            }
            Err(reason) => {
                debug!(line, %reason, "skipping row");
                report.skipped.push((line, reason));
            }
        }
    }

    report.board = Board::from_entries(entries);
    Ok(report)
}

/// Loads a clue file and reports skipped rows
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the file does not exist, and the other
/// [`LoadError`] variants as described in [`parse_str`].
pub fn load_report(path: &Path, mapping: ColumnMapping) -> Result<LoadReport, LoadError> {
    let text = fs::read_to_string(path).map_err(|error| match error.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io(error),
    })?;

    let report = parse_str(&text, mapping)?;

    info!(
        path = %path.display(),
        rounds = report.board.rounds().len(),
        clues = report.board.clue_count(),
        skipped = report.skipped.len(),
        coerced = report.coerced,
        "loaded clue file"
    );

    Ok(report)
}

/// Loads a clue file
///
/// # Errors
///
/// See [`load_report`].
pub fn load(path: &Path, mapping: ColumnMapping) -> Result<Board, LoadError> {
    load_report(path, mapping).map(|report| report.board)
}

/// Lists clue files in a directory for the file selection screen
///
/// A file qualifies when its name starts with `prefix` and its extension is
/// `extension`. The result is sorted by file name.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be read.
pub fn discover_files(dir: &Path, prefix: &str, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path.is_file()
            && path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(prefix))
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == extension);
        if matches {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Category;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SIMPLE: &str = "category,question,answer,points\n\
        Science,What is H2O?,Water,100\n\
        History,Who was first president?,Washington,200\n";

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("category\tquestion"), b'\t');
        assert_eq!(sniff_delimiter("category,question"), b',');
        assert_eq!(sniff_delimiter(""), b',');
    }

    #[test]
    fn test_parse_points() {
        assert_eq!(parse_points("100"), Some(100));
        assert_eq!(parse_points(" -200 "), Some(-200));
        assert_eq!(parse_points("$400"), Some(400));
        assert_eq!(parse_points("$1,000"), Some(1000));
        assert_eq!(parse_points("Daily Double 800 or 1200"), Some(800));
        assert_eq!(parse_points("FINAL"), None);
        assert_eq!(parse_points(""), None);
    }

    #[test]
    fn test_parse_correct() {
        assert_eq!(parse_correct("1"), Some(Choice::Index(0)));
        assert_eq!(parse_correct("4"), Some(Choice::Index(3)));
        assert_eq!(parse_correct("b"), Some(Choice::Index(1)));
        assert_eq!(parse_correct(" D "), Some(Choice::Index(3)));
        assert_eq!(parse_correct("5"), Some(Choice::Text("5".to_owned())));
        assert_eq!(parse_correct("Paris"), Some(Choice::Text("Paris".to_owned())));
        assert_eq!(parse_correct(""), None);
    }

    #[test]
    fn test_simple_csv_loads_one_implicit_round() {
        let report = parse_str(SIMPLE, ColumnMapping::Standard).unwrap();
        let board = report.board;

        assert_eq!(board.rounds().len(), 1);
        assert_eq!(board.rounds()[0].key(), &RoundKey::default());
        assert_eq!(board.clue_count(), 2);
        assert!(report.skipped.is_empty());

        let science = &board.rounds()[0].categories()[1];
        assert_eq!(science.name(), "Science");
        assert_eq!(science.clues()[0].prompt(), "What is H2O?");
        assert_eq!(science.clues()[0].reveal(), "Water");
        assert_eq!(science.clues()[0].points(), 100);
        assert_eq!(science.clues()[0].time_limit(), None);
    }

    #[test]
    fn test_counts_and_sorting_across_categories() {
        let text = "category,question,answer,points\n\
            A,q1,a1,300\n\
            B,q2,a2,100\n\
            A,q3,a3,100\n\
            C,q4,a4,500\n\
            A,q5,a5,200\n\
            B,q6,a6,50\n";
        let board = parse_str(text, ColumnMapping::Standard).unwrap().board;
        let round = &board.rounds()[0];

        assert_eq!(board.clue_count(), 6);
        assert_eq!(round.categories().len(), 3);
        for category in round.categories() {
            let points = category.clues().iter().map(Clue::points).collect_vec();
            let mut sorted = points.clone();
            sorted.sort_unstable();
            assert_eq!(points, sorted, "category {} is unsorted", category.name());
        }
        assert_eq!(
            round.categories().iter().map(Category::name).collect_vec(),
            vec!["A", "B", "C"]
        );
    }

    #[test]
    fn test_rows_missing_required_fields_are_skipped() {
        let text = "category,question,answer,points\n\
            Science,What is H2O?,Water,100\n\
            ,Orphan prompt,Answer,200\n\
            History,,Nobody,300\n\
            History,No answer,,400\n\
            History,No points,Answer,\n\
            History,Who was first president?,Washington,200\n";
        let report = parse_str(text, ColumnMapping::Standard).unwrap();

        assert_eq!(report.board.clue_count(), 2);
        assert_eq!(
            report.skipped,
            vec![
                (3, SkipReason::MissingCategory),
                (4, SkipReason::MissingPrompt),
                (5, SkipReason::MissingReveal),
                (6, SkipReason::MissingPoints),
            ]
        );
    }

    #[test]
    fn test_tab_separated_archive_with_rounds() {
        let text = "air_date\tround\tcategory\tclue_value\tanswer\tquestion\n\
            1984-09-10\t1\tLAKES\t200\tLargest of the Great Lakes\tWhat is Superior?\n\
            1984-09-10\t2\tRIVERS\t400\tFlows through Cairo\tWhat is the Nile?\n\
            1984-09-10\tthree\tFINAL\t0\tThe final clue\tWhat is final?\n\
            1984-09-11\t1\tLAKES\t$600\tShallowest Great Lake\tWhat is Erie?\n";
        let report = parse_str(text, ColumnMapping::Archive).unwrap();
        let board = report.board;

        assert_eq!(report.coerced, 1);
        let keys = board
            .rounds()
            .iter()
            .map(|round| (round.key().air_date.clone().unwrap(), round.key().number))
            .collect_vec();
        assert_eq!(
            keys,
            vec![
                ("1984-09-10".to_owned(), 1),
                ("1984-09-10".to_owned(), 2),
                ("1984-09-11".to_owned(), 1),
            ]
        );

        let first = &board.rounds()[0];
        let lakes = first.categories().iter().find(|c| c.name() == "LAKES").unwrap();
        assert_eq!(lakes.clues()[0].prompt(), "Largest of the Great Lakes");
        assert_eq!(lakes.clues()[0].reveal(), "What is Superior?");

        let finale = first.categories().iter().find(|c| c.name() == "FINAL").unwrap();
        assert!(finale.clues()[0].is_final());

        let later = &board.rounds()[2].categories()[0].clues()[0];
        assert_eq!(later.points(), 600);
        assert_eq!(later.label(), "$600");
    }

    #[test]
    fn test_multiple_choice_rows_with_time_and_label() {
        let text = "subtype,question,option1,option2,option3,option4,correct,time,square_text\n\
            Geography,Capital of France?,Berlin,Paris,Rome,Madrid,B,15,$200\n\
            Geography,Capital of Italy?,Berlin,Paris,Rome,Madrid,Rome,soon,FINAL ROUND\n";
        let report = parse_str(text, ColumnMapping::Standard).unwrap();
        let clues = report.board.rounds()[0].categories()[0].clues();

        assert_eq!(report.coerced, 2);
        assert_eq!(clues[0].points(), 100);
        assert_eq!(clues[0].label(), "FINAL ROUND");
        assert_eq!(clues[0].correct_option(), Some(2));
        assert_eq!(clues[0].reveal(), "Rome");
        assert_eq!(clues[0].time_limit(), Some(Duration::from_secs(20)));

        assert_eq!(clues[1].points(), 200);
        assert_eq!(clues[1].correct_option(), Some(1));
        assert_eq!(clues[1].options().len(), 4);
        assert_eq!(clues[1].time_limit(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_blank_time_and_round_use_defaults() {
        let text = "category,question,answer,value,round,time\nScience,What is H2O?,Water,100,,\n";
        let report = parse_str(text, ColumnMapping::Standard).unwrap();
        let round = &report.board.rounds()[0];

        assert_eq!(report.coerced, 0);
        assert_eq!(round.key().number, DEFAULT_ROUND);
        assert_eq!(
            round.categories()[0].clues()[0].time_limit(),
            Some(Duration::from_secs(DEFAULT_TIME_LIMIT))
        );
    }

    #[test]
    fn test_missing_point_column_uses_default() {
        let text = "category,question,answer\nScience,What is H2O?,Water\n";
        let board = parse_str(text, ColumnMapping::Standard).unwrap().board;
        let clue = &board.rounds()[0].categories()[0].clues()[0];

        assert_eq!(clue.points(), DEFAULT_POINTS);
        assert_eq!(clue.label(), "100");
    }

    #[test]
    fn test_quoted_fields_and_blank_lines() {
        let text = "category,question,answer,points\n\
            \"Quotes, Inc.\",\"Who said \"\"hi\"\"?\",Me,100\n\
            ,,,\n";
        let report = parse_str(text, ColumnMapping::Standard).unwrap();
        let category = &report.board.rounds()[0].categories()[0];

        assert_eq!(category.name(), "Quotes, Inc.");
        assert_eq!(category.clues()[0].prompt(), "Who said \"hi\"?");
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let result = parse_str("topic,question,answer\nx,y,z\n", ColumnMapping::Standard);
        assert!(matches!(result, Err(LoadError::MissingColumn("category"))));

        let empty = parse_str("", ColumnMapping::Standard);
        assert!(matches!(empty, Err(LoadError::MissingColumn("category"))));
    }

    #[test]
    fn test_load_from_disk_and_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q_science.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SIMPLE.as_bytes()).unwrap();

        let board = load(&path, ColumnMapping::Standard).unwrap();
        assert_eq!(board.clue_count(), 2);

        let missing = load(&dir.path().join("nope.txt"), ColumnMapping::Standard);
        assert!(matches!(missing, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_discover_files_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["q2.txt", "q1.txt", "notes.txt", "q3.tsv", "quiz.txt"] {
            std::fs::write(dir.path().join(name), SIMPLE).unwrap();
        }
        std::fs::create_dir(dir.path().join("q_dir.txt")).unwrap();

        let names = discover_files(dir.path(), "q", "txt")
            .unwrap()
            .into_iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect_vec();

        assert_eq!(names, vec!["q1.txt", "q2.txt", "quiz.txt"]);
    }
}
