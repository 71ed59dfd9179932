//! Header recognition for clue files
//!
//! Clue files come from several sources whose headers disagree on case,
//! spacing, and naming. Headers are normalized to snake case and matched
//! against alias lists, producing a [`Columns`] index that the loader uses to
//! pull typed fields out of each record.

use csv::StringRecord;
use heck::ToSnakeCase;
use serde::{Deserialize, Serialize};

use crate::constants::clue::MAX_OPTION_COUNT;

use super::loader::LoadError;

/// Which columns supply the prompt and the reveal text
///
/// Some clue archives call the text read to the teams the "answer" and the
/// expected reply the "question". `Standard` reads the prompt from the
/// question column; `Archive` reads it from the answer column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnMapping {
    /// Prompt from `question`, reveal from `answer`
    #[default]
    Standard,
    /// Prompt from `answer`, reveal from `question`
    Archive,
}

/// A recognized column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Category,
    AirDate,
    Round,
    Question,
    Answer,
    Option(usize),
    Correct,
    Time,
    Points,
}

impl Field {
    /// Recognizes a normalized header name
    fn from_header(name: &str) -> Option<Self> {
        Some(match name {
            "category" | "subtype" => Self::Category,
            "air_date" => Self::AirDate,
            "round" => Self::Round,
            "question" | "clue" | "prompt" => Self::Question,
            "answer" | "response" => Self::Answer,
            "correct" => Self::Correct,
            "time" | "time_limit" => Self::Time,
            "square_text" | "clue_value" | "cluevalue" | "points" | "value" => Self::Points,
            other => {
                let index = other
                    .strip_prefix("option")?
                    .trim_start_matches('_')
                    .parse::<usize>()
                    .ok()?;
                if (1..=MAX_OPTION_COUNT).contains(&index) {
                    Self::Option(index - 1)
                } else {
                    return None;
                }
            }
        })
    }
}

/// Normalizes a raw header cell for matching
pub fn normalize_header(raw: &str) -> String {
    raw.trim().trim_start_matches('\u{feff}').to_snake_case()
}

/// Positions of the recognized columns in a clue file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    category: usize,
    air_date: Option<usize>,
    round: Option<usize>,
    prompt: usize,
    reveal: Option<usize>,
    options: [Option<usize>; MAX_OPTION_COUNT],
    correct: Option<usize>,
    time: Option<usize>,
    points: Option<usize>,
}

/// The cells of one record, trimmed
///
/// Optional fields are `None` when the file has no such column and
/// `Some("")` when the column exists but the cell is blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow<'a> {
    /// Category cell
    pub category: &'a str,
    /// Air date cell
    pub air_date: Option<&'a str>,
    /// Round number cell
    pub round: Option<&'a str>,
    /// Prompt cell
    pub prompt: &'a str,
    /// Reveal cell
    pub reveal: &'a str,
    /// Option cells in column order, without trailing blanks
    pub options: Vec<&'a str>,
    /// Correct indicator cell
    pub correct: &'a str,
    /// Time limit cell
    pub time: Option<&'a str>,
    /// Point value cell
    pub points: Option<&'a str>,
}

impl Columns {
    /// Builds the column index from a header record
    ///
    /// When a header name repeats, the first occurrence wins.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingColumn`] if there is no category column or
    /// no column supplying the prompt under `mapping`.
    pub fn from_headers(headers: &StringRecord, mapping: ColumnMapping) -> Result<Self, LoadError> {
        let mut category = None;
        let mut air_date = None;
        let mut round = None;
        let mut question = None;
        let mut answer = None;
        let mut options = [None; MAX_OPTION_COUNT];
        let mut correct = None;
        let mut time = None;
        let mut points = None;

        for (position, header) in headers.iter().enumerate() {
            let slot = match Field::from_header(&normalize_header(header)) {
                Some(Field::Category) => &mut category,
                Some(Field::AirDate) => &mut air_date,
                Some(Field::Round) => &mut round,
                Some(Field::Question) => &mut question,
                Some(Field::Answer) => &mut answer,
                Some(Field::Option(index)) => &mut options[index],
                Some(Field::Correct) => &mut correct,
                Some(Field::Time) => &mut time,
                Some(Field::Points) => &mut points,
                None => continue,
            };
            slot.get_or_insert(position);
        }

        let (prompt, reveal, prompt_name) = match mapping {
            ColumnMapping::Standard => (question, answer, "question"),
            ColumnMapping::Archive => (answer, question, "answer"),
        };

        Ok(Self {
            category: category.ok_or(LoadError::MissingColumn("category"))?,
            prompt: prompt.ok_or(LoadError::MissingColumn(prompt_name))?,
            air_date,
            round,
            reveal,
            options,
            correct,
            time,
            points,
        })
    }

    /// Whether the file groups clues into dated rounds
    pub fn has_rounds(&self) -> bool {
        self.air_date.is_some() || self.round.is_some()
    }

    /// Extracts the recognized cells of a record
    pub fn row<'a>(&self, record: &'a StringRecord) -> RawRow<'a> {
        let cell = |position: usize| record.get(position).map_or("", str::trim);
        let optional = |position: Option<usize>| position.map(cell);

        let mut options = self
            .options
            .iter()
            .map(|position| position.map_or("", cell))
            .collect::<Vec<_>>();
        while options.last().is_some_and(|option| option.is_empty()) {
            options.pop();
        }

        RawRow {
            category: cell(self.category),
            air_date: optional(self.air_date),
            round: optional(self.round),
            prompt: cell(self.prompt),
            reveal: optional(self.reveal).unwrap_or_default(),
            options,
            correct: optional(self.correct).unwrap_or_default(),
            time: optional(self.time),
            points: optional(self.points),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn headers(cells: &[&str]) -> StringRecord {
        StringRecord::from(cells.to_vec())
    }

    #[test]
    fn test_normalize_header_variants() {
        assert_eq!(normalize_header(" Clue Value "), "clue_value");
        assert_eq!(normalize_header("clueValue"), "clue_value");
        assert_eq!(normalize_header("\u{feff}category"), "category");
        assert_eq!(normalize_header("Option 3"), "option_3");
        assert_eq!(normalize_header("AIR_DATE"), "air_date");
    }

    #[test]
    fn test_field_from_header() {
        assert_eq!(Field::from_header("subtype"), Some(Field::Category));
        assert_eq!(Field::from_header("option1"), Some(Field::Option(0)));
        assert_eq!(Field::from_header("option_4"), Some(Field::Option(3)));
        assert_eq!(Field::from_header("option5"), None);
        assert_eq!(Field::from_header("options"), None);
        assert_eq!(Field::from_header("square_text"), Some(Field::Points));
        assert_eq!(Field::from_header("notes"), None);
    }

    #[test]
    fn test_standard_mapping_reads_question_as_prompt() {
        let columns = Columns::from_headers(
            &headers(&["Category", "Question", "Answer", "Points"]),
            ColumnMapping::Standard,
        )
        .unwrap();
        let record = headers(&["Science", " What is H2O? ", "Water", "100"]);
        let row = columns.row(&record);

        assert_eq!(row.category, "Science");
        assert_eq!(row.prompt, "What is H2O?");
        assert_eq!(row.reveal, "Water");
        assert_eq!(row.points, Some("100"));
        assert_eq!(row.time, None);
        assert!(!columns.has_rounds());
    }

    #[test]
    fn test_archive_mapping_swaps_prompt_and_reveal() {
        let columns = Columns::from_headers(
            &headers(&["air_date", "round", "category", "clue_value", "answer", "question"]),
            ColumnMapping::Archive,
        )
        .unwrap();
        let record = headers(&["1984-09-10", "1", "LAKES", "200", "It's the largest", "What is Superior?"]);
        let row = columns.row(&record);

        assert_eq!(row.prompt, "It's the largest");
        assert_eq!(row.reveal, "What is Superior?");
        assert_eq!(row.air_date, Some("1984-09-10"));
        assert!(columns.has_rounds());
    }

    #[test]
    fn test_missing_required_columns() {
        let missing_category =
            Columns::from_headers(&headers(&["question", "answer"]), ColumnMapping::Standard);
        assert!(matches!(missing_category, Err(LoadError::MissingColumn("category"))));

        let missing_prompt =
            Columns::from_headers(&headers(&["category", "question"]), ColumnMapping::Archive);
        assert!(matches!(missing_prompt, Err(LoadError::MissingColumn("answer"))));
    }

    #[test]
    fn test_options_keep_positions_and_drop_trailing_blanks() {
        let columns = Columns::from_headers(
            &headers(&["subtype", "question", "option1", "option2", "option3", "option4", "correct"]),
            ColumnMapping::Standard,
        )
        .unwrap();
        let record = headers(&["Colors", "Sky?", "Red", "", "Blue"]);
        let row = columns.row(&record);

        assert_eq!(row.options, vec!["Red", "", "Blue"]);
        assert_eq!(row.correct, "");
        assert_eq!(row.reveal, "");
    }
}
