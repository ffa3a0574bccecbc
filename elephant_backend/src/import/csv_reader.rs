use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use super::ParticipantData;

/// Column layout of an uploaded participant list.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct CSVReaderConfig {
    name_column: Option<CSVNameCol>,
    email_column: Option<usize>,
    delimiter: Option<u8>,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
#[serde(tag = "type")]
enum CSVNameCol {
    FirstLast { first: usize, last: usize },
    Full { column: usize },
}

#[derive(Debug, Error)]
pub enum CSVParserErr {
    #[error("Could not parse participant list: {0}")]
    ParseError(#[from] csv::Error),
    #[error("Could not read participant list: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Row has no column {index}")]
    IndexOutOfBounds { index: usize },
    #[error("No name column found in the participant list")]
    BadConfig,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
enum CSVField {
    FullName,
    FirstName,
    LastName,
    Email,
}

#[derive(Debug)]
pub struct ParseResult {
    pub data: Vec<ParticipantData>,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ParseWarning {
    SkippedRowPartialEntry { index: usize },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::SkippedRowPartialEntry { index } => write!(f, "Skipped row {} without a name", index + 1),
        }
    }
}


impl CSVReaderConfig {
    pub fn default_from_file<R>(mut reader: R) -> Result<CSVReaderConfig, CSVParserErr>
    where
        R: std::io::Read,
    {
        let delimiter_candidates = [b',', b';', b'\t'];
        let mut delimiter_counts = [0; 3];
        let mut buffer = Vec::new();

        reader.read_to_end(&mut buffer)?;

        // Only the header line decides, so commas inside later rows do not
        // outvote the real separator.
        let header_line = buffer.split(|c| *c == b'\n').next().unwrap_or(&[]);
        for char in header_line.iter() {
            for (i, delimiter) in delimiter_candidates.iter().enumerate() {
                if char == delimiter {
                    delimiter_counts[i] += 1;
                }
            }
        }

        let delimiter = delimiter_counts
            .into_iter()
            .enumerate()
            .max_by_key(|(i, c)| (*c, std::cmp::Reverse(*i)))
            .map(|(i, _)| delimiter_candidates[i])
            .unwrap_or(b',');
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(&buffer[..]);
        let headers = reader.headers()?;

        let mut config = Self::propose_config_from_headers(headers.into_iter());
        config.delimiter = Some(delimiter);
        Ok(config)
    }

    fn propose_config_from_headers<'a, I>(headers: I) -> CSVReaderConfig
    where
        I: Iterator<Item = &'a str>,
    {
        lazy_static! {
            static ref FIELD_HEADER_PATTERNS: HashMap<CSVField, Regex> = {
                let full_name_patterns: Vec<&str> = vec!["name", "teilnehmer", "participant"];
                let first_name_patterns: Vec<&str> = vec!["first.?name", "given.?name", "vorname"];
                let last_name_patterns: Vec<&str> = vec!["last.?name", "surname", "family.?name", "nachname"];
                let email_patterns: Vec<&str> = vec!["e-?mail", "mail", "contact"];

                let mut m = HashMap::new();
                m.insert(CSVField::FullName, full_name_patterns);
                m.insert(CSVField::FirstName, first_name_patterns);
                m.insert(CSVField::LastName, last_name_patterns);
                m.insert(CSVField::Email, email_patterns);

                m.into_iter()
                    .filter_map(|(key, patterns)| {
                        RegexBuilder::new(&patterns.join("|"))
                            .case_insensitive(true)
                            .build()
                            .ok()
                            .map(|regex| (key, regex))
                    })
                    .collect()
            };
        }

        let mut proposed_column_assignment = HashMap::new();
        for (header_idx, header) in headers.enumerate() {
            for (field, pattern) in FIELD_HEADER_PATTERNS.iter() {
                if pattern.is_match(header) && proposed_column_assignment.get(field) == None {
                    proposed_column_assignment.insert(*field, header_idx);
                }
            }
        }

        let name_column = match (
            proposed_column_assignment.get(&CSVField::FirstName),
            proposed_column_assignment.get(&CSVField::LastName),
            proposed_column_assignment.get(&CSVField::FullName),
        ) {
            (Some(first), Some(last), _) => Some(CSVNameCol::FirstLast {
                first: *first,
                last: *last,
            }),
            (_, _, Some(full)) => Some(CSVNameCol::Full { column: *full }),
            (_, _, _) => None,
        };

        // A header like "Participant Email" matches both the name and the email patterns.
        let email_column = proposed_column_assignment.remove(&CSVField::Email);
        let name_column = match (name_column, email_column) {
            (Some(CSVNameCol::Full { column }), Some(email)) if column == email => None,
            (name_column, _) => name_column,
        };

        CSVReaderConfig {
            name_column,
            email_column,
            delimiter: None,
        }
    }

    pub fn parse<R>(&self, reader: R) -> Result<ParseResult, CSVParserErr>
    where
        R: std::io::Read,
    {
        let delimiter = self.delimiter.unwrap_or(b',');
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut data = vec![];
        let mut warnings = vec![];

        for (row_idx, row) in reader.records().enumerate() {
            let row = row?;

            let name = match self.name_column {
                Some(CSVNameCol::Full { column: index }) => row
                    .get(index)
                    .ok_or(CSVParserErr::IndexOutOfBounds { index })?
                    .to_string(),
                Some(CSVNameCol::FirstLast { first, last }) => {
                    let first_name = row.get(first).unwrap_or("");
                    let last_name = row.get(last).unwrap_or("");

                    format!("{} {}", first_name, last_name).trim().to_string()
                }
                None => Err(CSVParserErr::BadConfig)?,
            };

            if name.is_empty() {
                warnings.push(ParseWarning::SkippedRowPartialEntry { index: row_idx });
                continue;
            }

            let email = self.email_column
                .and_then(|index| row.get(index))
                .unwrap_or("")
                .to_string();

            data.push(ParticipantData { name, email });
        }

        Ok(ParseResult { data, warnings })
    }
}
