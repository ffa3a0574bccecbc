use std::{fs, io::Write, path::{Path, PathBuf}};

use async_trait::async_trait;
use itertools::Itertools;
use tracing::debug;

use crate::{domain::{Participant, TurnNumber, participants_from_entries, validate_name}, error::{InvalidNumbering, RosterError}};

use super::RosterStore;

const HEADER: [&str; 3] = ["name", "email", "number"];

/// Roster kept in a delimited text file with a `name,email,number` header.
///
/// The file is rewritten completely on every mutation, through a temporary
/// sibling that is renamed over the original. A file that does not exist yet
/// is an empty roster.
pub struct CsvRosterStore {
    path: PathBuf,
    delimiter: u8,
}

impl CsvRosterStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> CsvRosterStore {
        CsvRosterStore { path: path.into(), delimiter: b',' }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> CsvRosterStore {
        self.delimiter = delimiter;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<Participant>, RosterError> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut out = vec![];
        for record in reader.records() {
            let record = record?;
            // A missing cell is an absent value, an empty cell an empty one.
            out.push(Participant {
                name: record.get(0).map(|n| n.to_string()),
                email: record.get(1).unwrap_or("").to_string(),
                number: record.get(2).map(TurnNumber::from_cell).unwrap_or(TurnNumber::Unset),
            });
        }
        Ok(out)
    }

    fn write_records(&self, participants: &[Participant]) -> Result<(), RosterError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.tmp_path();
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_path(&tmp_path)?;

        writer.write_record(HEADER)?;
        for participant in participants {
            writer.write_record([
                participant.display_name(),
                participant.email.as_str(),
                participant.number.to_cell().as_str(),
            ])?;
        }

        let mut file = writer.into_inner().map_err(|e| e.into_error())?;
        file.flush()?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let file_name = self.path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "roster.csv".into());
        self.path.with_file_name(format!(".{}.tmp", file_name))
    }
}

#[async_trait]
impl RosterStore for CsvRosterStore {
    fn name(&self) -> &'static str {
        "csv"
    }

    async fn add(&self, name: &str, email: &str) -> Result<Participant, RosterError> {
        let name = validate_name(name)?;
        let participant = Participant::new(name, email.trim());

        let mut participants = self.read_records()?;
        participants.push(participant.clone());
        self.write_records(&participants)?;

        debug!("Added {} to {}", name, self.path.display());
        Ok(participant)
    }

    async fn add_many(&self, entries: &[(String, String)]) -> Result<Vec<Participant>, RosterError> {
        let added = participants_from_entries(entries)?;

        let mut participants = self.read_records()?;
        participants.extend(added.iter().cloned());
        self.write_records(&participants)?;

        debug!("Added {} participants to {}", added.len(), self.path.display());
        Ok(added)
    }

    async fn list_all(&self) -> Result<Vec<Participant>, RosterError> {
        self.read_records()
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, RosterError> {
        let participants = self.read_records()?;
        let before = participants.len();
        let kept = participants.into_iter().filter(|p| p.name.as_deref() != Some(name)).collect_vec();
        let removed = (before - kept.len()) as u64;

        if removed > 0 {
            self.write_records(&kept)?;
        }
        debug!("Deleted {} rows named {:?}", removed, name);
        Ok(removed)
    }

    async fn prune(&self) -> Result<u64, RosterError> {
        let participants = self.read_records()?;
        let before = participants.len();
        let kept = participants.into_iter().filter(|p| p.has_name()).collect_vec();
        let removed = (before - kept.len()) as u64;

        if removed > 0 {
            self.write_records(&kept)?;
        }
        debug!("Pruned {} rows without a name", removed);
        Ok(removed)
    }

    async fn clear(&self) -> Result<(), RosterError> {
        self.write_records(&[])?;
        debug!("Cleared {}", self.path.display());
        Ok(())
    }

    async fn write_numbers(&self, numbers: &[u32]) -> Result<(), RosterError> {
        let mut participants = self.read_records()?;
        if participants.len() != numbers.len() {
            return Err(InvalidNumbering::CountMismatch { expected: participants.len(), actual: numbers.len() }.into());
        }

        for (participant, number) in participants.iter_mut().zip(numbers.iter()) {
            participant.number = TurnNumber::Assigned(*number);
        }

        self.write_records(&participants)?;
        debug!("Wrote {} numbers to {}", numbers.len(), self.path.display());
        Ok(())
    }

    async fn replace_all(&self, participants: &[Participant]) -> Result<(), RosterError> {
        self.write_records(participants)
    }
}
