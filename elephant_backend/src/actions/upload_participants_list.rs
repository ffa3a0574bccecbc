use std::path::PathBuf;

use async_trait::async_trait;
use elephant_entities::prelude::*;
use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::import::CSVReaderConfig;

use super::ActionTrait;


#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadParticipantsListAction {
    pub path: PathBuf,
    /// Column layout. Guessed from the header row when absent.
    #[serde(default)]
    pub parser_config: Option<CSVReaderConfig>,
}

#[async_trait]
impl ActionTrait for UploadParticipantsListAction {
    async fn execute<S>(self, store: &S) -> Result<String, RosterError> where S: RosterStore + ?Sized {
        let content = std::fs::read(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RosterError::InvalidInput(format!("{} does not exist", self.path.display())),
            _ => RosterError::Io(e),
        })?;
        let config = match self.parser_config {
            Some(config) => config,
            None => CSVReaderConfig::default_from_file(&content[..])?,
        };
        let parsed = config.parse(&content[..])?;

        let entries = parsed.data.iter()
            .map(|participant| (participant.name.clone(), participant.email.clone()))
            .collect::<Vec<_>>();
        store.add_many(&entries).await?;

        for warning in parsed.warnings.iter() {
            warn!("{} in {}", warning, self.path.display());
        }
        info!("Imported {} participants from {}", parsed.data.len(), self.path.display());

        let mut message = format!("Imported {} participants from {}", parsed.data.len(), self.path.display());
        if !parsed.warnings.is_empty() {
            message.push_str(&format!(", skipped {} rows without a name", parsed.warnings.len()));
        }
        Ok(message)
    }
}
