use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Serialize, Deserialize};

use crate::{domain::Participant, error::RosterError};

use super::{CsvRosterStore, RosterStore, SqliteRosterStore};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(tag = "backend")]
pub enum StorageConfig {
    Sqlite { url: String },
    Csv {
        path: PathBuf,
        #[serde(default = "default_delimiter")]
        delimiter: char,
    },
}

fn default_delimiter() -> char {
    ','
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Sqlite {
            url: "sqlite://./whiteElephantNumberDistributor/data.db?mode=rwc".into(),
        }
    }
}

impl StorageConfig {
    /// Directory that has to exist before the store can be opened.
    pub fn parent_dir(&self) -> Option<PathBuf> {
        let path = match self {
            StorageConfig::Sqlite { url } => {
                let path = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
                let path = path.split('?').next().unwrap_or(path);
                if path.is_empty() || path.contains(":memory:") {
                    return None;
                }
                PathBuf::from(path)
            },
            StorageConfig::Csv { path, .. } => path.clone(),
        };

        path.parent().filter(|p| !p.as_os_str().is_empty()).map(|p| p.to_path_buf())
    }
}

pub enum RosterStoreVariant {
    Sqlite(SqliteRosterStore),
    Csv(CsvRosterStore),
}

impl RosterStoreVariant {
    pub async fn open(config: &StorageConfig) -> Result<RosterStoreVariant, RosterError> {
        if let Some(dir) = config.parent_dir() {
            std::fs::create_dir_all(dir)?;
        }

        match config {
            StorageConfig::Sqlite { url } => Ok(RosterStoreVariant::Sqlite(SqliteRosterStore::connect(url).await?)),
            StorageConfig::Csv { path, delimiter } => {
                let delimiter = u8::try_from(*delimiter).map_err(
                    |_| RosterError::InvalidInput(format!("delimiter {:?} is not a single-byte character", delimiter))
                )?;
                Ok(RosterStoreVariant::Csv(CsvRosterStore::new(path.clone()).with_delimiter(delimiter)))
            }
        }
    }
}

#[async_trait]
impl RosterStore for RosterStoreVariant {
    fn name(&self) -> &'static str {
        match self {
            RosterStoreVariant::Sqlite(inner) => inner.name(),
            RosterStoreVariant::Csv(inner) => inner.name(),
        }
    }

    async fn add(&self, name: &str, email: &str) -> Result<Participant, RosterError> {
        match self {
            RosterStoreVariant::Sqlite(inner) => inner.add(name, email).await,
            RosterStoreVariant::Csv(inner) => inner.add(name, email).await,
        }
    }

    async fn add_many(&self, entries: &[(String, String)]) -> Result<Vec<Participant>, RosterError> {
        match self {
            RosterStoreVariant::Sqlite(inner) => inner.add_many(entries).await,
            RosterStoreVariant::Csv(inner) => inner.add_many(entries).await,
        }
    }

    async fn list_all(&self) -> Result<Vec<Participant>, RosterError> {
        match self {
            RosterStoreVariant::Sqlite(inner) => inner.list_all().await,
            RosterStoreVariant::Csv(inner) => inner.list_all().await,
        }
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, RosterError> {
        match self {
            RosterStoreVariant::Sqlite(inner) => inner.delete_by_name(name).await,
            RosterStoreVariant::Csv(inner) => inner.delete_by_name(name).await,
        }
    }

    async fn prune(&self) -> Result<u64, RosterError> {
        match self {
            RosterStoreVariant::Sqlite(inner) => inner.prune().await,
            RosterStoreVariant::Csv(inner) => inner.prune().await,
        }
    }

    async fn clear(&self) -> Result<(), RosterError> {
        match self {
            RosterStoreVariant::Sqlite(inner) => inner.clear().await,
            RosterStoreVariant::Csv(inner) => inner.clear().await,
        }
    }

    async fn write_numbers(&self, numbers: &[u32]) -> Result<(), RosterError> {
        match self {
            RosterStoreVariant::Sqlite(inner) => inner.write_numbers(numbers).await,
            RosterStoreVariant::Csv(inner) => inner.write_numbers(numbers).await,
        }
    }

    async fn replace_all(&self, participants: &[Participant]) -> Result<(), RosterError> {
        match self {
            RosterStoreVariant::Sqlite(inner) => inner.replace_all(participants).await,
            RosterStoreVariant::Csv(inner) => inner.replace_all(participants).await,
        }
    }

    async fn count(&self) -> Result<usize, RosterError> {
        match self {
            RosterStoreVariant::Sqlite(inner) => inner.count().await,
            RosterStoreVariant::Csv(inner) => inner.count().await,
        }
    }
}
