use async_trait::async_trait;
use itertools::Itertools;
use migration::MigratorTrait;
use sea_orm::{prelude::*, sea_query::Expr, Database, PaginatorTrait, QueryOrder, TransactionTrait};
use tracing::debug;

use crate::{domain::{Participant, participants_from_entries, validate_name}, error::{InvalidNumbering, RosterError}, schema};

use super::RosterStore;

pub struct SqliteRosterStore {
    db: DatabaseConnection,
}

impl SqliteRosterStore {
    /// Wraps a connection whose schema is already migrated.
    pub fn new(db: DatabaseConnection) -> SqliteRosterStore {
        SqliteRosterStore { db }
    }

    pub async fn connect(url: &str) -> Result<SqliteRosterStore, RosterError> {
        let db = Database::connect(url).await?;
        migration::Migrator::up(&db, None).await?;
        Ok(SqliteRosterStore { db })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    async fn load_models<C>(db: &C) -> Result<Vec<schema::participant::Model>, DbErr> where C: ConnectionTrait {
        schema::participant::Entity::find()
            .order_by_asc(schema::participant::Column::Id)
            .all(db)
            .await
    }
}

#[async_trait]
impl RosterStore for SqliteRosterStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn add(&self, name: &str, email: &str) -> Result<Participant, RosterError> {
        let name = validate_name(name)?;
        let participant = Participant::new(name, email.trim());
        participant.to_active_model().insert(&self.db).await?;
        debug!("Added {} to the roster", name);
        Ok(participant)
    }

    async fn add_many(&self, entries: &[(String, String)]) -> Result<Vec<Participant>, RosterError> {
        let participants = participants_from_entries(entries)?;

        let transaction = self.db.begin().await?;
        for participant in participants.iter() {
            schema::participant::Entity::insert(participant.to_active_model()).exec(&transaction).await?;
        }
        transaction.commit().await?;

        debug!("Added {} participants to the roster", participants.len());
        Ok(participants)
    }

    async fn list_all(&self) -> Result<Vec<Participant>, RosterError> {
        let models = Self::load_models(&self.db).await?;
        Ok(models.into_iter().map(Participant::from_model).collect_vec())
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, RosterError> {
        let result = schema::participant::Entity::delete_many()
            .filter(schema::participant::Column::Name.eq(name))
            .exec(&self.db)
            .await?;
        debug!("Deleted {} rows named {:?}", result.rows_affected, name);
        Ok(result.rows_affected)
    }

    async fn prune(&self) -> Result<u64, RosterError> {
        let transaction = self.db.begin().await?;
        let nameless = Self::load_models(&transaction).await?
            .into_iter()
            .filter(|model| !Participant::from_model(model.clone()).has_name())
            .map(|model| model.id)
            .collect_vec();

        let removed = if nameless.is_empty() {
            0
        } else {
            schema::participant::Entity::delete_many()
                .filter(schema::participant::Column::Id.is_in(nameless))
                .exec(&transaction)
                .await?
                .rows_affected
        };

        transaction.commit().await?;
        debug!("Pruned {} rows without a name", removed);
        Ok(removed)
    }

    async fn clear(&self) -> Result<(), RosterError> {
        let result = schema::participant::Entity::delete_many().exec(&self.db).await?;
        debug!("Cleared {} rows", result.rows_affected);
        Ok(())
    }

    async fn write_numbers(&self, numbers: &[u32]) -> Result<(), RosterError> {
        let transaction = self.db.begin().await?;
        let models = Self::load_models(&transaction).await?;

        if models.len() != numbers.len() {
            transaction.rollback().await?;
            return Err(InvalidNumbering::CountMismatch { expected: models.len(), actual: numbers.len() }.into());
        }

        for (model, number) in models.iter().zip(numbers.iter()) {
            schema::participant::Entity::update_many()
                .col_expr(schema::participant::Column::Number, Expr::value(*number as i64))
                .filter(schema::participant::Column::Id.eq(model.id))
                .exec(&transaction)
                .await?;
        }

        transaction.commit().await?;
        debug!("Wrote {} numbers", numbers.len());
        Ok(())
    }

    async fn replace_all(&self, participants: &[Participant]) -> Result<(), RosterError> {
        let transaction = self.db.begin().await?;
        schema::participant::Entity::delete_many().exec(&transaction).await?;

        for participant in participants {
            schema::participant::Entity::insert(participant.to_active_model()).exec(&transaction).await?;
        }

        transaction.commit().await?;
        debug!("Replaced roster with {} participants", participants.len());
        Ok(())
    }

    async fn count(&self) -> Result<usize, RosterError> {
        Ok(schema::participant::Entity::find().count(&self.db).await? as usize)
    }
}
