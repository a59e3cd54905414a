use crate::{Error, error::Result};
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use tracing::debug;

pub const DEFAULT_MESSAGE_TYPE: &str = "text";

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct CreateMessage {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    #[garde(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[garde(length(min = 1, max = 50))]
    pub kind: Option<String>,
}

/// Partial update, fields left out keep their stored values.
#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
pub struct UpdateMessage {
    #[garde(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[garde(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[garde(length(min = 1, max = 50))]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub project_id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub created: time::PrimitiveDateTime,
    pub modified: time::PrimitiveDateTime,
}

const SELECT_MESSAGE: &str =
    "SELECT id, project_id, name, description, type, created, modified FROM messages";

pub type MessageRepository = MessageRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct MessageRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> MessageRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, project_id: i64, payload: CreateMessage) -> Result<Message> {
        sqlx::query_scalar::<_, i64>("SELECT id FROM projects WHERE id = ?")
            .bind(project_id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Project".to_string()))?;

        let kind = payload.kind.as_deref().unwrap_or(DEFAULT_MESSAGE_TYPE);
        let result = sqlx::query(
            "INSERT INTO messages (project_id, name, description, type) VALUES (?, ?, ?, ?)",
        )
        .bind(project_id)
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(kind)
        .execute(&self.executor)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Created message {} in project {project_id}", payload.name);
        self.get(project_id, id).await
    }

    pub async fn update(
        &self,
        project_id: i64,
        id: i64,
        payload: UpdateMessage,
    ) -> Result<Message> {
        let result = sqlx::query(
            "UPDATE messages SET name = COALESCE(?, name), description = COALESCE(?, description),
            type = COALESCE(?, type), modified = CURRENT_TIMESTAMP
            WHERE id = ? AND project_id = ?",
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(&payload.kind)
        .bind(id)
        .bind(project_id)
        .execute(&self.executor)
        .await?;

        if result.rows_affected() == 0 {
            Err(Error::RecordNotFound("Message".to_string()))
        } else {
            self.get(project_id, id).await
        }
    }

    pub async fn list(&self, project_id: i64, limit: usize) -> Result<Vec<Message>> {
        let limit = limit.min(crate::MAX_LIMIT) as i64;
        let sql = format!("{SELECT_MESSAGE} WHERE project_id = ? ORDER BY name LIMIT ?");
        let records = sqlx::query_as::<_, Message>(&sql)
            .bind(project_id)
            .bind(limit)
            .fetch_all(&self.executor)
            .await?;
        Ok(records)
    }

    pub async fn delete(&self, project_id: i64, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM messages WHERE id = ? AND project_id = ?")
            .bind(id)
            .bind(project_id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound("Message".to_string()))
        } else {
            Ok(())
        }
    }

    /// Message is only found under the project it belongs to.
    pub async fn get(&self, project_id: i64, id: i64) -> Result<Message> {
        let sql = format!("{SELECT_MESSAGE} WHERE id = ? AND project_id = ?");
        sqlx::query_as::<_, Message>(&sql)
            .bind(id)
            .bind(project_id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Message".to_string()))
    }
}
