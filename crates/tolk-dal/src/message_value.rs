use crate::{Error, error::Result};
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use tolk_types::ValidMessageValue;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct MessageValue {
    pub id: i64,
    pub message_id: i64,
    pub language_id: i64,
    pub form: Option<String>,
    pub value: String,
    pub modified: time::PrimitiveDateTime,
}

const UPSERT_WITHOUT_FORM: &str = r#"
INSERT INTO message_values (message_id, language_id, form, value) VALUES (?, ?, NULL, ?)
ON CONFLICT (message_id, language_id) WHERE form IS NULL
DO UPDATE SET value = excluded.value, modified = CURRENT_TIMESTAMP
RETURNING id, message_id, language_id, form, value, modified
"#;

const UPSERT_WITH_FORM: &str = r#"
INSERT INTO message_values (message_id, language_id, form, value) VALUES (?, ?, ?, ?)
ON CONFLICT (message_id, language_id, form) WHERE form IS NOT NULL
DO UPDATE SET value = excluded.value, modified = CURRENT_TIMESTAMP
RETURNING id, message_id, language_id, form, value, modified
"#;

pub type MessageValueRepository = MessageValueRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct MessageValueRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> MessageValueRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    /// Stores value into the `(message, language, form)` slot, replacing any previous value.
    /// Takes only an already validated submission.
    pub async fn upsert(
        &self,
        message_id: i64,
        language_id: i64,
        payload: &ValidMessageValue,
    ) -> Result<MessageValue> {
        let query = match payload.form {
            Some(form) => sqlx::query_as::<_, MessageValue>(UPSERT_WITH_FORM)
                .bind(message_id)
                .bind(language_id)
                .bind(form.key()),
            None => sqlx::query_as::<_, MessageValue>(UPSERT_WITHOUT_FORM)
                .bind(message_id)
                .bind(language_id),
        };
        let record = query
            .bind(&payload.value)
            .fetch_one(&self.executor)
            .await?;
        debug!(
            "Stored value {} for message {message_id}, language {language_id}, form {:?}",
            record.id, record.form
        );
        Ok(record)
    }

    pub async fn get(
        &self,
        message_id: i64,
        language_id: i64,
        form: Option<&str>,
    ) -> Result<MessageValue> {
        sqlx::query_as::<_, MessageValue>(
            "SELECT id, message_id, language_id, form, value, modified FROM message_values
            WHERE message_id = ? AND language_id = ? AND form IS ?",
        )
        .bind(message_id)
        .bind(language_id)
        .bind(form)
        .fetch_optional(&self.executor)
        .await?
        .ok_or_else(|| Error::RecordNotFound("Message value".to_string()))
    }

    pub async fn list_for_message(&self, message_id: i64) -> Result<Vec<MessageValue>> {
        let records = sqlx::query_as::<_, MessageValue>(
            "SELECT id, message_id, language_id, form, value, modified FROM message_values
            WHERE message_id = ? ORDER BY language_id, form",
        )
        .bind(message_id)
        .fetch_all(&self.executor)
        .await?;
        Ok(records)
    }
}
