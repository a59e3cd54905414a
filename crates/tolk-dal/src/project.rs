use crate::{Error, error::Result, language::LanguageShort};
use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::Pool;
use tracing::debug;

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
pub struct CreateProject {
    #[garde(length(min = 1, max = 255))]
    pub name: String,
    #[garde(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[garde(range(min = 0))]
    pub version: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub version: i64,
    pub created: time::PrimitiveDateTime,
    pub modified: time::PrimitiveDateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone, sqlx::FromRow)]
pub struct ProjectShort {
    pub id: i64,
    pub name: String,
}

pub type ProjectRepository = ProjectRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct ProjectRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> ProjectRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: CreateProject) -> Result<Project> {
        let result = sqlx::query("INSERT INTO projects (name, description, version) VALUES (?, ?, 1)")
            .bind(&payload.name)
            .bind(&payload.description)
            .execute(&self.executor)
            .await?;

        let id = result.last_insert_rowid();
        self.get(id).await
    }

    pub async fn update(&self, id: i64, payload: CreateProject) -> Result<Project> {
        let version = payload.version.ok_or_else(|| {
            debug!("No version provided");
            Error::MissingVersion
        })?;
        let result = sqlx::query(
            "UPDATE projects SET name = ?, description = ?, version = ?, modified = CURRENT_TIMESTAMP
            WHERE id = ? and version = ?",
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(version + 1)
        .bind(id)
        .bind(version)
        .execute(&self.executor)
        .await?;

        if result.rows_affected() == 0 {
            Err(Error::FailedUpdate { id, version })
        } else {
            self.get(id).await
        }
    }

    pub async fn list(&self, limit: usize) -> Result<Vec<ProjectShort>> {
        let limit = limit.min(crate::MAX_LIMIT) as i64;
        let records =
            sqlx::query_as::<_, ProjectShort>("SELECT id, name FROM projects ORDER BY id LIMIT ?")
                .bind(limit)
                .fetch_all(&self.executor)
                .await?;
        Ok(records)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound("Project".to_string()))
        } else {
            Ok(())
        }
    }

    pub async fn get(&self, id: i64) -> Result<Project> {
        sqlx::query_as::<_, Project>(
            "SELECT id, name, description, version, created, modified FROM projects WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.executor)
        .await?
        .ok_or_else(|| Error::RecordNotFound("Project".to_string()))
    }

    /// Links language to project, linking an already attached language is a no-op.
    pub async fn attach_language(&self, project_id: i64, language_id: i64) -> Result<()> {
        self.get(project_id).await?;
        sqlx::query_scalar::<_, i64>("SELECT id FROM languages WHERE id = ?")
            .bind(language_id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound("Language".to_string()))?;
        sqlx::query(
            "INSERT INTO project_languages (project_id, language_id) VALUES (?, ?)
            ON CONFLICT DO NOTHING",
        )
        .bind(project_id)
        .bind(language_id)
        .execute(&self.executor)
        .await?;
        debug!("Attached language {language_id} to project {project_id}");
        Ok(())
    }

    pub async fn detach_language(&self, project_id: i64, language_id: i64) -> Result<()> {
        let res =
            sqlx::query("DELETE FROM project_languages WHERE project_id = ? AND language_id = ?")
                .bind(project_id)
                .bind(language_id)
                .execute(&self.executor)
                .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound("Project language".to_string()))
        } else {
            Ok(())
        }
    }

    pub async fn languages(&self, project_id: i64) -> Result<Vec<LanguageShort>> {
        self.get(project_id).await?;
        let records = sqlx::query_as::<_, LanguageShort>(
            "SELECT l.id, l.name, l.code FROM languages l
            JOIN project_languages pl ON pl.language_id = l.id
            WHERE pl.project_id = ? ORDER BY l.code",
        )
        .bind(project_id)
        .fetch_all(&self.executor)
        .await?;
        Ok(records)
    }
}
