use anyhow::{Result, ensure};
use reqwest::Url;
use serde_json::json;
use tolk_dal::{language::Language, message::Message, project::Project};
use tracing::info;

pub async fn create_project(client: &reqwest::Client, base_url: &Url, name: &str) -> Result<Project> {
    let payload = json!({"name": name});
    let api_url = base_url.join("api/project")?;

    let response = client.post(api_url).json(&payload).send().await?;
    ensure!(response.status().as_u16() == 201, "Unexpected status {}", response.status());

    let new_project: Project = response.json().await?;
    Ok(new_project)
}

pub async fn create_language(
    client: &reqwest::Client,
    base_url: &Url,
    name: &str,
    code: &str,
) -> Result<Language> {
    let payload = json!({"name": name, "code": code});
    let api_url = base_url.join("api/language")?;

    let response = client.post(api_url).json(&payload).send().await?;
    ensure!(response.status().as_u16() == 201, "Unexpected status {}", response.status());

    let new_language: Language = response.json().await?;
    Ok(new_language)
}

pub async fn attach_language(
    client: &reqwest::Client,
    base_url: &Url,
    project_id: i64,
    language_id: i64,
) -> Result<()> {
    let api_url = base_url.join(&format!("api/project/{project_id}/languages/{language_id}"))?;

    let response = client.put(api_url).send().await?;
    ensure!(response.status().is_success(), "Unexpected status {}", response.status());
    Ok(())
}

pub async fn create_message(
    client: &reqwest::Client,
    base_url: &Url,
    project_id: i64,
    name: &str,
) -> Result<Message> {
    let payload = json!({"name": name, "description": format!("Description of {name}")});
    let api_url = base_url.join(&format!("api/project/{project_id}/messages"))?;

    let response = client.post(api_url).json(&payload).send().await?;
    info!("Message response: {:#?}", response);
    ensure!(response.status().as_u16() == 201, "Unexpected status {}", response.status());

    let new_message: Message = response.json().await?;
    Ok(new_message)
}

/// Creates project with one message, like most message tests need.
pub async fn project_and_message(
    client: &reqwest::Client,
    base_url: &Url,
) -> Result<(Project, Message)> {
    let project = create_project(client, base_url, "Test project").await?;
    let message = create_message(client, base_url, project.id, "greeting.hello").await?;
    Ok((project, message))
}
