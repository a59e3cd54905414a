use tolk_dal::{
    language::{Language, LanguageShort},
    project::Project,
};
use tolk_e2e_tests::{
    extend_url, launch_env, prepare_env,
    rest::{attach_language, create_language, create_project},
};
use serde_json::json;
use tracing::info;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_languages() {
    let (args, _config_guard) = prepare_env("test_languages").await.unwrap();
    let (client, base_url) = launch_env(args).await.unwrap();

    let api_url = base_url.join("api/language").unwrap();
    let langs = [
        ("Czech", "cs"),
        ("English", "en"),
        ("Slovak", "sk"),
        ("Russian", "ru"),
    ];
    for (name, code) in langs.iter() {
        let _lang = create_language(&client, &base_url, name, code)
            .await
            .unwrap();
    }

    let response = client.get(api_url.clone()).send().await.unwrap();
    info! {"Response: {:#?}", response};
    assert!(response.status().is_success());
    let stored_langs: Vec<LanguageShort> = response.json().await.unwrap();
    assert_eq!(langs.len(), stored_langs.len());
    assert_eq!("Russian", stored_langs[3].name);
    let id = stored_langs[3].id;

    let record_url = extend_url(&api_url, id);

    let response = client.get(record_url.clone()).send().await.unwrap();
    assert!(response.status().is_success());
    let rec: Language = response.json().await.unwrap();
    assert_eq!(rec.name, "Russian");

    let update_rec = json!({"name":"Porussky", "code": &rec.code, "version": rec.version});
    let response = client
        .put(record_url.clone())
        .json(&update_rec)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let new_rec: Language = response.json().await.unwrap();
    assert_eq!(new_rec.name, "Porussky");
    assert_eq!(new_rec.version, rec.version + 1);

    // stale version
    let response = client
        .put(record_url.clone())
        .json(&update_rec)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);

    let response = client
        .put(record_url.clone())
        .json(&json!({"name":"Porussky", "code": &rec.code}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .post(api_url.clone())
        .json(&json!({"name": "Czech again", "code": "cs"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);

    let response = client.delete(record_url.clone()).send().await.unwrap();
    assert!(response.status().is_success());

    let response = client.get(record_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client.get(api_url.clone()).send().await.unwrap();
    let stored_langs: Vec<LanguageShort> = response.json().await.unwrap();
    assert_eq!(langs.len() - 1, stored_langs.len());
}

#[tokio::test]
#[traced_test]
async fn test_project_languages() {
    let (args, _config_guard) = prepare_env("test_project_languages").await.unwrap();
    let (client, base_url) = launch_env(args).await.unwrap();

    let project = create_project(&client, &base_url, "Docs").await.unwrap();
    let cs = create_language(&client, &base_url, "Czech", "cs")
        .await
        .unwrap();
    let de = create_language(&client, &base_url, "German", "de")
        .await
        .unwrap();
    attach_language(&client, &base_url, project.id, de.id)
        .await
        .unwrap();
    attach_language(&client, &base_url, project.id, cs.id)
        .await
        .unwrap();

    let url = base_url
        .join(&format!("api/project/{}/languages", project.id))
        .unwrap();
    let response = client.get(url.clone()).send().await.unwrap();
    assert!(response.status().is_success());
    let attached: Vec<LanguageShort> = response.json().await.unwrap();
    let codes: Vec<_> = attached.iter().map(|l| l.code.as_str()).collect();
    assert_eq!(codes, ["cs", "de"]);

    let response = client
        .delete(extend_url(&url, cs.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 204);

    let response = client.put(extend_url(&url, 999)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);

    let response = client.get(url).send().await.unwrap();
    let attached: Vec<LanguageShort> = response.json().await.unwrap();
    assert_eq!(attached.len(), 1);
}

#[tokio::test]
#[traced_test]
async fn test_project_crud() {
    let (args, _config_guard) = prepare_env("test_project_crud").await.unwrap();
    let (client, base_url) = launch_env(args).await.unwrap();

    let project = create_project(&client, &base_url, "Shop").await.unwrap();
    assert_eq!(project.version, 1);

    let api_url = base_url.join("api/project").unwrap();
    let record_url = extend_url(&api_url, project.id);
    let response = client
        .put(record_url.clone())
        .json(&json!({"name": "Web shop", "description": "Texts of the shop", "version": 1}))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let updated: Project = response.json().await.unwrap();
    assert_eq!(updated.name, "Web shop");
    assert_eq!(updated.version, 2);

    let response = client.delete(record_url.clone()).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 204);
    let response = client.get(record_url).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 404);
}
