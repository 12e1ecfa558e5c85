mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn activities_record_posts_and_comments_per_user() -> Result<()> {
    let server = common::spawn_server().await?;
    let (rita_id, rita) = server.signup("rita").await?;
    let (_, sam) = server.signup("sam").await?;

    let post = server.create_post(&rita, "hello").await?;
    let post_id = post["id"].as_i64().unwrap_or_default();
    server.create_comment(&rita, post_id, "self reply").await?;
    server.create_comment(&sam, post_id, "hi rita").await?;

    let res = server.client.get(server.url("/activities")).bearer_auth(&rita).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let entries: Vec<Value> = res.json().await?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["description"], format!("User created a new POST with ID {}", post_id));
    assert_eq!(entries[1]["description"], format!("User commented on POST with ID {}", post_id));
    assert!(entries.iter().all(|e| e["user_id"] == rita_id));
    assert!(entries[0]["created_at"].is_string());

    let res = server.client.get(server.url("/activities")).bearer_auth(&sam).send().await?;
    let entries: Vec<Value> = res.json().await?;
    assert_eq!(entries.len(), 1);
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_not_found() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server.client.get(server.url("/nowhere")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert!(body["message"].is_string());
    Ok(())
}
