use common::{envelope, TestServerBuilder, PREFIX};
use reqwest::header::LOCATION;
use std::fs;

mod common;

#[tokio::test]
async fn empty_log_directory_lists_nothing() {
    let server = TestServerBuilder::new().start().await;

    let response = server
        .client
        .get(server.url("/v1/updates"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Vec<String> = response.json().await.unwrap();
    assert!(body.is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn lists_most_recent_first_and_skips_foreign_files() {
    let server = TestServerBuilder::new().start().await;
    server.write_log("2023-05-01T10:00:00", "PID: 1\n");
    server.write_log("2024-01-15T08:30:00", "PID: 2\n");
    server.write_log("2023-11-30T23:59:59", "PID: 3\n");
    fs::write(server.log_dir().join("notes.txt"), "not an update").unwrap();
    fs::write(server.log_dir().join("pmm-update__2023-05-01.log"), "PID: 4\n").unwrap();

    let body: Vec<String> = server
        .client
        .get(server.url("/v1/updates"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        body,
        vec![
            "2024-01-15T08:30:00",
            "2023-11-30T23:59:59",
            "2023-05-01T10:00:00"
        ]
    );

    server.shutdown().await;
}

#[tokio::test]
async fn shared_timestamp_is_ambiguous_only_for_itself() {
    let server = TestServerBuilder::new().start().await;
    server.write_log("2023-05-01T10:00:00", "PID: 1\n");
    server.write_log("2023-06-01T10:00:00", "PID: 3\n");
    fs::write(
        server.log_dir().join("other__2023-05-01T10:00:00.log"),
        "PID: 2\n",
    )
    .unwrap();

    let listed: Vec<String> = server
        .client
        .get(server.url("/v1/updates"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, vec!["2023-06-01T10:00:00", "2023-05-01T10:00:00"]);

    let response = server
        .client
        .get(server.url("/v1/updates/2023-05-01T10:00:00"))
        .send()
        .await
        .unwrap();
    envelope(response, 500, "Ambiguous update logs").await;

    let response = server
        .client
        .get(server.url("/v1/updates/2099-01-01T00:00:00"))
        .send()
        .await
        .unwrap();
    envelope(response, 404, "Cannot find update").await;

    let response = server
        .client
        .get(server.url("/v1/updates/2023-06-01T10:00:00"))
        .send()
        .await
        .unwrap();
    envelope(response, 200, "finished").await;

    let response = server
        .client
        .delete(server.url("/v1/updates/2023-05-01T10:00:00"))
        .send()
        .await
        .unwrap();
    envelope(response, 200, "success").await;
    assert!(!server.log_path("2023-05-01T10:00:00").exists());
    assert!(!server
        .log_dir()
        .join("other__2023-05-01T10:00:00.log")
        .exists());

    server.shutdown().await;
}

#[tokio::test]
async fn get_reports_status_from_the_logged_pid() {
    let server = TestServerBuilder::new().alive(4242).start().await;
    let content = "Starting update\nPID: 4242\nstep 1 of 3\n";
    server.write_log("2023-05-01T10:00:00", content);
    server.write_log("2023-05-02T10:00:00", "PID: 4343\ndone\n");

    let response = server
        .client
        .get(server.url("/v1/updates/2023-05-01T10:00:00"))
        .send()
        .await
        .unwrap();

    let location = response
        .headers()
        .get(LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("http://127.0.0.1:"));
    assert!(location.ends_with(&format!("{PREFIX}/v1/updates/2023-05-01T10:00:00")));

    let body = envelope(response, 200, "in-progress").await;
    assert_eq!(body["status"], "OK");
    assert_eq!(body["detail"], content);

    let response = server
        .client
        .get(server.url("/v1/updates/2023-05-02T10:00:00"))
        .send()
        .await
        .unwrap();
    envelope(response, 200, "finished").await;

    server.shutdown().await;
}

#[tokio::test]
async fn get_unknown_update_is_not_found() {
    let server = TestServerBuilder::new().start().await;
    server.write_log("2023-05-01T10:00:00", "PID: 1\n");

    let response = server
        .client
        .get(server.url("/v1/updates/2099-01-01T00:00:00"))
        .send()
        .await
        .unwrap();

    envelope(response, 404, "Cannot find update").await;

    server.shutdown().await;
}

#[tokio::test]
async fn log_without_pid_is_a_server_error() {
    let server = TestServerBuilder::new().start().await;
    server.write_log("2023-05-01T10:00:00", "Starting update\n");

    let response = server
        .client
        .get(server.url("/v1/updates/2023-05-01T10:00:00"))
        .send()
        .await
        .unwrap();

    let body = envelope(response, 500, "Cannot find PID in update log").await;
    assert!(!body["detail"]
        .as_str()
        .unwrap()
        .contains(server.dir.path().to_str().unwrap()));

    server.shutdown().await;
}

#[tokio::test]
async fn delete_removes_the_log_once() {
    let server = TestServerBuilder::new().start().await;
    server.write_log("2023-05-01T10:00:00", "PID: 1\n");
    let url = server.url("/v1/updates/2023-05-01T10:00:00");

    let response = server.client.delete(&url).send().await.unwrap();
    let body = envelope(response, 200, "success").await;
    assert_eq!(body["detail"], "");
    assert!(!server.log_path("2023-05-01T10:00:00").exists());

    let response = server.client.delete(&url).send().await.unwrap();
    envelope(response, 404, "Cannot find update").await;

    let response = server.client.get(&url).send().await.unwrap();
    envelope(response, 404, "Cannot find update").await;

    server.shutdown().await;
}

#[tokio::test]
async fn run_returns_the_log_the_updater_writes() {
    let builder = TestServerBuilder::new();
    let update_dir = builder.dir().join("update");
    let script = format!(
        "echo $$ > '{dir}/pmm-update.pid'\n\
         sleep 0.1\n\
         printf 'Starting update\\nPID: %s\\n' $$ > '{dir}/log/pmm-update__2030-01-01T00:00:00.log'\n",
        dir = update_dir.display()
    );
    let server = builder.updater_script(&script).start().await;
    server.write_log("2023-05-01T10:00:00", "PID: 1\n");

    let response = server
        .client
        .post(server.url("/v1/updates"))
        .send()
        .await
        .unwrap();

    let location = response
        .headers()
        .get(LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.ends_with(&format!("{PREFIX}/v1/updates/2030-01-01T00:00:00")));

    let body = envelope(response, 202, "finished").await;
    assert_eq!(body["status"], "Accepted");
    let pid = fs::read_to_string(server.pid_file()).unwrap();
    assert_eq!(
        body["detail"],
        format!("Starting update\nPID: {}\n", pid.trim())
    );

    let listed: Vec<String> = server
        .client
        .get(server.url("/v1/updates"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, vec!["2030-01-01T00:00:00", "2023-05-01T10:00:00"]);

    server.shutdown().await;
}

#[tokio::test]
async fn run_gives_up_when_the_updater_never_reports() {
    let server = TestServerBuilder::new()
        .updater_script("exit 0\n")
        .timeout_ms(300)
        .start()
        .await;

    let response = server
        .client
        .post(server.url("/v1/updates"))
        .send()
        .await
        .unwrap();

    let body = envelope(response, 500, "Cannot run update").await;
    assert_eq!(body["detail"], "cannot read update pid file");

    server.shutdown().await;
}

#[tokio::test]
async fn routes_live_under_the_prefix_only() {
    let server = TestServerBuilder::new().start().await;
    let root = server.base_url.trim_end_matches(PREFIX).to_string();

    let response = server
        .client
        .get(format!("{root}/v1/updates"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);

    server.shutdown().await;
}
