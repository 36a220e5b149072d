mod helpers;

use helpers::TestReviewerServer;
use pr_reviewer_models::ErrorCode;
use pr_reviewer_models::api::ErrorResponse;
use pr_reviewer_testing::{ClientError, TeamBuilder};

fn assert_api_error(err: &ClientError, status: u16, code: ErrorCode) {
    assert_eq!(err.status(), Some(status), "unexpected error: {err}");
    assert_eq!(err.code(), Some(code), "unexpected error: {err}");
}

fn abcd_team() -> pr_reviewer_models::api::TeamDto {
    TeamBuilder::new("T")
        .member("A", "Alice")
        .member("B", "Bob")
        .member("C", "Carol")
        .inactive_member("D", "Dave")
        .build()
}

#[test_log::test(tokio::test)]
async fn test_review_lifecycle() {
    let server = TestReviewerServer::start().await.unwrap();
    println!("Test server started on port {}", server.port());
    let client = server.client();

    let team = client.add_team(&abcd_team()).await.unwrap();
    assert_eq!(team.team_name, "T");
    assert_eq!(team.members.len(), 4);

    let pr = client.create_pr("pr-1", "Add search", "A").await.unwrap();
    assert_eq!(pr.status.to_string(), "OPEN");
    assert!(!pr.assigned_reviewers.is_empty() && pr.assigned_reviewers.len() <= 2);
    for reviewer in &pr.assigned_reviewers {
        assert!(["B", "C"].contains(&reviewer.as_str()), "bad reviewer {reviewer}");
    }
    assert!(pr.created_at.is_some());
    assert!(pr.merged_at.is_none());

    let reviewer = pr.assigned_reviewers[0].clone();
    let reviews = client.get_review(&reviewer).await.unwrap();
    assert_eq!(reviews.user_id, reviewer);
    assert_eq!(reviews.pull_requests.len(), 1);
    assert_eq!(reviews.pull_requests[0].pull_request_id, "pr-1");

    let first = client.merge_pr("pr-1").await.unwrap();
    let second = client.merge_pr("pr-1").await.unwrap();
    assert_eq!(first.status.to_string(), "MERGED");
    assert_eq!(second.status, first.status);
    assert!(first.merged_at.is_some());
    assert_eq!(first.merged_at, second.merged_at);
    assert_eq!(first.assigned_reviewers, pr.assigned_reviewers);

    let err = client.reassign("pr-1", &reviewer).await.unwrap_err();
    assert_api_error(&err, 409, ErrorCode::PrMerged);
}

#[test_log::test(tokio::test)]
async fn test_single_member_team_gets_no_reviewers() {
    let server = TestReviewerServer::start().await.unwrap();
    let client = server.client();

    client
        .add_team(&TeamBuilder::new("solo").member("S", "Sam").build())
        .await
        .unwrap();

    let pr = client.create_pr("pr-solo", "Lonely", "S").await.unwrap();

    assert!(pr.assigned_reviewers.is_empty());
    assert!(pr.need_more_reviewers);
}

#[test_log::test(tokio::test)]
async fn test_reassign_replaces_reviewer_in_place() {
    let server = TestReviewerServer::start().await.unwrap();
    let client = server.client();
    client.add_team(&abcd_team()).await.unwrap();

    let pr = client.create_pr("pr-1", "Add search", "A").await.unwrap();
    let old = pr.assigned_reviewers[0].clone();
    let other = pr.assigned_reviewers[1].clone();

    let response = client.reassign("pr-1", &old).await.unwrap();

    // With A excluded as author and D inactive, only the co-reviewer remains.
    assert_eq!(response.replaced_by, other);
    assert_eq!(response.pr.assigned_reviewers, vec![other.clone(), other]);
    assert_eq!(response.pr.status.to_string(), "OPEN");

    let err = client.reassign("pr-1", "D").await.unwrap_err();
    assert_api_error(&err, 409, ErrorCode::NotAssigned);
}

#[test_log::test(tokio::test)]
async fn test_reassign_without_candidate() {
    let server = TestReviewerServer::start().await.unwrap();
    let client = server.client();
    client
        .add_team(
            &TeamBuilder::new("pair")
                .member("A", "Alice")
                .member("B", "Bob")
                .build(),
        )
        .await
        .unwrap();

    let pr = client.create_pr("pr-1", "Fix", "A").await.unwrap();
    assert_eq!(pr.assigned_reviewers, vec!["B".to_string()]);
    assert!(pr.need_more_reviewers);

    let err = client.reassign("pr-1", "B").await.unwrap_err();
    assert_api_error(&err, 409, ErrorCode::NoCandidate);

    let reviews = client.get_review("B").await.unwrap();
    assert_eq!(reviews.pull_requests.len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_deactivated_teammates_are_skipped() {
    let server = TestReviewerServer::start().await.unwrap();
    let client = server.client();
    client.add_team(&abcd_team()).await.unwrap();

    let bob = client.set_is_active("B", false).await.unwrap();
    assert_eq!(bob.user_id, "B");
    assert_eq!(bob.team_name, "T");
    assert!(!bob.is_active);

    client.set_is_active("C", false).await.unwrap();

    let team = client.get_team("T").await.unwrap();
    assert!(team.members.iter().filter(|m| m.user_id != "A").all(|m| !m.is_active));

    let pr = client.create_pr("pr-1", "Quiet week", "A").await.unwrap();
    assert!(pr.assigned_reviewers.is_empty());
    assert!(pr.need_more_reviewers);
}

#[test_log::test(tokio::test)]
async fn test_conflicts_and_missing_entities() {
    let server = TestReviewerServer::start().await.unwrap();
    let client = server.client();
    client.add_team(&abcd_team()).await.unwrap();
    client.create_pr("pr-1", "Add search", "A").await.unwrap();

    let err = client.add_team(&abcd_team()).await.unwrap_err();
    assert_api_error(&err, 400, ErrorCode::TeamExists);

    let err = client.create_pr("pr-1", "Again", "B").await.unwrap_err();
    assert_api_error(&err, 400, ErrorCode::PrExists);

    let err = client.create_pr("pr-2", "Ghost", "nobody").await.unwrap_err();
    assert_api_error(&err, 404, ErrorCode::NotFound);

    let err = client.get_team("missing").await.unwrap_err();
    assert_api_error(&err, 404, ErrorCode::NotFound);

    let err = client.set_is_active("nobody", true).await.unwrap_err();
    assert_api_error(&err, 404, ErrorCode::NotFound);

    let err = client.get_review("nobody").await.unwrap_err();
    assert_api_error(&err, 404, ErrorCode::NotFound);

    let err = client.merge_pr("pr-404").await.unwrap_err();
    assert_api_error(&err, 404, ErrorCode::NotFound);

    let err = client.reassign("pr-404", "B").await.unwrap_err();
    assert_api_error(&err, 404, ErrorCode::NotFound);
}

#[test_log::test(tokio::test)]
async fn test_status_codes_and_bad_input() {
    let server = TestReviewerServer::start().await.unwrap();
    let http = reqwest::Client::new();

    let response = http
        .post(format!("{}/team/add", server.http_url()))
        .json(&abcd_team())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    let response = http
        .post(format!("{}/pullRequest/create", server.http_url()))
        .json(&serde_json::json!({
            "pull_request_id": "pr-1",
            "pull_request_name": "Add search",
            "author_id": "A",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["pr"]["pull_request_id"], "pr-1");
    assert!(body["pr"]["createdAt"].is_string());
    assert!(body["pr"].get("mergedAt").is_none());

    let response = http
        .post(format!("{}/pullRequest/merge", server.http_url()))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let error: ErrorResponse = response.json().await.unwrap();
    assert_eq!(error.error.code, ErrorCode::NotFound);

    let response = http
        .get(format!("{}/team/get", server.http_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
    let error: ErrorResponse = response.json().await.unwrap();
    assert_eq!(error.error.code, ErrorCode::NotFound);
    assert_eq!(error.error.message, "team_name is required");

    let response = http
        .get(format!("{}/healthz", server.http_url()))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[test_log::test(tokio::test)]
async fn test_moving_user_to_new_team() {
    let server = TestReviewerServer::start().await.unwrap();
    let client = server.client();
    client.add_team(&abcd_team()).await.unwrap();

    client
        .add_team(
            &TeamBuilder::new("platform")
                .member("B", "Bob")
                .member("P", "Pat")
                .build(),
        )
        .await
        .unwrap();

    let bob = client.set_is_active("B", true).await.unwrap();
    assert_eq!(bob.team_name, "platform");

    let pr = client.create_pr("pr-1", "Infra", "B").await.unwrap();
    assert_eq!(pr.assigned_reviewers, vec!["P".to_string()]);
}
