use pr_reviewer_testing::{ClientError, ReviewerApiClient, TeamBuilder};

#[test]
fn test_team_builder_wire_shape() {
    let team = TeamBuilder::new("payments")
        .member("u1", "Alice")
        .with_member("u2", "Bob", true)
        .inactive_member("u3", "Carol")
        .build();

    let json = serde_json::to_value(&team).unwrap();

    assert_eq!(json["team_name"], "payments");
    assert_eq!(json["members"][0]["user_id"], "u1");
    assert_eq!(json["members"][0]["username"], "Alice");
    assert_eq!(json["members"][0]["is_active"], true);
    assert_eq!(json["members"][2]["is_active"], false);
    assert_eq!(json["members"].as_array().unwrap().len(), 3);
}

#[test]
fn test_empty_team_serializes_empty_members() {
    let json = serde_json::to_value(TeamBuilder::new("solo").build()).unwrap();

    assert_eq!(json["members"], serde_json::json!([]));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_error() {
    let client = ReviewerApiClient::new("http://127.0.0.1:1");

    let err = client.get_team("backend").await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.code().is_none());
}
