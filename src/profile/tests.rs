use super::*;

#[test]
fn test_has_signal_requires_tweets_or_interests() {
    assert!(!Profile::new("v1").has_signal());
    assert!(!Profile::new("v1").with_summary("Engineer").has_signal());
    assert!(!Profile::new("v1").with_interests("   ").has_signal());
    assert!(Profile::new("v1").with_interests("Go, AI").has_signal());
    assert!(Profile::new("v1").with_tweets(["hello"]).has_signal());
}

#[test]
fn test_recent_tweets_truncates_in_order() {
    let profile = Profile::new("v1").with_tweets(["a", "b", "c", "d", "e", "f", "g"]);

    assert_eq!(profile.recent_tweets(5), &["a", "b", "c", "d", "e"]);
    assert_eq!(profile.recent_tweets(10).len(), 7);
    assert!(profile.recent_tweets(0).is_empty());
}

#[test]
fn test_profile_deserializes_with_missing_optional_fields() {
    let profile: Profile = serde_json::from_str(r#"{"id": "u1", "name": "Ada"}"#).unwrap();

    assert_eq!(profile.id, "u1");
    assert_eq!(profile.name, "Ada");
    assert!(profile.summary.is_empty());
    assert!(profile.tweets.is_empty());
}

#[test]
fn test_seed_record_into_result() {
    let before = Utc::now();
    let (viewer, result) = SeedRecord::new("v1", "c1", 88.5, "Good match.").into_result();

    assert_eq!(viewer, "v1");
    assert_eq!(result.target_id, "c1");
    assert_eq!(result.score, 88.5);
    assert_eq!(result.reason, "Good match.");
    assert!(result.timestamp >= before);
}

#[test]
fn test_seed_record_reason_defaults_to_empty() {
    let record: SeedRecord =
        serde_json::from_str(r#"{"viewer_id": "v1", "target_id": "c1", "score": 12}"#).unwrap();

    assert_eq!(record.score, 12.0);
    assert!(record.reason.is_empty());
}
