use crate::app::services::transform::TransformStats;

#[test]
fn test_success_rate() {
    let mut stats = TransformStats::new();
    assert_eq!(stats.success_rate(), 100.0);

    stats.subsets = 4;
    stats.failed_subsets = 1;
    assert_eq!(stats.success_rate(), 75.0);
    assert!(!stats.is_clean());
}

#[test]
fn test_merge_and_summary() {
    let mut first = TransformStats::new();
    first.messages = 1;
    first.subsets = 2;
    first.features = 10;

    let mut second = TransformStats::new();
    second.messages = 1;
    second.failed_messages = 1;
    second.add_error("decoder error".to_string());

    first.merge(&second);
    assert_eq!(first.messages, 2);
    assert_eq!(first.failed_messages, 1);
    assert_eq!(first.error_messages, vec!["decoder error".to_string()]);

    let summary = first.summary();
    assert!(summary.contains("2 messages (1 failed)"));
    assert!(summary.contains("10 features"));
}
