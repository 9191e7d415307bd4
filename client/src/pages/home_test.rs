use super::*;

#[test]
fn build_filter_drops_blank_fields() {
    let filter = build_filter("  ", "", " ", "", SortOrder::Latest);
    assert_eq!(filter, MeetingFilter::default());
}

#[test]
fn build_filter_parses_status_and_trims() {
    let filter = build_filter(" chess ", "study", " north ", "closed", SortOrder::Popular);
    assert_eq!(filter.keyword, "chess");
    assert_eq!(filter.category.as_deref(), Some("study"));
    assert_eq!(filter.region.as_deref(), Some("north"));
    assert_eq!(filter.status, Some(MeetingStatus::Closed));
    assert_eq!(filter.sort, SortOrder::Popular);
}

#[test]
fn build_filter_ignores_unknown_status() {
    assert_eq!(build_filter("", "", "", "archived", SortOrder::Latest).status, None);
}
