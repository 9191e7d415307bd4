use super::*;

#[test]
fn default_filter_only_sends_sort() {
    let pairs = MeetingFilter::default().query_pairs();
    assert_eq!(pairs, vec![("sort".to_owned(), "latest".to_owned())]);
}

#[test]
fn filter_trims_and_skips_blank_fields() {
    let filter = MeetingFilter {
        keyword: "  board games ".to_owned(),
        category: Some("  ".to_owned()),
        region: Some("Seoul".to_owned()),
        status: Some(MeetingStatus::Open),
        sort: SortOrder::StartingSoon,
    };
    assert_eq!(
        filter.query_pairs(),
        vec![
            ("keyword".to_owned(), "board games".to_owned()),
            ("region".to_owned(), "Seoul".to_owned()),
            ("status".to_owned(), "open".to_owned()),
            ("sort".to_owned(), "startsAt".to_owned()),
        ]
    );
}

#[test]
fn sort_order_round_trips_through_param() {
    for order in SortOrder::ALL {
        assert_eq!(SortOrder::from_param(order.as_param()), order);
    }
    assert_eq!(SortOrder::from_param("bogus"), SortOrder::Latest);
}
