use bwl_util_core::client::{parse_listing, ListingTrim};

#[test]
fn header_and_trailer_trim_normalises_identifiers() {
    let body = "\"ID\"\n/\"A1\"\n/\"B2\"\n";
    let ids = parse_listing(body, ListingTrim::HeaderAndTrailer);
    let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "B2"]);
}

#[test]
fn header_only_trim_keeps_the_trailing_blank_entry() {
    // The final line break leaves a blank entry; this policy keeps it.
    let body = "\"ID\"\n/\"A1\"\n/\"B2\"\n";
    let ids = parse_listing(body, ListingTrim::HeaderOnly);
    let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["A1", "B2", ""]);
}

#[test]
fn unwrapped_identifiers_pass_through_unchanged() {
    let body = "\"ID\"\nplain-id\n";
    let ids = parse_listing(body, ListingTrim::HeaderAndTrailer);
    assert_eq!(ids.len(), 1);
    assert_eq!(ids[0].as_str(), "plain-id");
}

#[test]
fn empty_body_yields_no_identifiers() {
    assert!(parse_listing("", ListingTrim::HeaderOnly).is_empty());
    assert!(parse_listing("", ListingTrim::HeaderAndTrailer).is_empty());
}

#[test]
fn header_only_body_yields_no_identifiers() {
    assert!(parse_listing("\"ID\"", ListingTrim::HeaderAndTrailer).is_empty());
    assert!(parse_listing("\"ID\"\n", ListingTrim::HeaderAndTrailer).is_empty());
    assert!(parse_listing("\"ID\"", ListingTrim::HeaderOnly).is_empty());
}
