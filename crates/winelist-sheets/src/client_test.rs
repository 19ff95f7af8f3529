use super::*;

#[test]
fn published_csv_url_builds_export_link() {
    let url = published_csv_url("1AbC-d_E", 0).unwrap();
    assert_eq!(
        url,
        "https://docs.google.com/spreadsheets/d/1AbC-d_E/export?format=csv&gid=0"
    );
}

#[test]
fn published_csv_url_includes_gid() {
    let url = published_csv_url("1AbC", 1_234_567).unwrap();
    assert!(url.ends_with("gid=1234567"), "got: {url}");
}

#[test]
fn published_csv_url_trims_id() {
    let url = published_csv_url("  1AbC  ", 0).unwrap();
    assert!(url.contains("/d/1AbC/export"), "got: {url}");
}

#[test]
fn published_csv_url_rejects_blank_id() {
    let err = published_csv_url("   ", 0).unwrap_err();
    assert!(
        matches!(err, SheetError::InvalidSheetUrl { .. }),
        "expected InvalidSheetUrl, got: {err:?}"
    );
}

#[test]
fn published_csv_url_rejects_path_characters() {
    let err = published_csv_url("abc/../edit", 0).unwrap_err();
    assert!(matches!(err, SheetError::InvalidSheetUrl { .. }));
}

#[test]
fn parse_sheet_url_accepts_https() {
    let url = parse_sheet_url("https://example.com/menu.csv").unwrap();
    assert_eq!(url.host_str(), Some("example.com"));
}

#[test]
fn parse_sheet_url_rejects_other_schemes() {
    let err = parse_sheet_url("file:///tmp/menu.csv").unwrap_err();
    assert!(
        matches!(err, SheetError::InvalidSheetUrl { ref reason, .. } if reason.contains("file")),
        "expected InvalidSheetUrl, got: {err:?}"
    );
}

#[test]
fn parse_sheet_url_rejects_garbage() {
    assert!(parse_sheet_url("not-a-url").is_err());
}

#[test]
fn extract_host_strips_scheme_and_path() {
    assert_eq!(
        extract_host("https://docs.google.com/spreadsheets/d/x/export"),
        "docs.google.com"
    );
}

#[test]
fn extract_host_falls_back_to_input() {
    assert_eq!(extract_host("not a url"), "not a url");
}
