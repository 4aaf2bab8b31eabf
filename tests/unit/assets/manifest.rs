use super::*;

const CAMEL: &str = r#"[
  { "loUrl": "a_lo.jpg", "loImgW": 100, "loImgH": 80,
    "hiUrl": "a_hi.jpg", "hiImgW": 1000, "hiImgH": 800 },
  { "lo_url": "b_lo.jpg", "lo_width": 90, "lo_height": 60,
    "hi_url": "b_hi.jpg", "hi_width": 900, "hi_height": 600 }
]"#;

#[test]
fn accepts_camel_and_snake_keys() {
    let images = parse_manifest(CAMEL).unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].lo_width, 100);
    assert_eq!(images[1].hi_url, "b_hi.jpg");
}

#[test]
fn source_picks_matching_resolution() {
    let images = parse_manifest(CAMEL).unwrap();
    let lo = images[0].source(Resolution::Lo);
    assert_eq!((lo.url, lo.width, lo.height), ("a_lo.jpg", 100, 80));
    let hi = images[0].source(Resolution::Hi);
    assert_eq!((hi.url, hi.width, hi.height), ("a_hi.jpg", 1000, 800));
}

#[test]
fn empty_manifest_is_rejected() {
    let err = parse_manifest("[]").unwrap_err();
    assert!(err.to_string().contains("must not be empty"));
}

#[test]
fn blank_url_is_rejected() {
    let json = r#"[{ "loUrl": " ", "loImgW": 1, "loImgH": 1,
                     "hiUrl": "x", "hiImgW": 1, "hiImgH": 1 }]"#;
    assert!(parse_manifest(json).is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        parse_manifest("{").unwrap_err(),
        TrailError::Serde(_)
    ));
}
