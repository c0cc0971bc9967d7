use std::io::Cursor;

use spotgraph::utils::*;

#[test]
fn test_extract_playlist_id_from_share_url() {
    assert_eq!(
        extract_playlist_id("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123"),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
}

#[test]
fn test_extract_playlist_id_from_uri_and_bare_id() {
    assert_eq!(
        extract_playlist_id("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M"),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
    assert_eq!(
        extract_playlist_id("  37i9dQZF1DXcBWIGoYBM5M \n"),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
}

#[test]
fn test_extract_playlist_id_strips_fragment_and_trailing_slash() {
    assert_eq!(
        extract_playlist_id("https://open.spotify.com/intl-de/playlist/abc/#top"),
        "abc"
    );
}

#[test]
fn test_song_descriptor_joins_artists() {
    assert_eq!(song_descriptor("Song", &["A", "B"]), "Song by A, B");
    assert_eq!(song_descriptor("Solo", &["Only"]), "Solo by Only");
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(0), "0:00");
    assert_eq!(format_duration(215_000), "3:35");
    assert_eq!(format_duration(59_999), "0:59");
}

#[test]
fn test_code_verifier_shape() {
    let verifier = generate_code_verifier();
    assert_eq!(verifier.len(), 128);
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(verifier, generate_code_verifier());
}

#[test]
fn test_code_challenge_is_s256_of_verifier() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_confirm_defaults_to_yes() {
    let mut out = Vec::new();
    assert!(confirm_from(&mut Cursor::new("\n"), &mut out, "Use name 'x'?").unwrap());
    assert!(confirm_from(&mut Cursor::new("yes\n"), &mut out, "Use name 'x'?").unwrap());
    assert!(!confirm_from(&mut Cursor::new("N\n"), &mut out, "Use name 'x'?").unwrap());
    assert!(!confirm_from(&mut Cursor::new("no\n"), &mut out, "Use name 'x'?").unwrap());
}

#[test]
fn test_prompt_writes_question_and_trims_answer() {
    let mut out = Vec::new();
    let answer = prompt_from(&mut Cursor::new("  Road Trip  \n"), &mut out, "Enter new name: ").unwrap();
    assert_eq!(answer, "Road Trip");
    assert_eq!(String::from_utf8(out).unwrap(), "Enter new name: ");
}
