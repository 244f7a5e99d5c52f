use braced_core::config::{
    CONSENT_STORAGE_KEY, CONTACT_EMAIL, DEFAULT_LANG, LANG_STORAGE_KEY, NARROW_VIEWPORT_PX,
    PANEL_KEYWORDS,
};
use braced_core::{Lang, PanelKey, PanelKeyError};

#[test]
fn generated_config_is_consistent() {
    assert!(!PANEL_KEYWORDS.is_empty());
    assert_ne!(LANG_STORAGE_KEY, CONSENT_STORAGE_KEY);
    assert!(CONTACT_EMAIL.contains('@'));
    assert!(NARROW_VIEWPORT_PX > 0.0);
    assert_eq!(DEFAULT_LANG.parse::<Lang>().unwrap(), Lang::default());
}

#[test]
fn every_keyword_round_trips_through_its_index() {
    for (index, keyword) in PANEL_KEYWORDS.iter().enumerate() {
        let key = PanelKey::parse(keyword).unwrap();
        assert_eq!(key.index(), index);
        assert_eq!(key.keyword(), *keyword);
        assert_eq!(key.to_string(), *keyword);
        assert_eq!(PanelKey::from_index(index), Some(key));
    }
    assert_eq!(PanelKey::from_index(PANEL_KEYWORDS.len()), None);
}

#[test]
fn keyword_parsing_trims_and_rejects() {
    let first = PANEL_KEYWORDS[0];
    let padded = format!("  {first} ");
    assert_eq!(padded.parse::<PanelKey>().unwrap().index(), 0);
    assert_eq!(PanelKey::parse("   "), Err(PanelKeyError::Empty));
    let err = PanelKey::parse("nowhere").unwrap_err();
    assert_eq!(err, PanelKeyError::Unknown("nowhere".to_string()));
    assert_eq!(err.to_string(), "unknown panel keyword 'nowhere'");
}

#[test]
fn custom_keyword_lists_resolve_independently() {
    let keywords = ["home", "work"];
    assert_eq!(PanelKey::parse_in("work", &keywords).unwrap().index(), 1);
    assert!(PanelKey::parse_in("casos", &keywords).is_err());
}
