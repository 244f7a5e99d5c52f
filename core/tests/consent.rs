use braced_core::config::{ANALYTICS_MEASUREMENT_ID, CONSENT_STORAGE_KEY};
use braced_core::{
    apply_stored_consent, record_consent, AnalyticsHost, ConsentChoice, ConsentState,
    MemoryStore, PrefStore,
};

#[derive(Default)]
struct FakeAnalytics {
    loaded: bool,
    injected: Vec<String>,
}

impl AnalyticsHost for FakeAnalytics {
    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn inject(&mut self, measurement_id: &str) {
        self.loaded = true;
        self.injected.push(measurement_id.to_string());
    }
}

#[test]
fn first_visit_shows_banner_without_analytics() {
    let store = MemoryStore::new();
    let mut host = FakeAnalytics::default();
    let outcome = apply_stored_consent(&store, &mut host);
    assert_eq!(outcome.state, ConsentState::Unset);
    assert!(outcome.show_banner);
    assert!(!outcome.analytics_injected);
    assert!(host.injected.is_empty());
}

#[test]
fn accept_persists_and_loads_analytics_once() {
    let mut store = MemoryStore::new();
    let mut host = FakeAnalytics::default();
    let outcome = record_consent(&mut store, &mut host, ConsentChoice::Accept);
    assert_eq!(outcome.state, ConsentState::Accepted);
    assert!(!outcome.show_banner);
    assert!(outcome.analytics_injected);
    assert_eq!(store.get(CONSENT_STORAGE_KEY).as_deref(), Some("accepted"));
    assert_eq!(host.injected, vec![ANALYTICS_MEASUREMENT_ID.to_string()]);

    // Same page: the loader is already present.
    let again = apply_stored_consent(&store, &mut host);
    assert!(!again.analytics_injected);
    assert_eq!(host.injected.len(), 1);

    // Reload: a fresh page injects from the stored flag, banner stays hidden.
    let mut fresh = FakeAnalytics::default();
    let reload = apply_stored_consent(&store, &mut fresh);
    assert!(!reload.show_banner);
    assert!(reload.analytics_injected);
    assert_eq!(fresh.injected.len(), 1);
}

#[test]
fn reject_persists_without_analytics() {
    let mut store = MemoryStore::new();
    let mut host = FakeAnalytics::default();
    let outcome = record_consent(&mut store, &mut host, ConsentChoice::Reject);
    assert_eq!(outcome.state, ConsentState::Rejected);
    assert!(!outcome.analytics_injected);
    assert_eq!(store.get(CONSENT_STORAGE_KEY).as_deref(), Some("rejected"));

    let reload = apply_stored_consent(&store, &mut host);
    assert!(!reload.show_banner);
    assert!(!reload.analytics_injected);
    assert!(host.injected.is_empty());
}

#[test]
fn unknown_stored_value_asks_again() {
    let mut store = MemoryStore::new();
    store.set(CONSENT_STORAGE_KEY, "maybe");
    let mut host = FakeAnalytics::default();
    let outcome = apply_stored_consent(&store, &mut host);
    assert_eq!(outcome.state, ConsentState::Unset);
    assert!(outcome.show_banner);
}

#[test]
fn accept_skips_injection_when_loader_exists() {
    let mut store = MemoryStore::new();
    let mut host = FakeAnalytics {
        loaded: true,
        ..FakeAnalytics::default()
    };
    let outcome = record_consent(&mut store, &mut host, ConsentChoice::Accept);
    assert!(!outcome.analytics_injected);
    assert!(host.injected.is_empty());
}
