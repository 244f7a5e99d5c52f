use crate::config::{ANALYTICS_MEASUREMENT_ID, CONSENT_STORAGE_KEY};
use crate::store::PrefStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsentState {
    #[default]
    Unset,
    Accepted,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsentChoice {
    Accept,
    Reject,
}

impl ConsentState {
    /// Unknown stored values read as `Unset` so the banner asks again.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("accepted") => ConsentState::Accepted,
            Some("rejected") => ConsentState::Rejected,
            _ => ConsentState::Unset,
        }
    }

    pub fn as_stored(self) -> Option<&'static str> {
        match self {
            ConsentState::Unset => None,
            ConsentState::Accepted => Some("accepted"),
            ConsentState::Rejected => Some("rejected"),
        }
    }

    pub fn banner_visible(self) -> bool {
        self == ConsentState::Unset
    }

    pub fn analytics_allowed(self) -> bool {
        self == ConsentState::Accepted
    }

    pub fn load(store: &impl PrefStore) -> Self {
        Self::from_stored(store.get(CONSENT_STORAGE_KEY).as_deref())
    }
}

impl From<ConsentChoice> for ConsentState {
    fn from(choice: ConsentChoice) -> Self {
        match choice {
            ConsentChoice::Accept => ConsentState::Accepted,
            ConsentChoice::Reject => ConsentState::Rejected,
        }
    }
}

/// Page-side analytics loader. `is_loaded` reflects whether the global
/// queueing function already exists.
pub trait AnalyticsHost {
    fn is_loaded(&self) -> bool;
    fn inject(&mut self, measurement_id: &str);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConsentOutcome {
    pub state: ConsentState,
    pub show_banner: bool,
    pub analytics_injected: bool,
}

/// Injects the analytics loader unless it is already present.
pub fn ensure_analytics(host: &mut impl AnalyticsHost) -> bool {
    if host.is_loaded() {
        return false;
    }
    host.inject(ANALYTICS_MEASUREMENT_ID);
    true
}

/// Start-up path: read the stored flag once and act on it.
pub fn apply_stored_consent(
    store: &impl PrefStore,
    host: &mut impl AnalyticsHost,
) -> ConsentOutcome {
    let state = ConsentState::load(store);
    let analytics_injected = state.analytics_allowed() && ensure_analytics(host);
    ConsentOutcome {
        state,
        show_banner: state.banner_visible(),
        analytics_injected,
    }
}

/// Banner button path: persist the choice, then inject on accept.
pub fn record_consent(
    store: &mut impl PrefStore,
    host: &mut impl AnalyticsHost,
    choice: ConsentChoice,
) -> ConsentOutcome {
    let state = ConsentState::from(choice);
    if let Some(value) = state.as_stored() {
        store.set(CONSENT_STORAGE_KEY, value);
    }
    let analytics_injected = state.analytics_allowed() && ensure_analytics(host);
    ConsentOutcome {
        state,
        show_banner: false,
        analytics_injected,
    }
}
