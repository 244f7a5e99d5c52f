pub mod config;
pub mod consent;
pub mod gesture;
pub mod grid;
pub mod headless;
pub mod lang;
pub mod nav;
pub mod panel_key;
pub mod particles;
pub mod schedule;
pub mod silhouette;
pub mod store;
pub mod view;

pub use consent::{
    apply_stored_consent, ensure_analytics, record_consent, AnalyticsHost, ConsentChoice,
    ConsentOutcome, ConsentState,
};
pub use gesture::{ScrollMetrics, StepDirection, SwipeGesture, WheelAccumulator};
pub use grid::SpatialGrid;
pub use headless::HeadlessView;
pub use lang::{leaf_text, Lang, ParseLangError};
pub use nav::{InputResponse, NavKey, Navigator, TransitionPhase};
pub use panel_key::{PanelKey, PanelKeyError};
pub use particles::{assign_targets, phase_angle, Particle, ParticleField, ParticleTuning, Surface};
pub use schedule::{NavTimer, Scheduled, TimerDriver, VirtualClock, Wake};
pub use store::{MemoryStore, PrefStore};
pub use view::NavView;
