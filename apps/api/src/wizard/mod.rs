// Resume wizard: six sequential steps over one in-progress record.
//
// `manager` holds the synchronous state machine, `sessions` keeps one manager
// per open wizard, `handlers` exposes both over HTTP.

pub mod fields;
pub mod handlers;
pub mod manager;
pub mod sessions;
pub mod steps;
pub mod validation;

pub use manager::{FormStateManager, NavigationError, SubmitError};
pub use sessions::{discard_on_identity_change, SessionError, WizardSessions};
