//! Webhook notification for finished meeting notes.
//!
//! Delivery failures are part of the normal result ([`DispatchOutcome`]),
//! never an error: a run whose page was published stays successful even if
//! the email automation cannot be reached.

pub mod dispatcher;
pub mod transport;

pub use dispatcher::{DispatchOutcome, Dispatcher, NotificationPayload, NOT_CONFIGURED};
pub use transport::{ReqwestTransport, WebhookTransport};
