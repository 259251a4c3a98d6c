//! Rate limiting and retry control for remote mutations.
//!
//! Every mutating call the replication engine makes goes through a
//! [`RetryController`]. When the remote service answers with a throttling
//! response the controller waits for the duration the service asked for and
//! reissues the identical call, for as long as the service keeps throttling.
//! Any other error is handed back to the caller untouched.
//!
//! Proactive pacing is optional: with `max_mutations_per_minute` set, a
//! governor quota spaces calls out before they are sent.

mod config;
mod controller;

pub use config::RetryConfig;
pub use controller::RetryController;
