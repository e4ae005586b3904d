//! Orchestrates the analysis pipeline end to end: a query goes
//! editor → [`langsvc_source::Workspace::contents`] →
//! [`langsvc_parse::completion_context`] → [`langsvc_prune::prune`] (when a
//! real Compiler Facade needs it) → the [`langsvc_facade::CompilerFacade`] →
//! [`langsvc_check`] on any residue the facade couldn't reach →
//! [`langsvc_complete::complete`] → a ranked candidate list.
//!
//! [`Service`] owns the single long-lived [`langsvc_source::Workspace`];
//! [`session::QuerySession`] and [`cancellation::CancellationToken`] scope
//! one editor request's cancellation and content snapshot.

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

mod cancellation;
mod config;
mod service;
mod session;

pub use cancellation::CancellationToken;
pub use config::ServiceConfig;
pub use service::Service;
pub use session::QuerySession;
