//! Business logic layer between `ezvy-api` and UI consumers.
//!
//! This crate owns the domain model and session lifecycle for the
//! EZVIZ CLI workspace:
//!
//! - **[`Account`]** — Per-account session facade.
//!   [`connect()`](Account::connect) authenticates once (no silent
//!   retry on bad credentials) and performs an initial device refresh;
//!   [`spawn_poll_task()`](Account::spawn_poll_task) keeps the switch
//!   cache fresh in the background. Each account gets its own
//!   `Account` — there is no shared global session.
//!
//! - **[`SwitchStore`]** — Concurrent switch-state cache built on
//!   `DashMap` plus a `tokio::sync::watch` snapshot channel. Refreshes
//!   use upsert-then-prune so subscribers never observe a transient
//!   empty state.
//!
//! - **Domain model** ([`model`]) — Canonical types (`Device`,
//!   `Switch`, `SwitchKind`, `DoorbellEvent`) decoded from the raw
//!   cloud payloads. `SwitchKind` is data-driven: new channel codes
//!   decode as `SwitchKind::Other(code)` without code changes.

pub mod account;
pub mod config;
pub mod error;
pub mod model;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use account::Account;
pub use config::AccountConfig;
pub use error::CoreError;
pub use store::SwitchStore;

// Re-export model types at the crate root for ergonomics.
pub use model::{Device, DoorbellEvent, Switch, SwitchKind};

pub use ezvy_api::{ApiRegion, SessionTokens};
