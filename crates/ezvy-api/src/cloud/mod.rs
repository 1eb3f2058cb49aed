// Cloud API client modules
//
// Hand-written client for the EZVIZ cloud endpoints. Covers login, the
// device page list, switch commands, and doorbell alarm operations, all
// wrapped in the standard `{ meta: { code, message }, data: ... }` envelope.

pub mod auth;
pub mod client;
pub mod devices;
pub mod doorbell;
pub mod models;
pub mod switches;

pub use client::CloudClient;
