// ── Canonical domain model ──
//
// Domain types decoded from the raw cloud payloads in `ezvy-api`.
// Everything downstream (store, CLI rendering) works with these, never
// with the wire structs.

pub mod device;
pub mod doorbell;
pub mod switch;

pub use device::Device;
pub use doorbell::DoorbellEvent;
pub use switch::{Switch, SwitchKind};
