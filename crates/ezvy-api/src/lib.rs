// ezvy-api: Async Rust client for the EZVIZ cloud device API

pub mod cloud;
pub mod error;
pub mod region;
pub mod transport;

pub use cloud::doorbell::AlarmQuery;
pub use cloud::models::SessionTokens;
pub use cloud::CloudClient;
pub use error::Error;
pub use region::ApiRegion;
pub use transport::TransportConfig;
