// Service exports
pub mod directory;
pub mod locator_api;
pub mod session;

pub use directory::StoreDirectory;
pub use locator_api::{LocatorApiClient, LocatorApiError};
pub use session::{ChatExchange, ChatSessions, SessionLimits};
