pub mod auth;
pub mod request;

pub use auth::{RequireSession, SessionContext, SessionData};
pub use request::{JsonBody, ResourceId};
