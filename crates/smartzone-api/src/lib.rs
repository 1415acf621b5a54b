// smartzone-api: Async Rust client for the Ruckus SmartZone public REST API
//
// A `SmartZoneClient` logs in with username/password to obtain a service
// ticket, attaches it to every call, and logs out to invalidate it. List
// endpoints come in single-page (`list_*`) and follow-every-page
// (`list_all_*`) flavors.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod transport;

mod aps;
mod groups;
mod paginate;
mod session;
mod system;
mod zones;

pub use auth::{Credentials, ServiceTicket};
pub use client::{DEFAULT_API_VERSION, DEFAULT_PORT, SmartZoneClient};
pub use error::{Error, PartialList};
pub use models::{ListResponse, NamedObject, Opaque};
pub use query::{ApQuery, DEFAULT_LIST_SIZE, ListOptions, QueryFilter, SortDirection, SortInfo};
pub use transport::{TlsMode, TransportConfig};
