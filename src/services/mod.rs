pub mod backend;
pub mod http;
pub mod reference;
pub mod resilience;
pub mod sheets;

pub use backend::{GraphqlClient, GraphqlRequest, LeagueBackend};
pub use http::HttpClient;
pub use reference::ReferenceClient;
pub use resilience::{retry_with_backoff, RetryConfig};
pub use sheets::{GoogleSheetsClient, RankedSheet, SheetSource};
