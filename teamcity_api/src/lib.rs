mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::{Auth, Client};
pub use self::errors::Error;
pub use self::query::{BranchFilter, BuildQuery, ChangeQuery, Query};
