mod common;
pub use self::common::Query;

mod build;
pub use self::build::{BranchFilter, BuildQuery};

mod change;
pub use self::change::ChangeQuery;
