pub mod user;
pub mod repository;
pub mod language;
pub mod framework;
pub mod stats;
pub mod report;

pub use user::*;
pub use repository::*;
pub use language::*;
pub use framework::*;
pub use stats::*;
pub use report::*;
