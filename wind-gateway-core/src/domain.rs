pub mod query;
pub mod result;
pub mod catalog;

pub use query::*;
pub use result::*;
pub use catalog::*;
