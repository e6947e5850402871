pub mod market;
pub mod reference;
pub mod status;

pub use market::*;
pub use reference::*;
pub use status::*;
