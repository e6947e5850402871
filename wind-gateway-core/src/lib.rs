pub mod domain;
pub mod error;
pub mod normalizer;
pub mod source;
pub mod traits;

pub use domain::*;
pub use error::*;
pub use normalizer::normalize;
pub use source::*;
pub use traits::*;
