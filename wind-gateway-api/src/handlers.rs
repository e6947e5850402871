pub mod market;
pub mod reference;
pub mod status;
