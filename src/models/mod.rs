pub mod aggregate;
pub mod sale;

pub use aggregate::*;
pub use sale::*;
