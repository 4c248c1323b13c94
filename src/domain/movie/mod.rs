//! Movie catalog domain.

mod aggregate;

pub use aggregate::Movie;
