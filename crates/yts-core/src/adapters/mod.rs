//! Catalog provider implementations.

mod yts;

pub use yts::YtsProvider;
