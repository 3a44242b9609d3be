//! pospac lib test modules
pub mod toolkit;

mod detection;
mod record;
