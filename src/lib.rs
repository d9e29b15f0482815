pub mod api;
pub mod core;
pub mod matching;
pub mod model;
pub mod session;
pub mod stats;
pub mod store;
