pub mod classify;
pub mod engine;
pub mod filter;
pub mod order;
