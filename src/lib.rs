pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod expenses;
pub mod extract;
pub mod state;
pub mod storage;
pub mod users;

#[cfg(test)]
mod test_support;
