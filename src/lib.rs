pub mod audit;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod crypto;
pub mod errors;
pub mod lockout;
pub mod session;
pub mod storage;
pub mod vault;
