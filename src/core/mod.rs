pub mod config;
pub mod constants;
pub mod keyring;
pub mod session;
pub mod storage;
