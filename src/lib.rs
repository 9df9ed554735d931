pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod kms;
pub mod storage;
