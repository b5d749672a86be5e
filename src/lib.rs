//! HTTP service that screenshots web pages and publishes them to S3.

pub mod api;
pub mod error;
pub mod screenshot;
pub mod storage;
pub mod utils;
