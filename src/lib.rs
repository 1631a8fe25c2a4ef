//! Courier - a small HTTP/1.1 file and echo server
//!
//! Core library for HTTP parsing, routing and stored files.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
pub mod storage;
