//! HTTP handler modules for linkstash-api.

pub mod links;
