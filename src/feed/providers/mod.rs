// src/feed/providers/mod.rs
pub mod http;
pub mod sample;

pub use http::HttpProvider;
pub use sample::SampleProvider;
