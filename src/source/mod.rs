//! Source module
//!
//! Reads the public brewery directory API page by page.

mod client;

pub use client::SourceClient;

#[cfg(test)]
mod tests;
