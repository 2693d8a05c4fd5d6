//! The chat request pipeline.

pub mod service;
