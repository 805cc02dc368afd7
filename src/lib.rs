pub mod cache;
pub mod calendar;
pub mod config;
pub mod handler;
pub mod model;
pub mod normalize;
pub mod resolver;
pub mod sources;
pub mod tips;
