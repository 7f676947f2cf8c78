pub mod engine;
pub mod kpi;
/// Generation-mix split, capacity clamping, and derived metrics.
pub mod mix;
/// Compound-growth demand projection.
pub mod projector;
pub mod tables;
pub mod types;
