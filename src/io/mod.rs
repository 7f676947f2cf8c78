/// CSV export for annual projection results.
pub mod export;
