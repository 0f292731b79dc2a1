//! Credit spreads.

mod sovereign;

pub use sovereign::{sovereign_spread, to_bps};
