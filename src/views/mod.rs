//! Page view models derived from the store's records.
//!
//! Every view is recomputed from the current records and filter
//! parameters; nothing is cached between calls.

pub mod earnings;
pub mod export;
pub mod gigs;
pub mod orders;

pub use earnings::{DateRange, EarningsView, STATEMENT_FILE_NAME};
pub use gigs::{GigListing, GigsView};
pub use orders::OrdersView;
