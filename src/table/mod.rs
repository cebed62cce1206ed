pub mod engine;
pub mod filter;
pub mod sort;

pub use engine::Table;
pub use filter::{FilterState, passes, row_visible};
pub use sort::{ActiveSort, SortDirection, SortState};
