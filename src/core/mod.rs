pub mod row;
pub mod types;
pub mod value;

pub use row::{Cell, Row};
pub use types::*;
pub use value::{DateToken, parse_amount, parse_date};
