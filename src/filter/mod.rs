pub mod error;
pub mod paging;
pub mod sort;

pub use error::FilterError;
pub use paging::Paging;
pub use sort::{SortDirection, SortExpression, SortTerm};
