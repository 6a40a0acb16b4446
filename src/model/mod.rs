//! Types that represent the core data model, such as `Record` and `FilterSpec`.
mod day;
mod filter;
mod record;
mod sort;
mod yen;

pub use day::{has_canonical_shape, Day, DayError};
pub use filter::{FilterField, FilterSpec};
pub use record::{Record, Records};
pub use sort::{Column, Order, SortSpec, Sorts, Table};
pub use yen::{Yen, YenError};
