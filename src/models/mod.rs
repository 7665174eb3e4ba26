pub mod row;
pub mod tabular;

pub use row::{Row, RowPayload};
pub use tabular::Tabular;
