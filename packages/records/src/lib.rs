//! # Record types shared by the API client and the UI
//!
//! Plain `Serialize + Deserialize` data. Nothing in this crate performs I/O.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`files`] | [`FileRecord`], its create/update inputs, [`FileQuery`] and [`Page`]. |
//! | [`transactions`] | [`Transaction`], [`TransactionFilter`] and the derived [`TransactionSummary`]. |
//! | [`schema`] | [`ColumnDefinition`] for the schema-mutation endpoint. |

pub mod files;
pub mod schema;
pub mod transactions;

pub use files::{
    AccessLevel, FileCreateInput, FileQuery, FileRecord, FileUpdateInput, Page, UnknownAccessLevel,
};
pub use schema::{ColumnDefinition, ColumnType, UnknownColumnType};
pub use transactions::{DepartmentShare, Transaction, TransactionFilter, TransactionSummary};
