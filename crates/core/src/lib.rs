//! Core types shared by the grid engine, export and presentation crates.

pub mod cell;
pub mod error;
pub mod field;
pub mod row;
pub mod sample;

pub use cell::{CellRef, Direction};
pub use error::GridError;
pub use field::{default_columns, Column, Field, FieldKind};
pub use row::{Priority, Row, RowId, Status};
