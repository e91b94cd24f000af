//! kilo-edit-buffer: the row store for the kilo-edit editor.
//!
//! This crate provides [`Row`] and [`RowStore`]:
//! - Each [`Row`] keeps its logical bytes (`chars`), a derived tab-expanded
//!   view (`render`), and one highlight attribute per render byte (`hl`).
//! - [`RowStore`] owns the ordered rows plus the dirty counter, and routes
//!   every mutation through a render rebuild and a highlight rescan so three
//!   invariants hold after every operation:
//!   1. `hl.len() == render.len()` for every row
//!   2. each row's scan starts from its predecessor's open-comment state
//!   3. each row's `idx` equals its position in the store
//!
//! Rescans cascade: when an edit flips a row's end-of-line comment state,
//! the following rows are rescanned (iteratively) until the state stops
//! changing. Mutations never panic on out-of-range positions; they are
//! silent no-ops, callers guard with cursor clamping.

mod row;
mod row_store;

pub use row::{Row, TAB_STOP};
pub use row_store::RowStore;
