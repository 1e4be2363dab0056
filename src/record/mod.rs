// src/record/mod.rs
pub mod inquiry;
pub mod shipment;

pub use inquiry::{InquiryRecord, InquiryStatus};
pub use shipment::{ShipmentRecord, ShipmentStatus};

use crate::sheet::resolve::{FieldSpec, HeaderIndex};

/// A canonical record shape that can be mapped from one sheet row.
///
/// Mapping must not fail: every unreadable cell collapses to its coercion
/// default, so one bad row never takes down a refresh cycle.
pub trait SheetRecord: Sized + Send + Sync + 'static {
    /// Canonical fields and their accepted header spellings.
    fn field_specs() -> &'static [FieldSpec];

    /// Map one raw row through the resolved header index.
    fn from_row(index: &HeaderIndex, row: &[String]) -> Self;

    /// Whether the mapped record carries any signal worth keeping: a
    /// non-empty name, a positive primary value, or a positive serial.
    /// Rows at the tail of an export are routinely blank; they are
    /// dropped, not reported.
    fn is_meaningful(&self) -> bool;
}

/// Accessors the window filter and aggregator read. Both dashboard
/// shapes implement this, so the reporting layer stays variant-agnostic.
pub trait Reportable {
    fn year(&self) -> i32;
    fn day(&self) -> u32;
    fn month_text(&self) -> &str;
    fn value(&self) -> f64;
    fn cost(&self) -> f64;
    fn profit(&self) -> f64;
    fn status_label(&self) -> &'static str;
    fn group_key(&self) -> &str;
}
