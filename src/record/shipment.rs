// src/record/shipment.rs
use serde::Serialize;

use crate::record::{Reportable, SheetRecord};
use crate::sheet::resolve::{FieldSpec, HeaderIndex};

/// Delivery state of a confirmed shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    Delivered,
    InTransit,
    Pending,
    Cancelled,
    #[default]
    Unknown,
}

impl ShipmentStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "DELIVERED" => Self::Delivered,
            "IN TRANSIT" | "IN-TRANSIT" => Self::InTransit,
            "PENDING" => Self::Pending,
            "CANCELLED" | "CANCELED" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Delivered => "DELIVERED",
            Self::InTransit => "IN TRANSIT",
            Self::Pending => "PENDING",
            Self::Cancelled => "CANCELLED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "month", aliases: &["MONTH"] },
    FieldSpec { key: "date", aliases: &["DATE"] },
    FieldSpec { key: "year", aliases: &["YEAR"] },
    FieldSpec { key: "vessel", aliases: &["VESSEL", "VESSEL NAME"] },
    FieldSpec { key: "port", aliases: &["PORT"] },
    FieldSpec { key: "supplier", aliases: &["SUPPLIER", "VENDOR"] },
    FieldSpec { key: "invoice_value", aliases: &["INVOICE VALUE", "INVOICE  VALUE", "VALUE"] },
    FieldSpec { key: "pda_cost", aliases: &["PDA COST", "COST"] },
    FieldSpec { key: "profit", aliases: &["PROFIT"] },
    FieldSpec { key: "status", aliases: &["STATUS"] },
    FieldSpec { key: "remarks", aliases: &["REMARKS", "REMARK"] },
];

/// One confirmed shipment row mapped to the canonical shape. Same
/// defaulting rules as the inquiry variant.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ShipmentRecord {
    pub sl: i64,
    pub month: String,
    pub date: u32,
    pub year: i32,
    pub vessel: String,
    pub port: String,
    pub supplier: String,
    pub invoice_value: f64,
    pub pda_cost: f64,
    pub profit: f64,
    pub status: ShipmentStatus,
    pub remarks: String,
}

impl SheetRecord for ShipmentRecord {
    fn field_specs() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_row(index: &HeaderIndex, row: &[String]) -> Self {
        Self {
            sl: index.identifier_number(row) as i64,
            month: index.text(row, "month"),
            date: index.number(row, "date") as u32,
            year: index.number(row, "year") as i32,
            vessel: index.text(row, "vessel"),
            port: index.text(row, "port"),
            supplier: index.text(row, "supplier"),
            invoice_value: index.number(row, "invoice_value"),
            pda_cost: index.number(row, "pda_cost"),
            profit: index.number(row, "profit"),
            status: ShipmentStatus::parse(&index.text(row, "status")),
            remarks: index.text(row, "remarks"),
        }
    }

    fn is_meaningful(&self) -> bool {
        !self.vessel.is_empty() || self.invoice_value > 0.0 || self.sl > 0
    }
}

impl Reportable for ShipmentRecord {
    fn year(&self) -> i32 {
        self.year
    }
    fn day(&self) -> u32 {
        self.date
    }
    fn month_text(&self) -> &str {
        &self.month
    }
    fn value(&self) -> f64 {
        self.invoice_value
    }
    fn cost(&self) -> f64 {
        self.pda_cost
    }
    fn profit(&self) -> f64 {
        self.profit
    }
    fn status_label(&self) -> &'static str {
        self.status.as_str()
    }
    fn group_key(&self) -> &str {
        &self.vessel
    }
}
