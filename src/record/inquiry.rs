// src/record/inquiry.rs
use serde::Serialize;

use crate::record::{Reportable, SheetRecord};
use crate::sheet::resolve::{FieldSpec, HeaderIndex};

/// Outcome of a quotation inquiry, as maintained in the STATUS column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InquiryStatus {
    Won,
    Lost,
    Pending,
    #[default]
    Unknown,
}

impl InquiryStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "WON" => Self::Won,
            "LOST" => Self::Lost,
            "PENDING" => Self::Pending,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Won => "WON",
            Self::Lost => "LOST",
            Self::Pending => "PENDING",
            Self::Unknown => "UNKNOWN",
        }
    }
}

// Alias tables follow the spellings seen in real exports, including the
// trailing space on "WEEK " and the double space in "PDA / QTN  COST".
const FIELDS: &[FieldSpec] = &[
    FieldSpec { key: "week", aliases: &["WEEK ", "WEEK"] },
    FieldSpec { key: "month", aliases: &["MONTH"] },
    FieldSpec { key: "date", aliases: &["DATE"] },
    FieldSpec { key: "year", aliases: &["YEAR"] },
    FieldSpec { key: "vessel", aliases: &["VESSEL", "VESSEL NAME"] },
    FieldSpec { key: "port", aliases: &["PORT"] },
    FieldSpec { key: "client", aliases: &["CLIENT", "CUSTOMER"] },
    FieldSpec { key: "qtn_value", aliases: &["QTN VALUE", "QTN  VALUE"] },
    FieldSpec { key: "qtn_cost", aliases: &["PDA / QTN  COST", "PDA / QTN COST"] },
    FieldSpec { key: "profit", aliases: &["PROFIT", "EST PROFIT"] },
    FieldSpec { key: "status", aliases: &["STATUS"] },
    FieldSpec { key: "remarks", aliases: &["REMARKS", "REMARK"] },
];

/// One quotation inquiry row mapped to the canonical shape. Numeric
/// fields are always finite and default to zero; text fields are trimmed
/// and default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct InquiryRecord {
    pub sl: i64,
    pub week: u32,
    pub month: String,
    pub date: u32,
    pub year: i32,
    pub vessel: String,
    pub port: String,
    pub client: String,
    pub qtn_value: f64,
    pub qtn_cost: f64,
    pub profit: f64,
    pub status: InquiryStatus,
    pub remarks: String,
}

impl SheetRecord for InquiryRecord {
    fn field_specs() -> &'static [FieldSpec] {
        FIELDS
    }

    fn from_row(index: &HeaderIndex, row: &[String]) -> Self {
        Self {
            sl: index.identifier_number(row) as i64,
            week: index.number(row, "week") as u32,
            month: index.text(row, "month"),
            date: index.number(row, "date") as u32,
            year: index.number(row, "year") as i32,
            vessel: index.text(row, "vessel"),
            port: index.text(row, "port"),
            client: index.text(row, "client"),
            qtn_value: index.number(row, "qtn_value"),
            qtn_cost: index.number(row, "qtn_cost"),
            profit: index.number(row, "profit"),
            status: InquiryStatus::parse(&index.text(row, "status")),
            remarks: index.text(row, "remarks"),
        }
    }

    fn is_meaningful(&self) -> bool {
        !self.vessel.is_empty() || self.qtn_value > 0.0 || self.sl > 0
    }
}

impl Reportable for InquiryRecord {
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
        self.qtn_value
    }
    fn cost(&self) -> f64 {
        self.qtn_cost
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
