//! Histogram streamers, decoded into `tsf_core` tables.

mod th1;
mod th2;

use tsf_core::Table;

use crate::error::{Result, RootError};

/// Whether this reader can decode objects of `class_name`.
pub fn is_supported_class(class_name: &str) -> bool {
    matches!(class_name, "TH1D" | "TH1F" | "TH2D" | "TH2F")
}

/// Decode a histogram from its decompressed payload.
pub fn read_table(payload: &[u8], class_name: &str) -> Result<Table> {
    match class_name {
        "TH1D" => th1::read_th1(payload, Precision::Double).map(Table::OneD),
        "TH1F" => th1::read_th1(payload, Precision::Float).map(Table::OneD),
        "TH2D" => th2::read_th2(payload, Precision::Double).map(Table::TwoD),
        "TH2F" => th2::read_th2(payload, Precision::Float).map(Table::TwoD),
        _ => Err(RootError::UnsupportedClass(class_name.to_string())),
    }
}

/// Storage type of the bin-content array (`TArrayD` or `TArrayF`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Precision {
    Double,
    Float,
}

pub(crate) fn table_error(e: tsf_core::Error) -> RootError {
    RootError::Deserialization(e.to_string())
}
