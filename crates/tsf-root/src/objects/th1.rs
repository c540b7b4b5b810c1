//! TH1 base class and TH1D/TH1F.
//!
//! Streamer layout (fields we use are marked `*`):
//! ```text
//! TH1D / TH1F
//!   ├─ TH1
//!   │    ├─ TNamed *         (name, title)
//!   │    ├─ TAttLine, TAttFill, TAttMarker   (skipped via byte count)
//!   │    ├─ fNcells *
//!   │    ├─ fXaxis *, fYaxis *, fZaxis
//!   │    └─ statistics, fSumw2, fOption, fFunctions, ...   (skipped to TH1 end)
//!   └─ TArrayD / TArrayF *   (fNcells contents, under/overflow included)
//! ```

use tsf_core::{Axis, Hist1D};

use super::{Precision, table_error};
use crate::error::{Result, RootError};
use crate::rbuffer::RBuffer;

/// One TAxis as stored.
#[derive(Debug, Clone)]
pub(super) struct AxisInfo {
    pub n_bins: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Variable-width edges; empty for uniform binning.
    pub edges: Vec<f64>,
}

impl AxisInfo {
    pub fn to_axis(&self) -> Result<Axis> {
        if self.edges.is_empty() {
            Axis::uniform(self.n_bins, self.x_min, self.x_max).map_err(table_error)
        } else if self.edges.len() == self.n_bins + 1 {
            Axis::new(self.edges.clone()).map_err(table_error)
        } else {
            Err(RootError::Deserialization(format!(
                "axis has {} bins but {} edges",
                self.n_bins,
                self.edges.len()
            )))
        }
    }
}

/// Fields of the TH1 base shared by 1D and 2D histograms.
pub(super) struct Th1Base {
    pub name: String,
    pub n_cells: usize,
    pub x: AxisInfo,
    pub y: AxisInfo,
}

/// Read a TH1D or TH1F.
pub(super) fn read_th1(payload: &[u8], precision: Precision) -> Result<Hist1D> {
    let mut r = RBuffer::new(payload);
    let (_ver, _end) = r.read_version()?;
    let base = read_th1_base(&mut r)?;
    let raw = read_contents(&mut r, precision, base.n_cells)?;

    let n = base.x.n_bins;
    if base.n_cells != n + 2 {
        return Err(RootError::Deserialization(format!(
            "'{}': fNcells {} does not match {} x bins",
            base.name, base.n_cells, n
        )));
    }
    // Drop underflow (index 0) and overflow (index n + 1).
    let values = raw[1..=n].to_vec();
    Hist1D::new(base.name, base.x.to_axis()?, values).map_err(table_error)
}

/// Read the TH1 base class, leaving the reader at the end of TH1.
pub(super) fn read_th1_base(r: &mut RBuffer) -> Result<Th1Base> {
    let (_ver, end) = r.read_version()?;
    let end = end.ok_or_else(|| {
        RootError::Deserialization("TH1 streamed without byte count".into())
    })?;

    let (name, _title) = r.read_tnamed()?;
    r.skip_object("TAttLine")?;
    r.skip_object("TAttFill")?;
    r.skip_object("TAttMarker")?;

    let n_cells = r.read_i32()?;
    let n_cells = usize::try_from(n_cells).map_err(|_| {
        RootError::Deserialization(format!("'{}': negative fNcells {}", name, n_cells))
    })?;

    let x = read_taxis(r)?;
    let y = read_taxis(r)?;
    r.skip_object("TAxis")?;

    r.seek(end)?;
    Ok(Th1Base { name, n_cells, x, y })
}

/// Read one TAxis.
fn read_taxis(r: &mut RBuffer) -> Result<AxisInfo> {
    let (_ver, end) = r.read_version()?;
    let (_name, _title) = r.read_tnamed()?;
    r.skip_object("TAttAxis")?;

    let n_bins = r.read_i32()?;
    let n_bins = usize::try_from(n_bins)
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| RootError::Deserialization(format!("axis with {} bins", n_bins)))?;
    let x_min = r.read_f64()?;
    let x_max = r.read_f64()?;
    let edges = r.read_array_f64()?;

    // fFirst, fLast, fBits2, fTimeDisplay, fTimeFormat, fLabels, fModLabs
    if let Some(end) = end {
        r.seek(end)?;
    }
    Ok(AxisInfo { n_bins, x_min, x_max, edges })
}

/// Read the trailing `TArrayD`/`TArrayF` holding `n_cells` bin contents.
pub(super) fn read_contents(
    r: &mut RBuffer,
    precision: Precision,
    n_cells: usize,
) -> Result<Vec<f64>> {
    let raw = match precision {
        Precision::Double => r.read_array_f64()?,
        Precision::Float => r.read_array_f32()?,
    };
    if raw.len() != n_cells {
        return Err(RootError::Deserialization(format!(
            "content array has {} entries, fNcells is {}",
            raw.len(),
            n_cells
        )));
    }
    Ok(raw)
}
