//! TH2D/TH2F.
//!
//! ```text
//! TH2D / TH2F
//!   ├─ TH2
//!   │    ├─ TH1 (see th1.rs)
//!   │    └─ fScalefactor, fTsumwy, fTsumwy2, fTsumwxy   (skipped to TH2 end)
//!   └─ TArrayD / TArrayF   ((nx + 2) * (ny + 2) cells, global bin = ix + (nx + 2) * iy)
//! ```

use tsf_core::Hist2D;

use super::th1::{read_contents, read_th1_base};
use super::{Precision, table_error};
use crate::error::{Result, RootError};
use crate::rbuffer::RBuffer;

/// Read a TH2D or TH2F.
pub(super) fn read_th2(payload: &[u8], precision: Precision) -> Result<Hist2D> {
    let mut r = RBuffer::new(payload);
    let (_ver, _end) = r.read_version()?;

    let (_th2_ver, th2_end) = r.read_version()?;
    let th2_end = th2_end
        .ok_or_else(|| RootError::Deserialization("TH2 streamed without byte count".into()))?;
    let base = read_th1_base(&mut r)?;
    r.seek(th2_end)?;

    let raw = read_contents(&mut r, precision, base.n_cells)?;

    let (nx, ny) = (base.x.n_bins, base.y.n_bins);
    if base.n_cells != (nx + 2) * (ny + 2) {
        return Err(RootError::Deserialization(format!(
            "'{}': fNcells {} does not match {}x{} bins",
            base.name, base.n_cells, nx, ny
        )));
    }

    // ROOT is y-major with flow bins; tables are x-major without them.
    let stride = nx + 2;
    let mut values = Vec::with_capacity(nx * ny);
    for ix in 1..=nx {
        for iy in 1..=ny {
            values.push(raw[ix + stride * iy]);
        }
    }

    Hist2D::new(base.name, base.x.to_axis()?, base.y.to_axis()?, values).map_err(table_error)
}
