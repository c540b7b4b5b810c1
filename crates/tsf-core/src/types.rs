//! Binned tables: axes, 1D and 2D histograms with nearest-bin lookup.
//!
//! Lookups never extrapolate and never interpolate. A coordinate outside the
//! axis range maps to the first or last bin; bins are half-open `[lo, hi)`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A binning axis defined by strictly increasing edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct Axis {
    edges: Vec<f64>,
}

impl Axis {
    /// Build an axis from explicit bin edges (length = n_bins + 1).
    pub fn new(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::InvalidTable(format!(
                "axis needs at least 2 edges, got {}",
                edges.len()
            )));
        }
        if let Some(bad) = edges.iter().find(|e| !e.is_finite()) {
            return Err(Error::InvalidTable(format!("non-finite axis edge: {}", bad)));
        }
        if let Some(w) = edges.windows(2).find(|w| w[1] <= w[0]) {
            return Err(Error::InvalidTable(format!(
                "axis edges not strictly increasing: {} then {}",
                w[0], w[1]
            )));
        }
        Ok(Self { edges })
    }

    /// Uniform binning of `n_bins` bins over `[min, max]`.
    pub fn uniform(n_bins: usize, min: f64, max: f64) -> Result<Self> {
        if n_bins == 0 {
            return Err(Error::InvalidTable("axis needs at least one bin".into()));
        }
        let width = (max - min) / n_bins as f64;
        let mut edges: Vec<f64> = (0..n_bins).map(|i| min + i as f64 * width).collect();
        // Pin the last edge so rounding never moves the upper bound.
        edges.push(max);
        Self::new(edges)
    }

    /// Number of bins.
    #[inline]
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Lower edge of the first bin.
    #[inline]
    pub fn min(&self) -> f64 {
        self.edges[0]
    }

    /// Upper edge of the last bin.
    #[inline]
    pub fn max(&self) -> f64 {
        self.edges[self.edges.len() - 1]
    }

    /// Bin edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Index of the bin containing `x`, clamped to the first/last bin.
    ///
    /// NaN maps to bin 0.
    pub fn find_bin(&self, x: f64) -> usize {
        if x.is_nan() || x < self.edges[0] {
            return 0;
        }
        let k = self.edges.partition_point(|e| *e <= x);
        (k - 1).min(self.n_bins() - 1)
    }
}

impl TryFrom<Vec<f64>> for Axis {
    type Error = Error;

    fn try_from(edges: Vec<f64>) -> Result<Self> {
        Self::new(edges)
    }
}

impl From<Axis> for Vec<f64> {
    fn from(axis: Axis) -> Self {
        axis.edges
    }
}

/// A 1D binned table (e.g. efficiency vs pT).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Hist1DRepr", into = "Hist1DRepr")]
pub struct Hist1D {
    name: String,
    axis: Axis,
    values: Vec<f64>,
}

#[derive(Clone, Serialize, Deserialize)]
struct Hist1DRepr {
    #[serde(default)]
    name: String,
    edges: Axis,
    values: Vec<f64>,
}

impl TryFrom<Hist1DRepr> for Hist1D {
    type Error = Error;

    fn try_from(r: Hist1DRepr) -> Result<Self> {
        Hist1D::new(r.name, r.edges, r.values)
    }
}

impl From<Hist1D> for Hist1DRepr {
    fn from(h: Hist1D) -> Self {
        Self { name: h.name, edges: h.axis, values: h.values }
    }
}

impl Hist1D {
    /// Create a 1D table; `values.len()` must equal the number of bins.
    pub fn new(name: impl Into<String>, axis: Axis, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if values.len() != axis.n_bins() {
            return Err(Error::InvalidTable(format!(
                "'{}': {} values for {} bins",
                name,
                values.len(),
                axis.n_bins()
            )));
        }
        Ok(Self { name, axis, values })
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binning.
    pub fn axis(&self) -> &Axis {
        &self.axis
    }

    /// Bin contents.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Lower edge of the domain.
    pub fn domain_min(&self) -> f64 {
        self.axis.min()
    }

    /// Upper edge of the domain.
    pub fn domain_max(&self) -> f64 {
        self.axis.max()
    }

    /// Content of the bin containing `x` (nearest bin outside the domain).
    pub fn value_at(&self, x: f64) -> f64 {
        self.values[self.axis.find_bin(x)]
    }
}

/// A 2D binned table (e.g. an eta-phi map).
///
/// Values are stored x-major: bin `(ix, iy)` lives at `ix * ny + iy`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Hist2DRepr", into = "Hist2DRepr")]
pub struct Hist2D {
    name: String,
    x_axis: Axis,
    y_axis: Axis,
    values: Vec<f64>,
}

#[derive(Clone, Serialize, Deserialize)]
struct Hist2DRepr {
    #[serde(default)]
    name: String,
    x_edges: Axis,
    y_edges: Axis,
    /// One row per x bin, each with one value per y bin.
    values: Vec<Vec<f64>>,
}

impl TryFrom<Hist2DRepr> for Hist2D {
    type Error = Error;

    fn try_from(r: Hist2DRepr) -> Result<Self> {
        let ny = r.y_edges.n_bins();
        if let Some((ix, row)) = r.values.iter().enumerate().find(|(_, row)| row.len() != ny) {
            return Err(Error::InvalidTable(format!(
                "'{}': row {} has {} values for {} y bins",
                r.name,
                ix,
                row.len(),
                ny
            )));
        }
        let flat = r.values.into_iter().flatten().collect();
        Hist2D::new(r.name, r.x_edges, r.y_edges, flat)
    }
}

impl From<Hist2D> for Hist2DRepr {
    fn from(h: Hist2D) -> Self {
        let ny = h.y_axis.n_bins();
        let values = h.values.chunks(ny).map(|c| c.to_vec()).collect();
        Self { name: h.name, x_edges: h.x_axis, y_edges: h.y_axis, values }
    }
}

impl Hist2D {
    /// Create a 2D table from x-major values (`nx * ny` entries).
    pub fn new(
        name: impl Into<String>,
        x_axis: Axis,
        y_axis: Axis,
        values: Vec<f64>,
    ) -> Result<Self> {
        let name = name.into();
        let expected = x_axis.n_bins() * y_axis.n_bins();
        if values.len() != expected {
            return Err(Error::InvalidTable(format!(
                "'{}': {} values for {}x{} bins",
                name,
                values.len(),
                x_axis.n_bins(),
                y_axis.n_bins()
            )));
        }
        Ok(Self { name, x_axis, y_axis, values })
    }

    /// A table with every bin set to `value`.
    pub fn filled(name: impl Into<String>, x_axis: Axis, y_axis: Axis, value: f64) -> Self {
        let n = x_axis.n_bins() * y_axis.n_bins();
        Self { name: name.into(), x_axis, y_axis, values: vec![value; n] }
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// X binning.
    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    /// Y binning.
    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    /// Lower edge of the x domain.
    pub fn domain_min_x(&self) -> f64 {
        self.x_axis.min()
    }

    /// Upper edge of the x domain.
    pub fn domain_max_x(&self) -> f64 {
        self.x_axis.max()
    }

    /// Content of bin `(ix, iy)`, if in range.
    pub fn bin_value(&self, ix: usize, iy: usize) -> Option<f64> {
        let ny = self.y_axis.n_bins();
        if ix >= self.x_axis.n_bins() || iy >= ny {
            return None;
        }
        Some(self.values[ix * ny + iy])
    }

    /// Content of the bin containing `(x, y)`, each axis clamped independently.
    pub fn value_at(&self, x: f64, y: f64) -> f64 {
        let ix = self.x_axis.find_bin(x);
        let iy = self.y_axis.find_bin(y);
        self.values[ix * self.y_axis.n_bins() + iy]
    }
}

/// Any table stored in an artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Table {
    /// 1D table
    #[serde(rename = "1d")]
    OneD(Hist1D),
    /// 2D table
    #[serde(rename = "2d")]
    TwoD(Hist2D),
}

impl Table {
    /// Human-readable kind, used in shape-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Table::OneD(_) => "1D histogram",
            Table::TwoD(_) => "2D histogram",
        }
    }

    /// Table name.
    pub fn name(&self) -> &str {
        match self {
            Table::OneD(h) => h.name(),
            Table::TwoD(h) => h.name(),
        }
    }
}
