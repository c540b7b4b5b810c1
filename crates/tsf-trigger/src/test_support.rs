//! Table builders shared by unit tests.

use tsf_core::{Axis, Hist1D, Hist2D, TableSet};

use crate::category::{Category, Source, TableNames, WorkingPoint};

pub(crate) fn pt_curve(name: &str, edges: &[f64], values: &[f64]) -> Hist1D {
    Hist1D::new(name, Axis::new(edges.to_vec()).unwrap(), values.to_vec()).unwrap()
}

/// 2x2 map over eta [-2.1, 2.1] x phi [-3.2, 3.2] with a constant value.
pub(crate) fn eta_phi_map(name: &str, value: f64) -> Hist2D {
    Hist2D::filled(
        name,
        Axis::uniform(2, -2.1, 2.1).unwrap(),
        Axis::uniform(2, -3.2, 3.2).unwrap(),
        value,
    )
}

/// All 18 tables for `wp`; `values` gives (flat pT efficiency, correction,
/// average) per (category, source).
pub(crate) fn flat_tables(
    wp: &WorkingPoint,
    values: impl Fn(Category, Source) -> (f64, f64, f64),
) -> TableSet {
    let mut set = TableSet::new();
    for c in Category::ALL {
        for s in Source::ALL {
            let names = TableNames::new(c, s, wp);
            let (eff, corr, avg) = values(c, s);
            set.insert_1d(pt_curve(&names.efficiency, &[20.0, 200.0], &[eff]));
            set.insert_2d(eta_phi_map(&names.correction, corr));
            set.insert_2d(eta_phi_map(&names.average, avg));
        }
    }
    set
}

pub(crate) fn medium() -> WorkingPoint {
    WorkingPoint::new("medium").unwrap()
}
