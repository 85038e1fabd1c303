// Decoding a dimensional cube into flat result rows.

use log::warn;

use std::error::Error;
use std::fmt::Display;

use crate::dataset::{Dataset, ResultRow};

/// Dimension names used by the Hagstofa election tables.
pub const DIM_YEAR: &str = "Ár";
pub const DIM_CONSTITUENCY: &str = "Kjördæmi";
pub const DIM_PARTY: &str = "Flokkur";

/// Row-major flat indexing for a cube with the given per-dimension sizes.
///
/// The multiplier of the last dimension is 1 and the multiplier of
/// dimension i is `size[i+1] * mult[i+1]`, so a full index vector maps to
/// a flat offset through a dot product.
#[derive(PartialEq, Debug, Clone)]
pub struct CubeIndex {
    size: Vec<usize>,
    mult: Vec<usize>,
}

impl CubeIndex {
    pub fn new(size: &[usize]) -> CubeIndex {
        let mut mult = vec![1usize; size.len()];
        let mut m = 1usize;
        for k in (0..size.len()).rev() {
            mult[k] = m;
            m *= size[k];
        }
        CubeIndex {
            size: size.to_vec(),
            mult,
        }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.size.iter().product()
    }

    pub fn flat_offset(&self, indices: &[usize]) -> usize {
        indices
            .iter()
            .zip(self.mult.iter())
            .map(|(i, m)| i * m)
            .sum()
    }
}

/// Which result field a decoded cell lands in.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Metric {
    Percent,
    /// Seat counts are whole numbers; decoded values are rounded.
    Seats,
}

/// Parameters for one decode pass.
///
/// Dimensions not named here (`Atriði`, `Eining`, ...) are pinned at
/// category index 0: the stored queries already filtered them down to a
/// single value.
#[derive(PartialEq, Debug, Clone)]
pub struct DecodeOptions {
    /// Enumerate `Kjördæmi` as a free dimension (regional datasets).
    pub with_constituency: bool,
    /// Year applied to every row when the source carries no `Ár` dimension
    /// (per-year queries pin the year before the data is fetched).
    pub year_fallback: Option<i32>,
    pub metric: Metric,
}

impl DecodeOptions {
    pub fn national(metric: Metric) -> DecodeOptions {
        DecodeOptions {
            with_constituency: false,
            year_fallback: None,
            metric,
        }
    }

    pub fn regional(metric: Metric, year_fallback: Option<i32>) -> DecodeOptions {
        DecodeOptions {
            with_constituency: true,
            year_fallback,
            metric,
        }
    }
}

/// Errors that prevent a decode pass from completing.
///
/// Missing cells are not an error, they are expected sparsity.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DecodeError {
    /// A required free dimension is absent. Carries the dimensions that
    /// were actually found, for the error message.
    MissingDimensions { found: Vec<String> },
    /// No `Ár` dimension and no fallback year supplied.
    MissingYear,
    /// `value` length does not match the product of the dimension sizes.
    ValueLengthMismatch { expected: usize, actual: usize },
    /// A year category that does not parse as an integer.
    BadYear { raw: String },
    /// A dimension listed in `id` with no entry in `dimension`.
    UnknownDimension { name: String },
}

impl Error for DecodeError {}

impl Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::MissingDimensions { found } => {
                write!(f, "missing required dimensions, found: {}", found.join(", "))
            }
            DecodeError::MissingYear => {
                write!(f, "no \"{}\" dimension and no fallback year given", DIM_YEAR)
            }
            DecodeError::ValueLengthMismatch { expected, actual } => write!(
                f,
                "value array has {} cells, dimension sizes require {}",
                actual, expected
            ),
            DecodeError::BadYear { raw } => write!(f, "cannot parse year {:?}", raw),
            DecodeError::UnknownDimension { name } => {
                write!(f, "dimension {:?} has no category metadata", name)
            }
        }
    }
}

type DecodeResult<T> = Result<T, DecodeError>;

fn parse_year(raw: &str) -> DecodeResult<i32> {
    raw.trim().parse::<i32>().map_err(|_| DecodeError::BadYear {
        raw: raw.to_string(),
    })
}

fn dimension_keys<'a>(ds: &'a Dataset, name: &str) -> DecodeResult<Vec<&'a str>> {
    let cat = ds
        .category(name)
        .ok_or_else(|| DecodeError::UnknownDimension {
            name: name.to_string(),
        })?;
    Ok(cat.ordered_keys())
}

/// Decodes a dataset into one row per free-dimension combination.
///
/// Free dimensions are enumerated outer-to-inner as year, constituency,
/// party; all other dimensions are pinned at category index 0. Cells that
/// hold a missing sentinel produce no row.
pub fn decode(ds: &Dataset, opts: &DecodeOptions) -> DecodeResult<Vec<ResultRow>> {
    let cube = CubeIndex::new(&ds.size);
    if ds.value.len() != cube.cell_count() {
        return Err(DecodeError::ValueLengthMismatch {
            expected: cube.cell_count(),
            actual: ds.value.len(),
        });
    }

    let i_year = ds.dim_pos(DIM_YEAR);
    let i_const = ds.dim_pos(DIM_CONSTITUENCY);
    let i_party = ds.dim_pos(DIM_PARTY);

    if i_party.is_none() || (opts.with_constituency && i_const.is_none()) {
        return Err(DecodeError::MissingDimensions {
            found: ds.id.clone(),
        });
    }
    if i_year.is_none() && opts.year_fallback.is_none() {
        return Err(DecodeError::MissingYear);
    }

    let i_party = i_party.unwrap();

    // Resolved category enumerations. The year dimension may be absent, in
    // which case a single synthetic iteration carries the fallback year.
    let year_keys: Vec<&str> = match i_year {
        Some(_) => dimension_keys(ds, DIM_YEAR)?,
        None => vec![""],
    };
    let const_keys: Vec<&str> = match (opts.with_constituency, i_const) {
        (true, Some(_)) => dimension_keys(ds, DIM_CONSTITUENCY)?,
        _ => vec![""],
    };
    let party_keys = dimension_keys(ds, DIM_PARTY)?;

    let year_cat = ds.category(DIM_YEAR);
    let const_cat = ds.category(DIM_CONSTITUENCY);
    let party_cat = ds.category(DIM_PARTY).unwrap();

    let mut rows: Vec<ResultRow> = Vec::new();
    for (yi, year_key) in year_keys.iter().enumerate() {
        let year = match (i_year, year_cat) {
            (Some(_), Some(cat)) => parse_year(cat.label_or_key(year_key))?,
            _ => opts.year_fallback.unwrap(),
        };
        for (ci, const_key) in const_keys.iter().enumerate() {
            for (pi, party_key) in party_keys.iter().enumerate() {
                // Pinned dimensions keep index 0.
                let mut indices = vec![0usize; ds.id.len()];
                if let Some(iy) = i_year {
                    indices[iy] = yi;
                }
                if opts.with_constituency {
                    if let Some(ic) = i_const {
                        indices[ic] = ci;
                    }
                }
                indices[i_party] = pi;

                // Category metadata can carry more keys than `size`
                // admits; offsets past the value array are absent data,
                // same as a sentinel cell.
                let cell = match ds.value.get(cube.flat_offset(&indices)) {
                    Some(c) => c,
                    None => continue,
                };
                if cell.is_missing() {
                    continue;
                }
                let n = match cell.as_number() {
                    Some(n) => n,
                    None => {
                        warn!(
                            "skipping non-numeric cell {:?} at year={} party={:?}",
                            cell, year, party_key
                        );
                        continue;
                    }
                };

                let constituency = if opts.with_constituency {
                    Some(const_cat.unwrap().label_or_key(const_key).to_string())
                } else {
                    None
                };
                let (percent, seats) = match opts.metric {
                    Metric::Percent => (Some(n), None),
                    Metric::Seats => (None, Some(n.round() as i64)),
                };
                rows.push(ResultRow {
                    year,
                    constituency,
                    party: party_cat.label_or_key(party_key).to_string(),
                    percent,
                    seats,
                });
            }
        }
    }
    Ok(rows)
}
