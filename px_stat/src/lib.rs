//! Transforms PX-Web (JSON-stat2) election datasets into the flat,
//! display-ready records the results charts consume.
//!
//! The pipeline has three pure stages:
//!
//! - [`decode`]: enumerate the free dimensions of a cube (year,
//!   constituency, party) and emit one [`ResultRow`] per real cell,
//! - [`merge_rows`]: de-duplicate rows and left-join seat counts,
//! - [`reduce_top_n`]: keep the top parties per group and assemble the
//!   [`Published`] dataset.
//!
//! Nothing here touches the network or the filesystem; the `pxresults`
//! binary owns those boundaries.
//!
//! The party metadata helpers ([`party_color`], [`party_logo`], [`slug`])
//! exist for the presentation layer rendering the published files, not
//! for the pipeline itself.

mod cube;
mod dataset;
mod merge;
mod party;
mod reduce;

pub use crate::cube::{
    decode, CubeIndex, DecodeError, DecodeOptions, Metric, DIM_CONSTITUENCY, DIM_PARTY, DIM_YEAR,
};
pub use crate::dataset::{CellValue, Category, Dataset, Dimension, Normalized, ResultRow};
pub use crate::merge::merge_rows;
pub use crate::party::{party_color, party_logo, slug, DEFAULT_COLOR};
pub use crate::reduce::{reduce_top_n, GroupBy, Published, TOP_N};
