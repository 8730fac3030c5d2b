//! resenha - Review Dataset Loading and Aggregation in Pure Rust
//!
//! Downloads a public tab-separated review archive once, caches the raw
//! bytes locally, and computes aggregate statistics over the typed records —
//! each statistic twice, with a single-pass accumulation strategy and a
//! grouped bulk-aggregation strategy that must agree.
//!
//! # Design Principles
//!
//! 1. **Download once** - Raw bytes are cached on local storage keyed by the
//!    resource's basename; repeated runs never touch the network
//! 2. **Read-only data** - The dataset is loaded once and passed by shared
//!    reference to every computation
//! 3. **Two strategies, one answer** - Every statistic is computed by manual
//!    accumulation and by an explicit group-by primitive, and both must
//!    produce numerically equivalent results
//!
//! # Quick Start
//!
//! ```no_run
//! use resenha::{stats, timing::time, DatasetSource};
//!
//! let source = DatasetSource::new(
//!     "https://s3.amazonaws.com/amazon-reviews-pds/tsv/amazon_reviews_us_Gift_Card_v1_00.tsv.gz",
//!     ".",
//! )
//! .unwrap();
//! let dataset = source.load().unwrap();
//!
//! let mean = time("mean rating (fold)", || stats::mean_rating_fold(&dataset));
//! println!("{mean}");
//! println!("{}", mean.into_value().unwrap());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss
    )
)]
#![allow(clippy::uninlined_format_args)]

pub mod aggregate;
pub mod backend;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod stats;
pub mod timing;

pub use dataset::{Review, ReviewDataset, TsvOptions};
pub use error::{Error, Result};
pub use loader::{load_from_path, DatasetSource};
pub use timing::{time, Timed};
