//! Error types for the Junction core library.
//!
//! Defines the error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::fmt;

use thiserror::Error;

use crate::edges::EdgeStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while reading or validating point coordinates.
///
/// `entry` is the 1-based line number for text input and the 1-based row
/// position for programmatic input.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PointError {
    /// An entry did not contain exactly three coordinates.
    #[error("entry {entry} has {found} coordinates; expected 3")]
    WrongArity {
        /// Position of the offending entry.
        entry: usize,
        /// Number of coordinates actually present.
        found: usize,
    },
    /// A coordinate could not be parsed as a number.
    #[error("entry {entry}, field {field}: `{value}` is not a number")]
    NotANumber {
        /// Position of the offending entry.
        entry: usize,
        /// 1-based field index within the entry.
        field: usize,
        /// The raw text that failed to parse.
        value: String,
    },
    /// A coordinate was NaN or infinite.
    #[error("entry {entry}, field {field}: coordinate {value} is not finite")]
    NonFinite {
        /// Position of the offending entry.
        entry: usize,
        /// 1-based field index within the entry.
        field: usize,
        /// The rejected value.
        value: f64,
    },
    /// Reading the underlying input failed.
    #[error("failed to read entry {entry}: {message}")]
    Read {
        /// Position of the entry being read when the failure occurred.
        entry: usize,
        /// Rendered I/O error.
        message: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`PointError`] variants.
    enum PointErrorCode for PointError {
        /// An entry did not contain exactly three coordinates.
        WrongArity => WrongArity { .. } => "POINT_WRONG_ARITY",
        /// A coordinate could not be parsed as a number.
        NotANumber => NotANumber { .. } => "POINT_NOT_A_NUMBER",
        /// A coordinate was NaN or infinite.
        NonFinite => NonFinite { .. } => "POINT_NON_FINITE",
        /// Reading the underlying input failed.
        Read => Read { .. } => "POINT_READ_FAILED",
    }
}

/// Describes which configuration value was rejected.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ConfigurationIssue {
    /// Bounded mode requires at least one merge.
    #[error("merge target must be at least 1")]
    ZeroMergeTarget,
    /// Bounded mode cannot merge more than `points - 1` times.
    #[error("merge target {requested} exceeds {points} points (at most {max} merges)", max = .points.saturating_sub(1))]
    MergeTargetTooLarge {
        /// Number of merges requested.
        requested: usize,
        /// Number of points available.
        points: usize,
    },
    /// At least one cluster size must contribute to the reported product.
    #[error("top_m must be at least 1")]
    ZeroTopM,
}

/// Error type produced when configuring or running [`crate::Junction`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum JunctionError {
    /// Coordinate input was malformed.
    #[error("malformed point input: {error}")]
    Parse {
        /// Underlying validation failure.
        #[from]
        error: PointError,
    },
    /// Clustering is undefined for fewer than two points.
    #[error("clustering requires at least 2 points (got {points})")]
    InvalidInput {
        /// Number of points supplied.
        points: usize,
    },
    /// The requested configuration cannot be satisfied.
    #[error("invalid configuration: {issue}")]
    InvalidConfiguration {
        /// The rejected value and its context.
        issue: ConfigurationIssue,
    },
    /// The requested edge strategy is unavailable in the current build.
    #[error("the requested edge strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: EdgeStrategy,
    },
    /// The product of the largest cluster sizes does not fit in a `u64`.
    #[error("product of the {top_m} largest cluster sizes overflows u64")]
    ProductOverflow {
        /// Number of sizes that were being multiplied.
        top_m: usize,
    },
    /// Two points are so far apart that their distance exceeds `f64::MAX`.
    #[error("distance between points {a} and {b} is not representable as a finite f64")]
    DistanceOverflow {
        /// Lower endpoint id.
        a: usize,
        /// Higher endpoint id.
        b: usize,
    },
    /// An edge sequence was paired with a point store it was not built from.
    #[error("edge sequence covers {edge_points} points but the store holds {points}")]
    EdgeSetMismatch {
        /// Number of points in the store.
        points: usize,
        /// Number of points the edge sequence was built over.
        edge_points: usize,
    },
    /// An internal invariant was violated, indicating a logic error.
    #[error("invariant violated: {invariant} (points {points}, clusters {clusters})")]
    InvariantViolation {
        /// Name of the violated invariant to assist debugging.
        invariant: &'static str,
        /// Number of points in the run.
        points: usize,
        /// Number of clusters at the time of the violation.
        clusters: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`JunctionError`] variants.
    enum JunctionErrorCode for JunctionError {
        /// Coordinate input was malformed.
        Parse => Parse { .. } => "JUNCTION_PARSE",
        /// Clustering is undefined for fewer than two points.
        InvalidInput => InvalidInput { .. } => "JUNCTION_INVALID_INPUT",
        /// The requested configuration cannot be satisfied.
        InvalidConfiguration => InvalidConfiguration { .. } => "JUNCTION_INVALID_CONFIGURATION",
        /// The requested edge strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "JUNCTION_BACKEND_UNAVAILABLE",
        /// The product of the largest cluster sizes does not fit in a `u64`.
        ProductOverflow => ProductOverflow { .. } => "JUNCTION_PRODUCT_OVERFLOW",
        /// Two points are too far apart for a finite distance.
        DistanceOverflow => DistanceOverflow { .. } => "JUNCTION_DISTANCE_OVERFLOW",
        /// An edge sequence was paired with a point store it was not built from.
        EdgeSetMismatch => EdgeSetMismatch { .. } => "JUNCTION_EDGE_SET_MISMATCH",
        /// An internal invariant was violated.
        InvariantViolation => InvariantViolation { .. } => "JUNCTION_INVARIANT_VIOLATION",
    }
}

impl JunctionError {
    /// Retrieve the inner [`PointErrorCode`] when the error originated while
    /// reading points.
    #[must_use]
    pub const fn point_code(&self) -> Option<PointErrorCode> {
        match self {
            Self::Parse { error } => Some(error.code()),
            _ => None,
        }
    }
}

impl From<ConfigurationIssue> for JunctionError {
    fn from(issue: ConfigurationIssue) -> Self {
        Self::InvalidConfiguration { issue }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, JunctionError>;
