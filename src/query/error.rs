use core::fmt;

/// Error indicating that a query is not supported between two shape types.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Unsupported;

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad("query not supported between these shape types")
    }
}

impl std::error::Error for Unsupported {}
