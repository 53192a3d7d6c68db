//! Analytical reference solutions given as expressions

use serde::{Deserialize, Serialize};

/// Expression strings of an analytical solution.
///
/// Evaluation is left to the expression engine of the host application;
/// the driver only needs to know whether a reference solution exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticSolution {
    /// Primary solution (deflection)
    pub primary: Option<String>,
    /// Secondary solution (moments)
    pub secondary: Option<String>,
}

impl AnalyticSolution {
    /// Build from expression lines: primary first, then secondary
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines = lines.into_iter().map(Into::into);
        Self {
            primary: lines.next(),
            secondary: lines.next(),
        }
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub fn has_secondary(&self) -> bool {
        self.secondary.is_some()
    }
}
