//! Error norm results and their diagnostic report
//!
//! The error estimator delivers its norms as plain vectors whose layout
//! depends on the configuration. Positions (1-based) in the global norm
//! vector `g` of length `n`:
//!
//! | slot | content                                   | present when                  |
//! |------|-------------------------------------------|-------------------------------|
//! | 1    | energy norm of the recovered solution     | always                        |
//! | 2    | estimated error `a(e,e)^0.5, e=u^r-u^h`   | always                        |
//! | 5    | residual error `(r(u^r) + J(u^r))^0.5`    | `n >= 8` (analytic), else `n >= 5` |
//! | 6    | jump term `J(u^r)^0.5`                    | residual present and `n >= 9` |
//! | n-2  | exact error `a(e,e)^0.5, e=u-u^r`         | analytic and residual present |
//! | n-1  | exact error                               | analytic, no residual         |
//!
//! The reference vector `r` holds the analytic solution norm in slot 3 and
//! the reference energy used for effectivity indices in slot 4; it is only
//! read when an analytic solution exists.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};

/// Named view of a global/reference norm vector pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErrorNorms {
    /// Energy norm `|u^r|`
    pub energy: f64,
    /// Estimated error in energy norm
    pub error: f64,
    /// Residual-based error estimate
    pub residual: Option<f64>,
    /// Jump term of the residual estimate
    pub jump: Option<f64>,
    /// Exact error against the analytic solution
    pub exact_error: Option<f64>,
    /// Energy norm of the analytic solution `|u|`
    pub analytic_norm: Option<f64>,
    /// Reference energy for effectivity indices
    pub reference_energy: Option<f64>,
}

impl ErrorNorms {
    /// Map the positional norm vectors onto named fields
    pub fn new(g_norm: &[f64], r_norm: &[f64], have_analytic: bool) -> FEAResult<Self> {
        let n = g_norm.len();
        if n < 2 {
            return Err(FEAError::InvalidNorms(format!(
                "global norm vector needs at least 2 entries, got {n}"
            )));
        }
        // 1-based slot access
        let g = |i: usize| g_norm[i - 1];

        let have_residual = n >= if have_analytic { 8 } else { 5 };
        let residual = have_residual.then(|| g(5));
        let jump = (have_residual && n >= 9).then(|| g(6));

        let (exact_error, analytic_norm, reference_energy) = if have_analytic {
            if r_norm.len() < 4 {
                return Err(FEAError::InvalidNorms(format!(
                    "reference norm vector needs at least 4 entries, got {}",
                    r_norm.len()
                )));
            }
            let exact = g(n - if have_residual { 2 } else { 1 });
            (Some(exact), Some(r_norm[2]), Some(r_norm[3]))
        } else {
            (None, None, None)
        };

        Ok(Self {
            energy: g(1),
            error: g(2),
            residual,
            jump,
            exact_error,
            analytic_norm,
            reference_energy,
        })
    }

    pub fn has_analytic(&self) -> bool {
        self.analytic_norm.is_some()
    }

    /// Value as a percentage of `|u|`, or of `|u^r|` without an analytic solution
    pub fn relative(&self, value: f64) -> f64 {
        value * 100.0 / self.analytic_norm.unwrap_or(self.energy)
    }

    /// Estimated error over reference energy
    pub fn effectivity(&self) -> Option<f64> {
        self.reference_energy.map(|r| self.error / r)
    }

    /// Estimated plus exact error over reference energy
    pub fn effectivity_exact(&self) -> Option<f64> {
        self.residual?;
        Some((self.error + self.exact_error?) / self.reference_energy?)
    }

    /// Estimated plus residual error over reference energy
    pub fn effectivity_residual(&self) -> Option<f64> {
        self.exact_error?;
        Some((self.error + self.residual?) / self.reference_energy?)
    }

    /// Diagnostic report titled by the norm group name
    pub fn report<'a>(&'a self, name: &'a str) -> NormReport<'a> {
        NormReport { name, norms: self }
    }
}

/// Printable error estimate report
pub struct NormReport<'a> {
    name: &'a str,
    norms: &'a ErrorNorms,
}

impl fmt::Display for NormReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.norms;
        let u_ref = if n.has_analytic() { "|u|)   : " } else { "|u^r|) : " };

        write!(f, ">>> Error estimates based on {} <<<", self.name)?;
        write!(f, "\nEnergy norm |u^r| = a(u^r,u^r)^0.5   : {}", g6(n.energy))?;
        write!(f, "\nError norm a(e,e)^0.5, e=u^r-u^h     : {}", g6(n.error))?;
        write!(f, "\n- relative error (% of {u_ref}{}", g6(n.relative(n.error)))?;

        if let Some(res) = n.residual {
            write!(f, "\nResidual error (r(u^r) + J(u^r))^0.5 : {}", g6(res))?;
            write!(f, "\n- relative error (% of {u_ref}{}", g6(n.relative(res)))?;
            if let Some(jump) = n.jump {
                write!(f, "\nJump term J(u^r)^0.5          : {}", g6(jump))?;
                write!(f, "\n- relative error (% of {u_ref}{}", g6(n.relative(jump)))?;
            }
        }

        if let (Some(exact), Some(eff)) = (n.exact_error, n.effectivity()) {
            write!(f, "\nExact error a(e,e)^0.5, e=u-u^r      : {}", g6(exact))?;
            write!(f, "\n- relative error (% of {u_ref}{}", g6(n.relative(exact)))?;
            write!(f, "\nEffectivity index             : {}", g6(eff))?;
            if let (Some(ex), Some(res)) = (n.effectivity_exact(), n.effectivity_residual()) {
                write!(f, "\nEffectivity index, theta^EX          : {}", g6(ex))?;
                write!(f, "\nEffectivity index, theta^RES         : {}", g6(res))?;
            }
        }
        Ok(())
    }
}

/// Format with 6 significant digits, trailing zeros removed (printf `%g`)
pub fn g6(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{v:.5e}");
    let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if !(-4..6).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.abs())
    } else {
        let decimals = (5 - exp) as usize;
        trim_zeros(&format!("{v:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
