//! Distributed (pressure) loads as scalar functions of the physical point

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{FEAError, FEAResult};
use crate::math::Vec3;
use crate::property::{PropertyKind, PropertyTable};

/// A scalar field evaluated at physical points
pub trait ScalarFunc: std::fmt::Debug + Send + Sync {
    fn value(&self, x: &Vec3) -> f64;

    /// True if the function has the same value everywhere
    fn is_constant(&self) -> bool {
        false
    }
}

/// Shared handle to a scalar function
pub type ScalarFuncHandle = Arc<dyn ScalarFunc>;

/// Built-in pressure variations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PressureFunction {
    /// Uniform pressure
    Constant(f64),
    /// `a * x[axis] + b`
    Linear { axis: usize, a: f64, b: f64 },
    /// `value` for `x0 <= x <= x1`, zero elsewhere
    StepX { value: f64, x0: f64, x1: f64 },
    /// Parabola in X with roots `x1`, `x2` and peak `value` midway
    QuadX { value: f64, x1: f64, x2: f64 },
}

impl ScalarFunc for PressureFunction {
    fn value(&self, x: &Vec3) -> f64 {
        match *self {
            Self::Constant(p) => p,
            Self::Linear { axis, a, b } => a * x[axis] + b,
            Self::StepX { value, x0, x1 } => {
                if x.x >= x0 && x.x <= x1 {
                    value
                } else {
                    0.0
                }
            }
            Self::QuadX { value, x1, x2 } => {
                let half = 0.5 * (x2 - x1);
                if half == 0.0 {
                    return 0.0;
                }
                let t = (x.x - 0.5 * (x1 + x2)) / half;
                value * (1.0 - t * t)
            }
        }
    }

    fn is_constant(&self) -> bool {
        matches!(self, Self::Constant(_))
    }
}

fn number(token: Option<&str>, what: &str) -> FEAResult<f64> {
    let token = token.ok_or_else(|| FEAError::InvalidInput(format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| FEAError::InvalidInput(format!("invalid {what} '{token}'")))
}

fn axis_of(name: &str) -> Option<usize> {
    match name.to_ascii_lowercase().as_str() {
        "x" => Some(0),
        "y" => Some(1),
        "z" => Some(2),
        _ => None,
    }
}

/// Build a pressure function from the trailing tokens of a keyword line.
///
/// `amplitude` scales the variation. With no tokens, or an unrecognised
/// variation name, the pressure is the constant `amplitude`.
pub fn parse_pressure_tokens(tokens: &[&str], amplitude: f64) -> FEAResult<PressureFunction> {
    let Some((&kind, rest)) = tokens.split_first() else {
        return Ok(PressureFunction::Constant(amplitude));
    };
    let mut args = rest.iter().copied();

    if let Some(axis) = axis_of(kind) {
        let a = number(args.next(), "slope")?;
        let b = args.next().map(|t| number(Some(t), "offset")).transpose()?.unwrap_or(0.0);
        return Ok(PressureFunction::Linear {
            axis,
            a: amplitude * a,
            b: amplitude * b,
        });
    }

    match kind.to_ascii_lowercase().as_str() {
        "stepx" => Ok(PressureFunction::StepX {
            value: amplitude,
            x0: number(args.next(), "step start")?,
            x1: number(args.next(), "step end")?,
        }),
        "quadx" => Ok(PressureFunction::QuadX {
            value: amplitude,
            x1: number(args.next(), "first root")?,
            x2: number(args.next(), "second root")?,
        }),
        _ => Ok(PressureFunction::Constant(amplitude)),
    }
}

/// Build a pressure function from element text and a (lower-case) type name.
///
/// Returns `Ok(None)` for function types that are evaluated elsewhere, such
/// as `expression`.
pub fn parse_pressure_text(text: &str, kind: &str) -> FEAResult<Option<PressureFunction>> {
    let mut args = text.split_whitespace();
    let func = match kind {
        "" | "constant" => PressureFunction::Constant(number(args.next(), "pressure")?),
        "linearx" | "lineary" | "linearz" => PressureFunction::Linear {
            axis: axis_of(&kind[6..]).unwrap_or(0),
            a: number(args.next(), "slope")?,
            b: args.next().map(|t| number(Some(t), "offset")).transpose()?.unwrap_or(0.0),
        },
        "stepx" => PressureFunction::StepX {
            value: number(args.next(), "pressure")?,
            x0: number(args.next(), "step start")?,
            x1: number(args.next(), "step end")?,
        },
        "quadx" => PressureFunction::QuadX {
            value: number(args.next(), "pressure")?,
            x1: number(args.next(), "first root")?,
            x2: number(args.next(), "second root")?,
        },
        _ => return Ok(None),
    };
    Ok(Some(func))
}

/// Pressure functions keyed by property code.
///
/// Code 0 is the fallback used for patches without a body load property.
#[derive(Debug, Clone, Default)]
pub struct PressureRegistry {
    functions: BTreeMap<i32, ScalarFuncHandle>,
}

impl PressureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `func` under `code`, replacing any previous function
    pub fn insert(&mut self, code: i32, func: ScalarFuncHandle) {
        self.functions.insert(code, func);
    }

    pub fn get(&self, code: i32) -> Option<&ScalarFuncHandle> {
        self.functions.get(&code)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Pressure acting on a 1-based patch.
    ///
    /// The first body load property on the patch with a registered function
    /// wins; otherwise the code-0 function applies, if any.
    pub fn for_patch(&self, props: &PropertyTable, patch: usize) -> Option<ScalarFuncHandle> {
        props
            .on_patch(PropertyKind::BodyLoad, patch)
            .find_map(|p| self.functions.get(&p.index))
            .or_else(|| self.functions.get(&0))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_without_variation() {
        let f = parse_pressure_tokens(&[], -3.0).unwrap();
        assert_eq!(f, PressureFunction::Constant(-3.0));
        assert!(f.is_constant());
        assert_eq!(f.value(&Vec3::new(9.0, 0.0, 0.0)), -3.0);
    }

    #[test]
    fn test_linear_variation_scaled_by_amplitude() {
        let f = parse_pressure_tokens(&["X", "2.0", "1.0"], 10.0).unwrap();
        assert_eq!(f, PressureFunction::Linear { axis: 0, a: 20.0, b: 10.0 });
        assert_relative_eq!(f.value(&Vec3::new(0.5, 0.0, 0.0)), 20.0);
    }

    #[test]
    fn test_step_and_quadratic() {
        let step = parse_pressure_tokens(&["StepX", "1", "2"], 4.0).unwrap();
        assert_eq!(step.value(&Vec3::new(1.5, 0.0, 0.0)), 4.0);
        assert_eq!(step.value(&Vec3::new(2.5, 0.0, 0.0)), 0.0);

        let quad = parse_pressure_tokens(&["quadx", "0", "2"], 4.0).unwrap();
        assert_relative_eq!(quad.value(&Vec3::new(1.0, 0.0, 0.0)), 4.0);
        assert_relative_eq!(quad.value(&Vec3::new(2.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_bad_numbers_are_errors() {
        assert!(parse_pressure_tokens(&["StepX", "a", "2"], 1.0).is_err());
        assert!(parse_pressure_text("", "constant").is_err());
    }

    #[test]
    fn test_text_functions() {
        assert_eq!(
            parse_pressure_text(" 2.5 ", "").unwrap(),
            Some(PressureFunction::Constant(2.5))
        );
        assert_eq!(
            parse_pressure_text("1 0", "lineary").unwrap(),
            Some(PressureFunction::Linear { axis: 1, a: 1.0, b: 0.0 })
        );
        assert_eq!(parse_pressure_text("x*x", "expression").unwrap(), None);
    }

    #[test]
    fn test_for_patch_lookup_and_fallback() {
        let mut props = PropertyTable::new();
        props.add_property(2, 1);
        props.set_property_type(2, PropertyKind::BodyLoad, None);

        let mut reg = PressureRegistry::new();
        assert!(reg.for_patch(&props, 1).is_none());

        reg.insert(0, Arc::new(PressureFunction::Constant(1.0)));
        reg.insert(2, Arc::new(PressureFunction::Constant(7.0)));

        let origin = Vec3::zeros();
        assert_eq!(reg.for_patch(&props, 1).unwrap().value(&origin), 7.0);
        assert_eq!(reg.for_patch(&props, 2).unwrap().value(&origin), 1.0);
    }
}
