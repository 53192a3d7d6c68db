//! Keyword-driven text input
//!
//! ```text
//! GRAVITY 9.81
//! ISOTROPIC 1
//! 1 2.1e11 7850 0.05      # code E [rho [thickness]]
//! POINTLOAD 1
//! 1 0.5 -1000             # patch xi load
//! PRESSURE 1
//! 0 -50 StepX 0 0.5       # code p [variation]
//! ANASOL EXPRESSION 2
//! x*(1-x)
//! -2
//! ```

use std::io::BufRead;
use std::sync::Arc;

use log::{info, warn};

use super::{field, read_line};
use crate::anasol::AnalyticSolution;
use crate::elements::Material;
use crate::error::FEAResult;
use crate::loads::{parse_pressure_tokens, PointLoad};
use crate::model::BeamModel;

const KEYWORDS: [&str; 5] = ["GRAVITY", "ISOTROPIC", "POINTLOAD", "PRESSURE", "ANASOL"];

/// Remainder of `line` after a case-insensitive keyword prefix
fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    line.get(..keyword.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(keyword))
        .map(|_| &line[keyword.len()..])
}

/// Entry count following a block keyword; garbage counts as zero
fn block_count(rest: &str, keyword: &str) -> usize {
    match rest.split_whitespace().next().map(str::parse::<usize>) {
        Some(Ok(n)) => n,
        other => {
            warn!("{keyword}: invalid entry count {other:?}, no entries read");
            0
        }
    }
}

/// Read up to `count` data lines of a keyword block
fn read_block<R: BufRead>(reader: &mut R, count: usize, keyword: &str) -> FEAResult<Vec<String>> {
    let mut lines = Vec::with_capacity(count);
    while lines.len() < count {
        match read_line(reader)? {
            Some(line) => lines.push(line),
            None => {
                warn!("{keyword}: expected {count} entries, input ended after {}", lines.len());
                break;
            }
        }
    }
    Ok(lines)
}

impl BeamModel {
    /// Parse keyword input until end of file.
    ///
    /// Returns the number of keywords handled; others are logged and skipped.
    pub fn parse_keyword_input<R: BufRead>(&mut self, reader: &mut R) -> FEAResult<usize> {
        let mut handled = 0;
        while let Some(line) = read_line(reader)? {
            if self.parse_keyword(&line, reader)? {
                handled += 1;
            } else {
                warn!("Unknown keyword line '{line}' (ignored)");
            }
        }
        Ok(handled)
    }

    /// Parse one keyword and the data lines belonging to it.
    ///
    /// Returns `Ok(false)` if the keyword is not a beam keyword.
    pub fn parse_keyword<R: BufRead>(&mut self, keyword: &str, reader: &mut R) -> FEAResult<bool> {
        if !KEYWORDS.iter().any(|k| strip_keyword(keyword, k).is_some()) {
            return Ok(false);
        }
        self.ensure_problem(None);

        if let Some(rest) = strip_keyword(keyword, "GRAVITY") {
            let g = field(rest.split_whitespace().next(), "gravitation constant")?;
            self.set_gravity(g)?;
        } else if let Some(rest) = strip_keyword(keyword, "ISOTROPIC") {
            let count = block_count(rest, "ISOTROPIC");
            info!("Number of isotropic materials: {count}");
            if count == 0 {
                warn!("ISOTROPIC: no materials given");
            }
            for line in read_block(reader, count, "ISOTROPIC")? {
                let mut tokens = line.split_whitespace();
                let code: i32 = field(tokens.next(), "material code")?;
                let e = field(tokens.next(), "elastic modulus")?;
                let rho = tokens.next().map_or(Ok(0.0), |t| field(Some(t), "density"))?;
                let thk = tokens.next().map_or(Ok(0.0), |t| field(Some(t), "thickness"))?;
                self.add_material(code, Material::beam(e, rho), thk)?;
            }
        } else if let Some(rest) = strip_keyword(keyword, "POINTLOAD") {
            let count = block_count(rest, "POINTLOAD");
            info!("Number of point loads: {count}");
            for line in read_block(reader, count, "POINTLOAD")? {
                let mut tokens = line.split_whitespace();
                let patch = field(tokens.next(), "patch number")?;
                let xi = field(tokens.next(), "load point parameter")?;
                let load = field(tokens.next(), "point load")?;
                self.add_point_load(PointLoad::new(patch, xi, load));
            }
        } else if let Some(rest) = strip_keyword(keyword, "PRESSURE") {
            let count = block_count(rest, "PRESSURE");
            info!("Number of pressures: {count}");
            for line in read_block(reader, count, "PRESSURE")? {
                let tokens: Vec<&str> = line.split_whitespace().collect();
                let code: i32 = field(tokens.first().copied(), "pressure code")?;
                let p = field(tokens.get(1).copied(), "pressure")?;
                let func = parse_pressure_tokens(tokens.get(2..).unwrap_or_default(), p)?;
                info!("Pressure code {code}: {func:?}");
                self.add_pressure(code, Arc::new(func));
            }
        } else if let Some(rest) = strip_keyword(keyword, "ANASOL") {
            self.parse_anasol_keyword(rest, reader)?;
        }

        Ok(true)
    }

    fn parse_anasol_keyword<R: BufRead>(&mut self, rest: &str, reader: &mut R) -> FEAResult<()> {
        let mut tokens = rest.split_whitespace();
        let kind = tokens.next().unwrap_or_default();
        if strip_keyword(kind, "EXPRESSION").is_none() {
            warn!("Unknown analytical solution '{kind}' (ignored)");
            return Ok(());
        }

        info!("Analytical solution: Expression");
        let count = tokens.next().and_then(|t| t.parse().ok()).unwrap_or(0);
        let lines = read_block(reader, count, "ANASOL")?;
        if !self.set_analytic_solution(AnalyticSolution::from_lines(lines)) {
            warn!("Analytical solution already defined (ignored)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use std::io::Cursor;

    fn parse(input: &str) -> BeamModel {
        let mut model = BeamModel::new();
        model.parse_keyword_input(&mut Cursor::new(input)).unwrap();
        model
    }

    #[test]
    fn test_strip_keyword() {
        assert_eq!(strip_keyword("isotropic 2", "ISOTROPIC"), Some(" 2"));
        assert_eq!(strip_keyword("ISO", "ISOTROPIC"), None);
        assert_eq!(strip_keyword("PRESSURE", "PRESSURE"), Some(""));
    }

    #[test]
    fn test_isotropic_block() {
        let model = parse("ISOTROPIC 3\n1 100.0 2.0 0.5\n# comment\n2 200.0 3.0\n0 300.0\n");
        assert_eq!(model.materials().len(), 3);
        assert_eq!(model.materials().thicknesses(), &[0.5, 0.0, 0.0]);
        assert_eq!(model.materials().materials()[1].rho, 3.0);
        assert_eq!(model.materials().materials()[2].rho, 0.0);

        let klp = model.problem().unwrap();
        assert_eq!(klp.material().unwrap().e, 100.0);
        assert_eq!(klp.thickness(), 0.5);
    }

    #[test]
    fn test_short_block_reads_what_is_there() {
        let model = parse("POINTLOAD 3\n1 0.5 10\n");
        assert_eq!(model.point_loads().len(), 1);
        assert_eq!(model.point_loads()[0], PointLoad::new(1, 0.5, 10.0));
    }

    #[test]
    fn test_gravity_and_pressure() {
        let model = parse("gravity 9.81\nPRESSURE 2\n0 -5\n3 2 X 1 0\n");
        let klp = model.problem().unwrap();
        assert_eq!(klp.gravity(), 9.81);
        assert_eq!(model.pressures().len(), 2);
        let f = model.pressures().get(3).unwrap();
        assert_eq!(f.value(&Vec3::new(2.0, 0.0, 0.0)), 4.0);
    }

    #[test]
    fn test_anasol() {
        let model = parse("ANASOL EXPRESSION 2\nx*(1-x)\n-2\nANASOL EXPRESSION 1\nx\n");
        let sol = model.analytic_solution().unwrap();
        assert_eq!(sol.primary.as_deref(), Some("x*(1-x)"));
        assert_eq!(sol.secondary.as_deref(), Some("-2"));
    }

    #[test]
    fn test_unknown_anasol_is_ignored() {
        let model = parse("ANASOL TABLE\n");
        assert!(!model.has_analytic_solution());
        assert!(model.problem().is_some());
    }

    #[test]
    fn test_unknown_keyword_not_handled() {
        let mut model = BeamModel::new();
        let handled = model
            .parse_keyword("DIRICHLET 1", &mut Cursor::new(""))
            .unwrap();
        assert!(!handled);
        assert!(model.problem().is_none());
    }

    #[test]
    fn test_bad_number_is_error() {
        let mut model = BeamModel::new();
        let result = model.parse_keyword_input(&mut Cursor::new("ISOTROPIC 1\n1 abc\n"));
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_count_reads_nothing() {
        let model = parse("ISOTROPIC many\n");
        assert!(model.materials().is_empty());
    }

    #[test]
    fn test_zero_material_count_warns() {
        let logs = crate::testing::capture_logs();
        let model = parse("ISOTROPIC 0\nGRAVITY 1\n");
        assert!(model.materials().is_empty());
        assert!(logs
            .warnings()
            .iter()
            .any(|msg| msg == "ISOTROPIC: no materials given"));
    }
}
