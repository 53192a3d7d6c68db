//! XML input: the `<eulerbernoulli>` block
//!
//! ```xml
//! <eulerbernoulli version="1">
//!   <gravity g="9.81"/>
//!   <isotropic set="Beam" E="2.1e11" rho="7850" thickness="0.05"/>
//!   <pointload patch="1" xi="0.5">-1000</pointload>
//!   <pressure code="2" type="stepx">-50 0 0.5</pressure>
//!   <anasol type="expression">
//!     <primary>x*(1-x)</primary>
//!   </anasol>
//! </eulerbernoulli>
//! ```

use std::str::FromStr;
use std::sync::Arc;

use log::{info, warn};
use roxmltree::{Document, Node};

use super::field;
use crate::anasol::AnalyticSolution;
use crate::elements::Material;
use crate::error::FEAResult;
use crate::loads::{parse_pressure_text, PointLoad};
use crate::model::BeamModel;
use crate::problem::DEFAULT_THICKNESS;

/// Typed attribute value, `None` if the attribute is absent
fn attr<T: FromStr>(node: Node, name: &str) -> FEAResult<Option<T>> {
    node.attribute(name)
        .map(|v| field(Some(v.trim()), name))
        .transpose()
}

/// Trimmed, non-empty text content of an element
fn text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|t| !t.is_empty())
}

fn is_named(node: Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name().eq_ignore_ascii_case(name)
}

impl BeamModel {
    /// Parse every `<eulerbernoulli>` element of an XML document.
    ///
    /// Returns the number of such elements found.
    pub fn parse_xml_str(&mut self, xml: &str) -> FEAResult<usize> {
        let doc = Document::parse(xml)?;
        let mut count = 0;
        for node in doc.descendants() {
            if self.parse_xml_element(node)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Parse one element; returns `Ok(false)` unless it is `<eulerbernoulli>`
    pub fn parse_xml_element(&mut self, elem: Node) -> FEAResult<bool> {
        if !is_named(elem, "eulerbernoulli") {
            return Ok(false);
        }

        let version = attr(elem, "version")?;
        self.ensure_problem(version);

        for child in elem.children().filter(Node::is_element) {
            let name = child.tag_name().name().to_ascii_lowercase();
            match name.as_str() {
                "gravity" => {
                    let g = attr(child, "g")?.unwrap_or(0.0);
                    self.set_gravity(g)?;
                }
                "isotropic" => self.parse_isotropic(child)?,
                "pointload" => {
                    if let Some(load) = text(child) {
                        let patch = attr(child, "patch")?.unwrap_or(0);
                        let xi = attr(child, "xi")?.unwrap_or(0.0);
                        let magnitude = field(Some(load), "point load")?;
                        self.add_point_load(PointLoad::new(patch, xi, magnitude));
                    }
                }
                "pressure" => self.parse_pressure(child)?,
                "anasol" => self.parse_anasol(child),
                _ => {}
            }
        }
        Ok(true)
    }

    fn parse_isotropic(&mut self, elem: Node) -> FEAResult<()> {
        let set = elem.attribute("set").unwrap_or_default();
        let mut code = self.properties_mut().unique_property_code(set, 0);
        if code == 0 {
            code = attr(elem, "code")?.unwrap_or(0);
        }

        let e = attr(elem, "E")?.unwrap_or(1000.0);
        let rho = attr(elem, "rho")?.unwrap_or(1.0);
        let thk = attr(elem, "thickness")?.unwrap_or(DEFAULT_THICKNESS);
        self.add_material(code, Material::beam(e, rho), thk)?;
        Ok(())
    }

    fn parse_pressure(&mut self, elem: Node) -> FEAResult<()> {
        let set = elem.attribute("set").unwrap_or_default();
        let mut code = self.properties_mut().unique_property_code(set, 1);
        if code == 0 {
            code = attr(elem, "code")?.unwrap_or(0);
        }

        let Some(body) = text(elem).filter(|_| code > 0) else {
            return Ok(());
        };
        let kind = elem.attribute("type").unwrap_or_default().to_ascii_lowercase();
        match parse_pressure_text(body, &kind)? {
            Some(func) => {
                info!("Pressure code {code} ({kind}): {func:?}");
                self.add_pressure(code, Arc::new(func));
            }
            None => warn!("Pressure code {code}: unsupported function type '{kind}' (ignored)"),
        }
        Ok(())
    }

    fn parse_anasol(&mut self, elem: Node) {
        let kind = elem.attribute("type").unwrap_or_default().to_ascii_lowercase();
        if kind != "expression" {
            warn!("Unknown analytical solution '{kind}' (ignored)");
            return;
        }

        info!("Analytical solution: Expression");
        let child_text = |name: &str| {
            elem.children()
                .find(|c| is_named(*c, name))
                .and_then(text)
                .map(str::to_string)
        };
        let sol = AnalyticSolution {
            primary: child_text("primary"),
            secondary: child_text("secondary"),
        };
        if !self.set_analytic_solution(sol) {
            warn!("Analytical solution already defined (ignored)");
        }
    }
}
