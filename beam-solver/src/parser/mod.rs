//! Input parsing for beam models
//!
//! Two input flavours are understood: keyword-driven text files and XML
//! files with an `<eulerbernoulli>` block. Both fill the same [`BeamModel`].

mod keyword;
mod xml;

use std::io::BufRead;
use std::path::Path;
use std::str::FromStr;

use crate::analysis::AnalysisOptions;
use crate::error::{FEAError, FEAResult};
use crate::model::BeamModel;

/// Parse a numeric field, naming it in the error
pub(crate) fn field<T: FromStr>(token: Option<&str>, what: &str) -> FEAResult<T> {
    let token = token.ok_or_else(|| FEAError::InvalidInput(format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| FEAError::InvalidInput(format!("invalid {what} '{token}'")))
}

/// Next data line, skipping blank lines and `#` comments
pub(crate) fn read_line<R: BufRead>(reader: &mut R) -> FEAResult<Option<String>> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() && !trimmed.starts_with('#') {
            return Ok(Some(trimmed.to_string()));
        }
    }
}

impl BeamModel {
    /// Parse a whole input file; `.xinp` and `.xml` files are read as XML
    pub fn from_input_file(path: impl AsRef<Path>, options: AnalysisOptions) -> FEAResult<Self> {
        let path = path.as_ref();
        let mut model = Self::with_options(options)?;
        let is_xml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xinp") || e.eq_ignore_ascii_case("xml"));

        if is_xml {
            let text = std::fs::read_to_string(path)?;
            model.parse_xml_str(&text)?;
        } else {
            let file = std::fs::File::open(path)?;
            model.parse_keyword_input(&mut std::io::BufReader::new(file))?;
        }
        Ok(model)
    }
}
