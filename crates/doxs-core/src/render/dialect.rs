//! Layout options for the target docstring dialect

use crate::error::{Error, Result};
use crate::types::SectionName;
use serde::{Deserialize, Serialize};

/// Narrowest text column allowed after indentation
const MIN_TEXT_COLUMNS: usize = 8;

/// Layout rules the renderer follows. Defaults produce NumPy-style docstrings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialectConfig {
    /// Character repeated under each section header
    pub underline: char,
    /// Indentation of continuation lines
    pub indent_width: usize,
    /// Wrap prose at this column; `None` disables wrapping
    pub line_width: Option<usize>,
    /// Order in which sections are emitted
    pub section_order: Vec<SectionName>,
}

impl Default for DialectConfig {
    fn default() -> Self {
        Self::numpy()
    }
}

impl DialectConfig {
    /// NumPy docstring conventions
    pub fn numpy() -> Self {
        Self {
            underline: '-',
            indent_width: 4,
            line_width: Some(79),
            section_order: vec![
                SectionName::Title,
                SectionName::Deprecated,
                SectionName::Summary,
                SectionName::Parameters,
                SectionName::Attributes,
                SectionName::Returns,
                SectionName::Yields,
                SectionName::Receives,
                SectionName::Raises,
                SectionName::Warnings,
                SectionName::Notes,
                SectionName::References,
                SectionName::Examples,
                SectionName::SeeAlso,
                SectionName::Methods,
            ],
        }
    }

    pub fn with_underline(mut self, underline: char) -> Self {
        self.underline = underline;
        self
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_line_width(mut self, line_width: Option<usize>) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_section_order(mut self, order: Vec<SectionName>) -> Self {
        self.section_order = order;
        self
    }

    /// Continuation-line prefix
    pub fn indent(&self) -> String {
        " ".repeat(self.indent_width)
    }

    /// Reject options the renderer cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.underline.is_whitespace() || self.underline.is_control() {
            return Err(Error::configuration(format!(
                "underline character {:?} must be visible",
                self.underline
            )));
        }

        if self.indent_width == 0 {
            return Err(Error::configuration("indent width must be at least 1"));
        }

        if let Some(width) = self.line_width {
            if width < self.indent_width + MIN_TEXT_COLUMNS {
                return Err(Error::configuration(format!(
                    "line width {} leaves fewer than {} columns after a {}-space indent",
                    width, MIN_TEXT_COLUMNS, self.indent_width
                )));
            }
        }

        for name in SectionName::ALL {
            match self.section_order.iter().filter(|n| **n == name).count() {
                1 => {}
                0 => {
                    return Err(Error::configuration(format!(
                        "section order is missing '{}'",
                        name
                    )))
                }
                _ => {
                    return Err(Error::configuration(format!(
                        "section order lists '{}' more than once",
                        name
                    )))
                }
            }
        }

        Ok(())
    }
}
