//! NumPy-style docstring renderer

use crate::error::{Error, Result};
use crate::render::dialect::DialectConfig;
use crate::render::wrap::{fill, text_lines, wrap_block};
use crate::schema::Schema;
use crate::types::{DocRecord, Entry, SectionContent, SectionName};
use tracing::trace;

/// Renders validated records into docstring text
#[derive(Debug, Clone)]
pub struct Renderer<'s> {
    schema: &'s Schema,
    dialect: DialectConfig,
}

impl<'s> Renderer<'s> {
    /// Create a renderer, rejecting dialect options it cannot honour
    pub fn new(schema: &'s Schema, dialect: DialectConfig) -> Result<Self> {
        dialect.validate()?;
        Ok(Self { schema, dialect })
    }

    /// Renderer with the default NumPy dialect
    pub fn numpy(schema: &'s Schema) -> Self {
        Self {
            schema,
            dialect: DialectConfig::numpy(),
        }
    }

    pub fn dialect(&self) -> &DialectConfig {
        &self.dialect
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    /// Render a record accepted by a schema compatible with this renderer's
    pub fn render(&self, record: &DocRecord) -> Result<String> {
        let expected = self.schema.version();
        if !expected.is_compatible_with(record.schema_version()) {
            return Err(Error::render_precondition(format!(
                "record was validated against schema {} but the renderer expects {}",
                record.schema_version(),
                expected
            )));
        }

        let mut blocks: Vec<Vec<String>> = Vec::new();
        for name in &self.dialect.section_order {
            let Some(content) = record.section(*name) else {
                continue;
            };
            if content.is_empty() {
                continue;
            }
            blocks.push(self.render_section(*name, content));
        }

        let mut out = blocks
            .iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join("\n\n");
        out.push('\n');

        trace!(sections = blocks.len(), bytes = out.len(), "rendered docstring");
        Ok(out)
    }

    fn render_section(&self, name: SectionName, content: &SectionContent) -> Vec<String> {
        match (name, content) {
            (SectionName::Title, SectionContent::Text(text)) => text_lines(text)
                .into_iter()
                .map(|line| line.trim().to_string())
                .collect(),
            (SectionName::Deprecated, SectionContent::Text(text)) => self.deprecation(text),
            // Extended summary follows the title without a header
            (SectionName::Summary, SectionContent::Text(text)) => {
                wrap_block(text, "", self.dialect.line_width)
            }
            _ => {
                let mut lines = self.header(name);
                lines.extend(self.body(name, content));
                lines
            }
        }
    }

    fn header(&self, name: SectionName) -> Vec<String> {
        let header = name.header();
        let underline = self.dialect.underline.to_string().repeat(header.chars().count());
        vec![header.to_string(), underline]
    }

    fn body(&self, name: SectionName, content: &SectionContent) -> Vec<String> {
        match content {
            SectionContent::Text(text) => match name {
                SectionName::Examples | SectionName::References => {
                    text_lines(text).into_iter().map(str::to_string).collect()
                }
                _ => wrap_block(text, "", self.dialect.line_width),
            },
            SectionContent::Entries(entries) => {
                entries.iter().flat_map(|entry| self.entry(entry)).collect()
            }
            SectionContent::Names(names) => names
                .iter()
                .map(|n| n.trim())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// `name : description`, continuation lines indented under the name
    fn entry(&self, entry: &Entry) -> Vec<String> {
        let indent = self.dialect.indent();
        let width = self.dialect.line_width;
        let lines = text_lines(&entry.description);

        let Some((first, rest)) = lines.split_first() else {
            return vec![entry.name.clone()];
        };

        // Only the description wraps; `name : ` stays on the first line
        let prefix = format!("{} : ", entry.name);
        let mut out = fill(first, &prefix, &indent, width);
        for line in rest {
            if line.is_empty() {
                out.push(String::new());
            } else {
                out.extend(wrap_block(line, &indent, width));
            }
        }
        out
    }

    /// `.. deprecated:: <first line>` with the explanation indented below
    fn deprecation(&self, text: &str) -> Vec<String> {
        let indent = self.dialect.indent();
        let lines = text_lines(text);
        let Some((first, rest)) = lines.split_first() else {
            return Vec::new();
        };

        let mut out = vec![format!(".. deprecated:: {}", first.trim())];
        for line in rest {
            if line.is_empty() {
                out.push(String::new());
            } else {
                out.extend(wrap_block(line, &indent, self.dialect.line_width));
            }
        }
        out
    }
}
