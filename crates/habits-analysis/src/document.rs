//! The rendered report as a flat list of display blocks.

use serde::Serialize;

use crate::{
    chart::ChartSpec,
    dataset::{Column, ColumnSummary},
    section::SectionId,
};

/// One element of the display surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Title {
        text: String,
    },
    Subheader {
        text: String,
    },
    Header {
        text: String,
    },
    /// Plain text.
    Text {
        text: String,
    },
    /// Text with inline Markdown emphasis.
    Markdown {
        text: String,
    },
    /// Tabular preview of the cleaned data.
    Preview {
        columns: Vec<Column>,
        rows: Vec<Vec<String>>,
        total_rows: usize,
        summaries: Vec<ColumnSummary>,
    },
    /// On/off control of a subsection.
    Toggle {
        section: SectionId,
        label: String,
        enabled: bool,
    },
    Chart {
        spec: ChartSpec,
    },
    /// Result line of a statistical test.
    Statistic {
        test: String,
        line: String,
    },
    /// Failure confined to one subsection.
    Error {
        section: SectionId,
        message: String,
    },
}

/// A rendered report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportDocument {
    pub blocks: Vec<Block>,
}

impl ReportDocument {
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Blocks belonging to a subsection: everything after its toggle up to the
    /// next toggle or header.
    #[must_use]
    pub fn section_blocks(&self, section: SectionId) -> &[Block] {
        let Some(start) = self
            .blocks
            .iter()
            .position(|b| matches!(b, Block::Toggle { section: s, .. } if *s == section))
        else {
            return &[];
        };
        let rest = &self.blocks[start + 1..];
        let end = rest
            .iter()
            .position(|b| matches!(b, Block::Toggle { .. } | Block::Header { .. }))
            .unwrap_or(rest.len());
        &rest[..end]
    }

    /// Error messages of every subsection.
    pub fn errors(&self) -> impl Iterator<Item = (SectionId, &str)> + '_ {
        self.blocks.iter().filter_map(|b| match b {
            Block::Error { section, message } => Some((*section, message.as_str())),
            _ => None,
        })
    }
}

/// Formats a count with comma thousands separators, e.g. `1,000`.
///
/// ```
/// use habits_analysis::document::group_thousands;
///
/// assert_eq!(group_thousands(1000), "1,000");
/// assert_eq!(group_thousands(999), "999");
/// assert_eq!(group_thousands(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
