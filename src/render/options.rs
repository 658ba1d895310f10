//! Report rendering options.

/// Options for rendering a Markdown report.
#[derive(Debug, Clone, Default)]
pub struct ReportOptions {
    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Append the labeled segment listing
    pub include_segments: bool,

    /// List INFO segments too (only with `include_segments`)
    pub include_info_segments: bool,
}

impl ReportOptions {
    /// Create new report options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable the segment listing.
    pub fn with_segments(mut self, include: bool) -> Self {
        self.include_segments = include;
        self
    }

    /// Also list INFO segments in the segment listing.
    pub fn with_info_segments(mut self, include: bool) -> Self {
        self.include_info_segments = include;
        self
    }
}
