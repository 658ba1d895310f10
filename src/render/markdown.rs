//! Markdown report rendering for domain models.

use crate::error::Result;
use crate::model::{DomainClass, DomainModel, Relation, Segment, SegmentId};
use std::fmt::Write;

use super::ReportOptions;

/// Convert a domain model to a Markdown report.
pub fn to_markdown(model: &DomainModel, options: &ReportOptions) -> Result<String> {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(model)
}

/// Markdown report renderer.
pub struct MarkdownRenderer {
    options: ReportOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Render a domain model to Markdown.
    pub fn render(&self, model: &DomainModel) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&model.metadata.to_yaml_frontmatter());
        }

        writeln!(output, "# Domain Model: {}\n", escape_inline(&model.metadata.doc_id))
            .map_err(render_error)?;

        self.render_quality(&mut output, model).map_err(render_error)?;
        self.render_classes(&mut output, model).map_err(render_error)?;
        self.render_relations(&mut output, model).map_err(render_error)?;

        if self.options.include_segments {
            self.render_segments(&mut output, &model.segments)
                .map_err(render_error)?;
        }

        Ok(output.trim_end().to_string())
    }

    fn render_quality(&self, output: &mut String, model: &DomainModel) -> std::fmt::Result {
        let q = &model.quality;
        writeln!(output, "## Quality\n")?;
        writeln!(output, "| Metric | Value |")?;
        writeln!(output, "| --- | --- |")?;
        writeln!(output, "| Segments | {} |", q.num_segments)?;
        writeln!(output, "| Kept segments | {} |", q.kept_segments)?;
        writeln!(output, "| Filter ratio | {:.4} |", q.filter_ratio)?;
        writeln!(output, "| Classes | {} |", q.num_classes)?;
        writeln!(output, "| Relations | {} |", q.num_relations)?;
        writeln!(output)
    }

    fn render_classes(&self, output: &mut String, model: &DomainModel) -> std::fmt::Result {
        writeln!(output, "## Classes\n")?;
        if model.classes.is_empty() {
            return writeln!(output, "_No classes found._\n");
        }

        for class in &model.classes {
            self.render_class(output, class)?;
        }
        Ok(())
    }

    fn render_class(&self, output: &mut String, class: &DomainClass) -> std::fmt::Result {
        writeln!(output, "### {}\n", escape_inline(&class.name))?;
        writeln!(output, "Sources: {}\n", join_ids(&class.source_segments))?;

        if class.attributes.is_empty() {
            return writeln!(output, "_No attributes._\n");
        }

        writeln!(output, "| Attribute | Type |")?;
        writeln!(output, "| --- | --- |")?;
        for attr in &class.attributes {
            writeln!(output, "| {} | {} |", escape_cell(&attr.name), attr.attr_type)?;
        }
        writeln!(output)
    }

    fn render_relations(&self, output: &mut String, model: &DomainModel) -> std::fmt::Result {
        writeln!(output, "## Relations\n")?;
        if model.relations.is_empty() {
            return writeln!(output, "_No relations found._\n");
        }

        for rel in &model.relations {
            writeln!(output, "- {}", relation_line(rel))?;
        }
        writeln!(output)
    }

    fn render_segments(&self, output: &mut String, segments: &[Segment]) -> std::fmt::Result {
        writeln!(output, "## Segments\n")?;
        writeln!(output, "| Id | Label | Text |")?;
        writeln!(output, "| --- | --- | --- |")?;
        for seg in segments {
            if !seg.is_relevant() && !self.options.include_info_segments {
                continue;
            }
            writeln!(output, "| {} | {} | {} |", seg.id, seg.label, escape_cell(&seg.text))?;
        }
        writeln!(output)
    }
}

fn relation_line(rel: &Relation) -> String {
    format!(
        "{} --{}--> {} ({}) [{}]",
        escape_inline(&rel.source),
        escape_inline(&rel.label),
        escape_inline(&rel.target),
        rel.cardinality,
        join_ids(&rel.source_segments)
    )
}

fn join_ids(ids: &[SegmentId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn escape_inline(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '*' | '_' | '`' | '[' | ']' | '#') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn escape_cell(text: &str) -> String {
    escape_inline(text).replace('|', "\\|")
}

fn render_error(e: std::fmt::Error) -> crate::error::Error {
    crate::error::Error::Render(format!("Markdown formatting error: {}", e))
}
