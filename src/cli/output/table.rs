//! Table output formatting for CLI commands
//!
//! Renders packages, collections, domains, problems and validation reports
//! with comfy-table.

use crate::domain::models::{
    Collection, DomainEntry, PackageManifest, ParameterSpec, ProblemEntry, ValidationReport,
};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
    max_width: Option<u16>,
}

impl TableFormatter {
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    pub fn format_packages(&self, packages: &[PackageManifest]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Package", "Description", "Parameters"]));

        for package in packages {
            let parameters = package
                .solve_service()
                .map_or(0, |service| service.args.len());
            table.add_row(vec![
                self.accent(Cell::new(&package.name), Color::Cyan),
                Cell::new(truncate_text(
                    package.description.as_deref().unwrap_or("-"),
                    60,
                )),
                Cell::new(parameters),
            ]);
        }

        table.to_string()
    }

    pub fn format_parameters(&self, parameters: &[ParameterSpec]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Parameter", "Type", "Default", "Choices", "Description"]));

        for spec in parameters {
            table.add_row(vec![
                self.accent(Cell::new(&spec.name), Color::Cyan),
                Cell::new(&spec.param_type),
                Cell::new(spec.default_string().unwrap_or_else(|| "-".to_string())),
                Cell::new(if spec.choices.is_empty() {
                    "-".to_string()
                } else {
                    spec.choice_values().join(", ")
                }),
                Cell::new(spec.description.as_deref().unwrap_or("")),
            ]);
        }

        table.to_string()
    }

    pub fn format_collections(&self, collections: &[Collection]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["ID", "Collection", "Domains", "Description"]));

        for collection in collections {
            table.add_row(vec![
                Cell::new(
                    collection
                        .collection_id
                        .map_or_else(|| "-".to_string(), |id| id.to_string()),
                ),
                self.accent(Cell::new(&collection.collection_name), Color::Cyan),
                Cell::new(collection.domain_ids().len()),
                Cell::new(truncate_text(&collection.description, 60)),
            ]);
        }

        table.to_string()
    }

    pub fn format_domains(&self, domains: &[DomainEntry]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["ID", "Domain", "Description"]));

        for domain in domains {
            table.add_row(vec![
                Cell::new(domain.domain_id),
                self.accent(Cell::new(&domain.domain_name), Color::Cyan),
                Cell::new(truncate_text(&domain.description, 60)),
            ]);
        }

        table.to_string()
    }

    pub fn format_problems(&self, problems: &[ProblemEntry]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["ID", "Problem", "Lower bound", "Upper bound"]));

        for problem in problems {
            table.add_row(vec![
                Cell::new(
                    problem
                        .problem_id
                        .map_or_else(|| "-".to_string(), |id| id.to_string()),
                ),
                self.accent(Cell::new(&problem.problem), Color::Cyan),
                Cell::new(problem.lower_bound_label()),
                Cell::new(problem.upper_bound_label()),
            ]);
        }

        table.to_string()
    }

    pub fn format_validation(&self, reports: &[ValidationReport]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Problem", "Result"]));

        for report in reports {
            let color = if report.is_valid() { Color::Green } else { Color::Red };
            table.add_row(vec![
                Cell::new(report.problem_id),
                self.accent(Cell::new(report.summary()), color),
            ]);
        }

        table.to_string()
    }

    fn accent(&self, cell: Cell, color: Color) -> Cell {
        if self.use_colors {
            cell.fg(color)
        } else {
            cell
        }
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| Cell::new(title).add_attribute(Attribute::Bold))
        .collect()
}

/// Check if terminal supports colors
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }
    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
