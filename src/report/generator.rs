//! Report generation.
//!
//! This module renders a [`CensusReport`] as console text, Markdown
//! tables or JSON.

use anyhow::Result;

use crate::cli::OutputFormat;
use crate::models::{
    CensusReport, CensusSummary, DistributionResult, PopulationResult, ReportMetadata,
};

/// Render the report in the requested format.
pub fn render_report(report: &CensusReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(generate_text_report(report)),
        OutputFormat::Markdown => Ok(generate_markdown_report(report)),
        OutputFormat::Json => generate_json_report(report),
    }
}

/// Generate a plain-text report for the console.
pub fn generate_text_report(report: &CensusReport) -> String {
    let mut output = String::new();

    if let Some(ref population) = report.population {
        output.push_str(&format!(
            "Overall island with the most penguins: {}\n",
            population.overall
        ));
        output.push_str("\nIsland with the most penguins per year:\n");
        for (year, island) in &population.per_year {
            output.push_str(&format!("  {}: {}\n", year, island));
        }
    }

    if let Some(ref distribution) = report.distribution {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str("--- Species Distribution by Island and Year ---\n");

        if distribution.is_empty() {
            output.push_str("\nNo records with species, island and year.\n");
        }

        for (year, by_species) in distribution {
            output.push_str(&format!("\nYear {}:\n", year));
            for (species, islands) in by_species {
                output.push_str(&format!("  {}:\n", species));
                for (island, pct) in islands {
                    output.push_str(&format!("    {}: {:?}%\n", island, pct));
                }
            }
        }
    }

    if let Some(ref summary) = report.summary {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!(
            "Records: {} loaded, {} skipped for population, {} skipped for distribution\n",
            summary.total_records, summary.population_skipped, summary.distribution_skipped
        ));
    }

    output
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &CensusReport) -> String {
    let mut output = String::new();

    output.push_str("# Penguin Census Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));

    if let Some(ref summary) = report.summary {
        output.push_str(&generate_summary_section(summary));
    }

    if let Some(ref population) = report.population {
        output.push_str(&generate_population_section(population));
    }

    if let Some(ref distribution) = report.distribution {
        output.push_str(&generate_distribution_section(distribution));
    }

    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Records:** {}\n", metadata.total_records));
    section.push_str(&format!(
        "- **Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the dataset summary section.
fn generate_summary_section(summary: &CensusSummary) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| Records | Used for population | Used for distribution | Species | Years |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | {} |\n\n",
        summary.total_records,
        summary.population_records,
        summary.distribution_records,
        summary.species.len(),
        summary.years.len()
    ));

    if !summary.island_counts.is_empty() {
        section.push_str("### Records by Island\n\n");
        section.push_str("| Island | Records |\n");
        section.push_str("|:---|:---:|\n");

        let mut islands: Vec<_> = summary.island_counts.iter().collect();
        islands.sort_by_key(|(_, count)| std::cmp::Reverse(**count));

        for (island, count) in islands {
            section.push_str(&format!("| {} | {} |\n", island, count));
        }
        section.push('\n');
    }

    section
}

/// Generate the most populous island section.
fn generate_population_section(population: &PopulationResult) -> String {
    let mut section = String::new();

    section.push_str("## Most Populous Island\n\n");
    section.push_str(&format!("**Overall:** {}\n\n", population.overall));

    section.push_str("| Year | Island |\n");
    section.push_str("|:---|:---|\n");
    for (year, island) in &population.per_year {
        section.push_str(&format!("| {} | {} |\n", year, island));
    }
    section.push('\n');

    section
}

/// Generate one distribution table per year.
fn generate_distribution_section(distribution: &DistributionResult) -> String {
    let mut section = String::new();

    section.push_str("## Species Distribution by Island\n\n");

    if distribution.is_empty() {
        section.push_str("No records with species, island and year.\n\n");
        return section;
    }

    for (year, by_species) in distribution {
        section.push_str(&format!("### {}\n\n", year));
        section.push_str("| Species | Island | Share |\n");
        section.push_str("|:---|:---|---:|\n");

        for (species, islands) in by_species {
            for (island, pct) in islands {
                section.push_str(&format!("| {} | {} | {:.2}% |\n", species, island, pct));
            }
        }
        section.push('\n');
    }

    section
}

/// Generate the report footer.
fn generate_footer() -> String {
    format!(
        "---\n\n*Report generated by penguin-census v{}*\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// Generate a JSON report.
pub fn generate_json_report(report: &CensusReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
