use crate::application::read_models::{GraphReport, RankingView};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::fmt::Write;

/// MarkdownReportFormatter adapter producing a human-readable summary
///
/// Lists are written in identifier order except the rankings, which are
/// ordered by count.
pub struct MarkdownReportFormatter;

impl MarkdownReportFormatter {
    pub fn new() -> Self {
        Self
    }

    fn plural(count: usize, singular: &str, plural: &str) -> String {
        if count == 1 {
            format!("{} {}", count, singular)
        } else {
            format!("{} {}", count, plural)
        }
    }

    fn render_header(&self, output: &mut String, report: &GraphReport) -> std::fmt::Result {
        writeln!(output, "# Swift Package Dependency Graph Analysis Report\n")?;
        writeln!(output, "**Generated**: {}", report.metadata.generated_at)?;
        writeln!(
            output,
            "**Tool**: {} {}",
            report.metadata.tool_name, report.metadata.tool_version
        )?;
        writeln!(
            output,
            "**Source**: `{}` ({})\n",
            report.metadata.base_directory, report.metadata.mode
        )
    }

    fn render_statistics(&self, output: &mut String, report: &GraphReport) -> std::fmt::Result {
        let stats = &report.statistics;
        writeln!(output, "## Graph Statistics\n")?;
        writeln!(output, "- **Total Nodes (Repositories)**: {}", stats.total_nodes)?;
        writeln!(output, "- **Total Edges (Dependencies)**: {}", stats.total_edges)?;
        writeln!(output, "- **Root Packages**: {}", stats.root_packages)?;
        writeln!(output, "- **Leaf Packages**: {}", stats.leaf_packages)?;
        writeln!(output, "- **Maximum Dependency Depth**: {}", stats.max_depth)?;
        writeln!(output, "- **Circular Dependencies**: {}", stats.cycle_count())?;
        writeln!(output, "- **Failed Repositories**: {}\n", report.failed.len())
    }

    fn render_run_summary(&self, output: &mut String, report: &GraphReport) -> std::fmt::Result {
        let Some(run) = &report.run else {
            return Ok(());
        };

        writeln!(output, "## Run Summary\n")?;
        writeln!(
            output,
            "- **Processing Time**: {:.2} minutes",
            run.processing_time_minutes
        )?;
        writeln!(output, "- **Started**: {}", run.started_at)?;
        writeln!(output, "- **Finished**: {}", run.finished_at)?;
        writeln!(output, "- **Total Repositories in CSV**: {}", run.total_seeds)?;
        writeln!(output, "- **Successfully Downloaded**: {}", run.successful_downloads)?;
        writeln!(output, "- **Failed Downloads**: {}", run.failed_downloads)?;
        writeln!(output, "- **Success Rate**: {:.1}%", run.success_rate)?;
        writeln!(
            output,
            "- **Total Dependencies Found**: {}",
            run.total_dependencies_found
        )?;
        writeln!(
            output,
            "- **Unique Repositories Processed**: {}\n",
            run.unique_repositories_processed
        )?;

        writeln!(output, "## Successfully Processed Repositories\n")?;
        if run.processed_repositories.is_empty() {
            writeln!(output, "_None_")?;
        }
        for id in &run.processed_repositories {
            writeln!(output, "- {}", id)?;
        }
        writeln!(output)
    }

    fn render_ranking(
        &self,
        output: &mut String,
        title: &str,
        ranking: &[RankingView],
        unit: (&str, &str),
    ) -> std::fmt::Result {
        writeln!(output, "## {}\n", title)?;
        if ranking.is_empty() {
            writeln!(output, "_None_")?;
        }
        for (i, entry) in ranking.iter().enumerate() {
            writeln!(
                output,
                "{}. **{}**: {}",
                i + 1,
                entry.id,
                Self::plural(entry.count, unit.0, unit.1)
            )?;
        }
        writeln!(output)
    }

    fn render_cycles(&self, output: &mut String, report: &GraphReport) -> std::fmt::Result {
        let cycles = &report.statistics.circular_dependencies;
        if cycles.is_empty() {
            writeln!(output, "## Circular Dependencies\n")?;
            return writeln!(output, "✅ No circular dependencies detected!\n");
        }

        writeln!(output, "## Circular Dependencies ({})\n", cycles.len())?;
        for (i, cycle) in cycles.iter().enumerate() {
            let path: Vec<String> = cycle.iter().map(ToString::to_string).collect();
            writeln!(output, "{}. {}", i + 1, path.join(" → "))?;
        }
        writeln!(output)
    }

    fn render_roots_and_leaves(&self, output: &mut String, report: &GraphReport) -> std::fmt::Result {
        writeln!(output, "## Root Packages (No Dependencies From Others)\n")?;
        for root in report.roots() {
            writeln!(
                output,
                "- **{}**: {}",
                root.id,
                Self::plural(root.dependencies_count, "dependency", "dependencies")
            )?;
        }

        writeln!(output, "\n## Leaf Packages (No Dependencies To Others)\n")?;
        for leaf in report.leaves() {
            writeln!(
                output,
                "- **{}**: {}",
                leaf.id,
                Self::plural(leaf.dependents_count, "dependent", "dependents")
            )?;
        }
        writeln!(output)
    }

    fn render_relationships(&self, output: &mut String, report: &GraphReport) -> std::fmt::Result {
        writeln!(output, "## Dependency Relationships\n")?;
        for node in report.nodes.iter().filter(|n| !n.declarations.is_empty()) {
            match &node.package_name {
                Some(name) => writeln!(output, "**{}** ({}):", node.id, name)?,
                None => writeln!(output, "**{}**:", node.id)?,
            }
            for decl in &node.declarations {
                let target = decl.target.as_deref().unwrap_or(&decl.locator);
                writeln!(output, "  - {} ({})", target, decl.constraint)?;
            }
            writeln!(output)?;
        }
        Ok(())
    }

    fn render_failures(&self, output: &mut String, report: &GraphReport) -> std::fmt::Result {
        if report.failed.is_empty() && report.unresolvable_locators.is_empty() {
            return Ok(());
        }

        if !report.failed.is_empty() {
            writeln!(output, "## Failed Repositories ({})\n", report.failed.len())?;
            for failure in &report.failed {
                writeln!(output, "- **{}**: {}", failure.id, failure.reason)?;
            }
            writeln!(output)?;
        }

        if !report.unresolvable_locators.is_empty() {
            writeln!(output, "## Unresolvable Locators\n")?;
            for locator in &report.unresolvable_locators {
                writeln!(output, "- `{}`", locator)?;
            }
            writeln!(output)?;
        }
        Ok(())
    }
}

impl Default for MarkdownReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownReportFormatter {
    fn format(&self, report: &GraphReport) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, report)?;
        self.render_statistics(&mut output, report)?;
        self.render_run_summary(&mut output, report)?;
        self.render_ranking(
            &mut output,
            "Most Depended Upon Packages (Top 10)",
            &report.most_depended_upon,
            ("dependent", "dependents"),
        )?;
        self.render_ranking(
            &mut output,
            "Packages with Most Dependencies (Top 10)",
            &report.most_dependencies,
            ("dependency", "dependencies"),
        )?;
        self.render_cycles(&mut output, report)?;
        self.render_roots_and_leaves(&mut output, report)?;
        self.render_relationships(&mut output, report)?;
        self.render_failures(&mut output, report)?;

        Ok(output)
    }
}
