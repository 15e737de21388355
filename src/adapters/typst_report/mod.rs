//! Typst-based report generation.
//!
//! Orchestrates placeholder resolution: reads a Typst template (either the
//! built-in default or a custom file via `template_path`), resolves all
//! `{{PLACEHOLDER}}` markers by calling helpers from `chart_svg` and `tables`,
//! and writes the final `.typ` file.

pub mod chart_svg;
pub mod default_template;
pub mod tables;

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::PairsimError;
use crate::domain::performance::PerformanceReport;
use crate::ports::report_port::{ReportPort, ReportSubject};

/// Context for resolving template placeholders.
pub struct ReportContext<'a> {
    pub report: &'a PerformanceReport,
    pub subject: &'a ReportSubject,
}

fn embed_svg(svg: &str, empty_text: &str) -> String {
    if svg.is_empty() {
        empty_text.to_string()
    } else {
        format!(
            "#image.decode(\n\"{}\",\n  width: 100%,\n)",
            svg.replace('\\', "\\\\").replace('"', "\\\"")
        )
    }
}

/// Resolve all `{{PLACEHOLDER}}`s in the given template string and return
/// the final Typst markup ready to be written to a `.typ` file.
pub fn resolve(template: &str, ctx: &ReportContext) -> String {
    let mut output = template.to_string();

    output = output.replace("{{PAIR}}", &tables::escape_markup(&ctx.subject.pair_id));
    output = output.replace(
        "{{INSTRUMENT_FILTER}}",
        &tables::escape_markup(&ctx.subject.instrument_filter),
    );
    output = output.replace("{{INVESTMENT}}", &tables::format_money(ctx.report.investment));

    let summary = tables::format_summary_table(&ctx.report.summary);
    output = output.replace("{{SUMMARY_TABLE}}", &summary);

    let equity_svg = chart_svg::generate_equity_svg(ctx.report);
    output = output.replace(
        "{{EQUITY_CURVE_SVG}}",
        &embed_svg(&equity_svg, "_No equity data._"),
    );

    let histogram_svg = chart_svg::generate_return_histogram_svg(ctx.report);
    output = output.replace(
        "{{RETURN_HISTOGRAM_SVG}}",
        &embed_svg(&histogram_svg, "_No return data._"),
    );

    let trade_log = tables::format_trade_log(&ctx.report.trades);
    output = output.replace("{{TRADE_LOG}}", &trade_log);

    output
}

/// Writes Typst reports, using a custom template file when one is configured.
pub struct TypstReportAdapter {
    template_path: Option<PathBuf>,
}

impl TypstReportAdapter {
    pub fn new(template_path: Option<PathBuf>) -> Self {
        Self { template_path }
    }

    fn load_template(&self) -> Result<String, PairsimError> {
        match &self.template_path {
            Some(path) => fs::read_to_string(path).map_err(|e| {
                PairsimError::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to read template {}: {}", path.display(), e),
                ))
            }),
            None => Ok(default_template::template().to_string()),
        }
    }
}

impl ReportPort for TypstReportAdapter {
    fn write(
        &self,
        report: &PerformanceReport,
        subject: &ReportSubject,
        output_path: &str,
    ) -> Result<(), PairsimError> {
        let template = self.load_template()?;
        let content = resolve(&template, &ReportContext { report, subject });

        let path = Path::new(output_path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;

        log::info!("wrote report for '{}' to {}", subject.pair_id, path.display());
        Ok(())
    }
}
