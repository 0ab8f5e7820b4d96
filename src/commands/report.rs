//! Report commands: load the dataset, compute one or all of the analyses and render them.

use crate::args::{RankingArgs, ReportArgs};
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::format::{render, OutputFormat, Rows};
use crate::model::Dataset;
use crate::report::{
    department_ranking, month_over_month, monthly_trend, risk_segments, ReportKind,
};
use crate::source::{self, Mode};
use crate::{Config, Result};
use anyhow::{anyhow, Context};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use tracing::{debug, error};

/// One rendered report.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedReport {
    kind: ReportKind,
    rows: Rows,
}

impl RenderedReport {
    pub fn kind(&self) -> ReportKind {
        self.kind
    }

    pub fn rows(&self) -> &Rows {
        &self.rows
    }
}

/// The reports produced by a command, printed to stdout.
///
/// A single report is written as-is. When there are several, table and CSV output get a heading
/// line before each report and JSON output becomes one object keyed by report name.
#[derive(Debug, Clone, Serialize)]
pub struct Reports {
    format: OutputFormat,
    reports: Vec<RenderedReport>,
}

impl Reports {
    pub fn reports(&self) -> &[RenderedReport] {
        &self.reports
    }
}

impl Display for Reports {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let [only] = self.reports.as_slice() {
            return write_rows(f, &only.rows);
        }
        if self.format == OutputFormat::Json {
            let object: serde_json::Map<String, serde_json::Value> = self
                .reports
                .iter()
                .filter_map(|r| match &r.rows {
                    Rows::Json(v) => Some((r.kind.to_string(), v.clone())),
                    _ => None,
                })
                .collect();
            let json = serde_json::to_string_pretty(&object).map_err(|_| std::fmt::Error)?;
            return writeln!(f, "{json}");
        }
        let marker = match self.format {
            OutputFormat::Csv => "#",
            _ => "##",
        };
        for (ix, r) in self.reports.iter().enumerate() {
            if ix > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{marker} {}", r.kind.title())?;
            if self.format == OutputFormat::Table {
                writeln!(f)?;
            }
            write_rows(f, &r.rows)?;
        }
        Ok(())
    }
}

fn write_rows(f: &mut Formatter<'_>, rows: &Rows) -> std::fmt::Result {
    let s = rows.to_string();
    if s.ends_with('\n') {
        write!(f, "{s}")
    } else {
        writeln!(f, "{s}")
    }
}

/// Prints departments ranked by revenue. `--top` overrides `top_n` from the config.
pub async fn ranking(config: Config, mode: Mode, args: RankingArgs) -> Result<Out<Reports>> {
    let dataset = load_dataset(&config, mode).await?;
    let format = args.report().format().unwrap_or(config.output_format());
    let top_n = args.top().unwrap_or(config.top_n());
    let rows = render_ranking(&dataset, top_n, format).pub_result(ErrorType::Report)?;
    Ok(single(ReportKind::Ranking, format, rows))
}

/// Prints one of the reports that take no options beyond the output format.
pub async fn report(
    config: Config,
    mode: Mode,
    kind: ReportKind,
    args: ReportArgs,
) -> Result<Out<Reports>> {
    let dataset = load_dataset(&config, mode).await?;
    let format = args.format().unwrap_or(config.output_format());
    let rows = render_report(&dataset, &config, kind, format).pub_result(ErrorType::Report)?;
    Ok(single(kind, format, rows))
}

/// Prints all four reports. A report that fails is logged and skipped, the others are still
/// printed. Fails only when no report could be rendered.
pub async fn all(config: Config, mode: Mode, args: ReportArgs) -> Result<Out<Reports>> {
    let dataset = load_dataset(&config, mode).await?;
    let format = args.format().unwrap_or(config.output_format());

    let mut reports = Vec::new();
    for kind in ReportKind::ALL {
        match render_report(&dataset, &config, kind, format) {
            Ok(rows) => reports.push(RenderedReport { kind, rows }),
            Err(e) => error!("The {kind} report failed: {e:#}"),
        }
    }
    if reports.is_empty() {
        return Err::<Out<Reports>, _>(anyhow!("None of the reports could be rendered"))
            .pub_result(ErrorType::Report);
    }

    let message = format!(
        "Rendered {} of {} reports",
        reports.len(),
        ReportKind::ALL.len()
    );
    Ok(Out::new(message, Reports { format, reports }))
}

async fn load_dataset(config: &Config, mode: Mode) -> Result<Dataset> {
    debug!("Loading data in {mode:?} mode");
    let mut source = source::source(config, mode);
    source::load(source.as_mut())
        .await
        .context("Unable to load the input tables")
        .pub_result(ErrorType::Data)
}

fn render_report(
    dataset: &Dataset,
    config: &Config,
    kind: ReportKind,
    format: OutputFormat,
) -> Result<Rows> {
    match kind {
        ReportKind::Ranking => render_ranking(dataset, config.top_n(), format),
        ReportKind::Trend => render(
            &monthly_trend(dataset, config.moving_average_window())?,
            format,
        ),
        ReportKind::Mom => render(&month_over_month(dataset)?, format),
        ReportKind::Risk => render(&risk_segments(dataset)?, format),
    }
}

fn render_ranking(dataset: &Dataset, top_n: usize, format: OutputFormat) -> Result<Rows> {
    render(&department_ranking(dataset, Some(top_n))?, format)
}

fn single(kind: ReportKind, format: OutputFormat, rows: Rows) -> Out<Reports> {
    Out::new(
        format!("Rendered the {} report", kind.title()),
        Reports {
            format,
            reports: vec![RenderedReport { kind, rows }],
        },
    )
}
