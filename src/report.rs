//! Output of the prepared dashboard

use crate::{dashboard::Dashboard, dataset::Counted, Count, Result};
use anyhow::Context;
use clap::ValueEnum;
use std::fmt::{self, Write};
use tokio::io::{AsyncWriteExt, BufWriter};

/// Dashboard output format
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, ValueEnum)]
pub enum Format {
    /// Human-readable report
    Text,

    /// JSON document, for consumption by a chart renderer
    Json,
}

/// Write the dashboard to stdout
pub async fn render(dashboard: &Dashboard<'_>, format: Format) -> Result<()> {
    let output = match format {
        Format::Text => text_report(dashboard)
            .context("formatting the text report")?
            .into_bytes(),
        Format::Json => {
            let mut json = serde_json::to_vec_pretty(dashboard)
                .context("converting the dashboard to JSON")?;
            json.push(b'\n');
            json
        }
    };
    let mut stdout = BufWriter::new(tokio::io::stdout());
    stdout.write_all(&output).await?;
    stdout.flush().await?;
    Ok(())
}

/// Format the dashboard as a human-readable report
pub fn text_report(dashboard: &Dashboard<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let Dashboard {
        kpis,
        sidebar,
        institutions,
        topics,
        types,
    } = dashboard;

    // Header
    writeln!(out, "Citation Source Analytics")?;
    writeln!(out, "=========================")?;
    writeln!(out, "Total institution citations: {}", kpis.institution_citations)?;
    match kpis.countries {
        Some(countries) => writeln!(out, "Countries represented: {countries}")?,
        None => writeln!(out, "Countries represented: -")?,
    }
    writeln!(out, "Top institution: {}", kpis.top_institution.unwrap_or("-"))?;
    writeln!(out, "Top topic: {}", kpis.top_topic.unwrap_or("-"))?;
    writeln!(out, "Total publication type citations: {}", kpis.type_citations)?;
    writeln!(
        out,
        "Datasets: {} institutions, {} topics, {} citation types",
        sidebar.institutions, sidebar.topics, sidebar.types
    )?;
    writeln!(out, "Country filter: {}", sidebar.country)?;

    // Institutions tab
    section(&mut out, "Institutions")?;
    table(
        &mut out,
        "Top institutions by citation count",
        institutions.top.iter().map(|record| Row::with_note(*record, &record.category)),
    )?;
    table(
        &mut out,
        "Citations by country",
        institutions.by_country.iter().map(Row::new),
    )?;

    // Topics tab
    section(&mut out, "Topics")?;
    table(
        &mut out,
        "Topic ranking",
        topics.top.iter().map(|record| Row::new(*record)),
    )?;

    // Publication types tab
    section(&mut out, "Publication Types")?;
    table(
        &mut out,
        "Citation volume by type",
        types.table.iter().map(|record| Row::new(*record)),
    )?;
    table(
        &mut out,
        "Cumulative share",
        types.cumulative.iter().map(|share| Row {
            name: &share.name,
            count: share.count,
            note: format!("{:.1}%", share.cumulative_percent),
        }),
    )?;
    Ok(out)
}

/// Line of a text table
struct Row<'a> {
    /// Record name
    name: &'a str,

    /// Citation count
    count: Count,

    /// Extra information displayed after the count
    note: String,
}
//
impl<'a> Row<'a> {
    /// Row with no extra information
    fn new(record: &'a impl Counted) -> Self {
        Self {
            name: record.name(),
            count: record.count(),
            note: String::new(),
        }
    }

    /// Row with extra information
    fn with_note(record: &'a impl Counted, note: &str) -> Self {
        Self {
            note: note.to_owned(),
            ..Self::new(record)
        }
    }
}

/// Start a report section
fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "## {title}")
}

/// Write down a table of records, with aligned columns
fn table<'a>(out: &mut String, title: &str, rows: impl Iterator<Item = Row<'a>>) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "### {title}")?;
    let rows = rows.collect::<Vec<_>>();
    if rows.is_empty() {
        return writeln!(out, "(no data)");
    }
    let name_width = rows
        .iter()
        .map(|row| row.name.chars().count())
        .max()
        .unwrap_or(0);
    let count_width = rows
        .iter()
        .map(|row| row.count.to_string().len())
        .max()
        .unwrap_or(0);
    for row in rows {
        let line = format!(
            "{:<name_width$}  {:>count_width$}  {}",
            row.name, row.count, row.note
        );
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
