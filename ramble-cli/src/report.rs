//! Plan output in JSON and human-readable text.

use std::io::{self, Write};

use ramble_core::geodesy::split_hours_minutes;
use ramble_core::{Leg, SolveResponse, TourSummary};
use serde::Serialize;

use crate::CliError;
use crate::plan::OutputFormat;

/// Everything the `plan` command reports for one solve.
#[derive(Debug, Serialize)]
pub(crate) struct PlanReport<'a> {
    #[serde(flatten)]
    pub(crate) response: &'a SolveResponse,
    pub(crate) summary: TourSummary,
}

impl PlanReport<'_> {
    pub(crate) fn write(
        &self,
        format: OutputFormat,
        writer: &mut dyn Write,
    ) -> Result<(), CliError> {
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self).map_err(CliError::SerialisePlan)?;
                writeln!(writer, "{json}").map_err(CliError::WritePlanOutput)
            }
            OutputFormat::Text => self.write_text(writer).map_err(CliError::WritePlanOutput),
        }
    }

    fn write_text(&self, writer: &mut dyn Write) -> io::Result<()> {
        let plan = &self.response.plan;
        let summary = &self.summary;
        let (first, last) = match (plan.stops.first(), plan.stops.last()) {
            (Some(first), Some(last)) => (first.name.as_str(), last.name.as_str()),
            _ => ("?", "?"),
        };
        writeln!(writer, "Tour from {first} to {last}")?;
        writeln!(writer)?;

        if let Some(baseline) = &plan.baseline {
            writeln!(
                writer,
                "Direct route: {:.2} km, ~{}, 2 stops",
                baseline.distance_km,
                duration(baseline.minutes)
            )?;
            writeln!(writer)?;
        }

        for (index, leg) in plan.itinerary.legs().iter().enumerate() {
            write_leg(writer, index + 1, leg)?;
        }

        writeln!(writer, "Summary")?;
        writeln!(writer, "  Total distance: {:.2} km", summary.distance_km)?;
        writeln!(writer, "  Stops: {}", summary.stops)?;
        writeln!(
            writer,
            "  Active time: {} (walking and visits)",
            duration(summary.active_minutes)
        )?;
        writeln!(writer, "  Buffer: {}", duration(summary.buffer_minutes))?;
        writeln!(writer, "  Total time: {}", duration(summary.total_minutes))?;
        writeln!(writer, "  Budget: {}", duration(summary.budget_minutes))?;
        if summary.fits_budget {
            writeln!(writer, "  Fits the budget")?;
        } else {
            writeln!(writer, "  Exceeds the budget; treat the plan as a guideline")?;
        }

        if let Some(comparison) = &summary.comparison {
            writeln!(writer)?;
            writeln!(writer, "Compared with the direct route")?;
            writeln!(
                writer,
                "  Extra distance: {:+.2} km ({:.1}%)",
                comparison.extra_distance_km, comparison.extra_distance_percent
            )?;
            writeln!(writer, "  Extra time: {:+.0} min", comparison.extra_minutes)?;
            writeln!(writer, "  Extra stops: +{}", comparison.extra_stops)?;
        }

        let diagnostics = &self.response.diagnostics;
        if diagnostics.fallback_legs > 0 {
            writeln!(writer)?;
            writeln!(
                writer,
                "{} leg(s) use straight-line estimates where no street path was found",
                diagnostics.fallback_legs
            )?;
        }
        Ok(())
    }
}

fn write_leg(writer: &mut dyn Write, number: usize, leg: &Leg) -> io::Result<()> {
    writeln!(writer, "Leg {number}: {} -> {}", leg.from, leg.to)?;
    let marker = if leg.estimated { " (estimated)" } else { "" };
    writeln!(
        writer,
        "  Walk: {:.2} km (~{}){marker}",
        leg.distance_km,
        duration(leg.walk_minutes)
    )?;
    if leg.visit_minutes > 0.0 {
        writeln!(writer, "  Visit: ~{}", duration(leg.visit_minutes))?;
    }
    if leg.scenic_score > 0 {
        writeln!(writer, "  Scenic points: {}", leg.scenic_score)?;
    }
    writeln!(writer)
}

/// Render minutes as `1h 05m`.
fn duration(minutes: f64) -> String {
    split_hours_minutes(Some(minutes)).map_or_else(
        || "unknown".to_owned(),
        |(hours, mins)| format!("{hours}h {mins:02}m"),
    )
}
