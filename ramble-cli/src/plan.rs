//! Plan command implementation for the Ramble CLI.

use std::io::Write;
use std::num::NonZeroU32;

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ramble_core::{SolveRequest, Solver, TourConfig, TourSummary};
use ramble_solver_greedy::GreedySolver;
use serde::{Deserialize, Serialize};

use crate::fs::create_utf8_file;
use crate::report::PlanReport;
use crate::snapshot::Snapshot;
use crate::{
    ARG_BUDGET, ARG_END, ARG_SNAPSHOT, ARG_START, CliError, ENV_BUDGET, ENV_END, ENV_SNAPSHOT,
    ENV_START,
};

/// How the plan is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// The plan, diagnostics, and summary as pretty-printed JSON.
    #[default]
    Json,
    /// A human-readable itinerary and comparison report.
    Text,
}

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a scenic walking tour between two named attractions \
                 in a city snapshot. Values can come from CLI flags, \
                 configuration files, or RAMBLE_CMDS_PLAN_* environment \
                 variables; unset tunables keep their defaults.",
    about = "Plan a scenic walking tour"
)]
#[ortho_config(prefix = "RAMBLE")]
pub(crate) struct PlanArgs {
    /// Path to the city snapshot JSON.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) snapshot: Option<Utf8PathBuf>,
    /// Name of the attraction the tour starts at.
    #[arg(long = ARG_START, value_name = "name")]
    #[serde(default)]
    pub(crate) start: Option<String>,
    /// Name of the attraction the tour ends at.
    #[arg(long = ARG_END, value_name = "name")]
    #[serde(default)]
    pub(crate) end: Option<String>,
    /// Total time available, visits included.
    #[arg(long = ARG_BUDGET, value_name = "minutes")]
    #[serde(default)]
    pub(crate) budget_minutes: Option<f64>,
    /// Walking speed in km/h.
    #[arg(long, value_name = "km/h")]
    #[serde(default)]
    pub(crate) walking_speed_kmh: Option<f64>,
    /// Minutes spent at each intermediate stop.
    #[arg(long, value_name = "minutes")]
    #[serde(default)]
    pub(crate) visit_minutes: Option<f64>,
    /// Share of the budget held back for delays, in [0, 1).
    #[arg(long, value_name = "fraction")]
    #[serde(default)]
    pub(crate) buffer_fraction: Option<f64>,
    /// Longest straight-line hop to a stop, in km.
    #[arg(long, value_name = "km")]
    #[serde(default)]
    pub(crate) max_leg_km: Option<f64>,
    /// Candidates scoring below this are skipped.
    #[arg(long, value_name = "score")]
    #[serde(default)]
    pub(crate) min_score: Option<f64>,
    /// Maximum number of intermediate stops.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) max_stops: Option<usize>,
    /// Reward for walking past dense clusters of attractions.
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) attraction_weight: Option<f64>,
    /// Weight of the straight-line distance-to-goal term in the scenic search.
    #[arg(long, value_name = "weight")]
    #[serde(default)]
    pub(crate) heuristic_weight: Option<f64>,
    /// Sample scenic density on every n-th search expansion.
    #[arg(long, value_name = "n")]
    #[serde(default)]
    pub(crate) scenic_interval: Option<NonZeroU32>,
    /// Radius of the scenic density sample, in km.
    #[arg(long, value_name = "km")]
    #[serde(default)]
    pub(crate) scenic_radius_km: Option<f64>,
    /// Radius used when scoring candidate stops, in km.
    #[arg(long, value_name = "km")]
    #[serde(default)]
    pub(crate) scoring_radius_km: Option<f64>,
    /// Factor inflating straight-line hops into walking estimates.
    #[arg(long, value_name = "factor")]
    #[serde(default)]
    pub(crate) detour_factor: Option<f64>,
    /// Give up a scenic search after this many expansions.
    #[arg(long, value_name = "count")]
    #[serde(default)]
    pub(crate) max_search_iterations: Option<u32>,
    /// Output format.
    #[arg(long, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
    /// Write the plan to this file instead of stdout.
    #[arg(long, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) snapshot: Utf8PathBuf,
    pub(crate) start: String,
    pub(crate) end: String,
    pub(crate) budget_minutes: f64,
    pub(crate) tour: TourConfig,
    pub(crate) format: OutputFormat,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let snapshot = args.snapshot.ok_or(CliError::MissingArgument {
            field: ARG_SNAPSHOT,
            env: ENV_SNAPSHOT,
        })?;
        let start = args.start.ok_or(CliError::MissingArgument {
            field: ARG_START,
            env: ENV_START,
        })?;
        let end = args.end.ok_or(CliError::MissingArgument {
            field: ARG_END,
            env: ENV_END,
        })?;
        let budget_minutes = args.budget_minutes.ok_or(CliError::MissingArgument {
            field: ARG_BUDGET,
            env: ENV_BUDGET,
        })?;

        let defaults = TourConfig::default();
        let tour = TourConfig {
            walking_speed_kmh: args.walking_speed_kmh.unwrap_or(defaults.walking_speed_kmh),
            visit_minutes: args.visit_minutes.unwrap_or(defaults.visit_minutes),
            buffer_fraction: args.buffer_fraction.unwrap_or(defaults.buffer_fraction),
            max_leg_km: args.max_leg_km.unwrap_or(defaults.max_leg_km),
            min_score: args.min_score.unwrap_or(defaults.min_score),
            max_stops: args.max_stops.unwrap_or(defaults.max_stops),
            attraction_weight: args.attraction_weight.unwrap_or(defaults.attraction_weight),
            heuristic_weight: args.heuristic_weight.unwrap_or(defaults.heuristic_weight),
            scenic_interval: args.scenic_interval.unwrap_or(defaults.scenic_interval),
            scenic_radius_km: args.scenic_radius_km.unwrap_or(defaults.scenic_radius_km),
            scoring_radius_km: args.scoring_radius_km.unwrap_or(defaults.scoring_radius_km),
            detour_factor: args.detour_factor.unwrap_or(defaults.detour_factor),
            max_search_iterations: args
                .max_search_iterations
                .unwrap_or(defaults.max_search_iterations),
        };

        Ok(Self {
            snapshot,
            start,
            end,
            budget_minutes,
            tour,
            format: args.format.unwrap_or_default(),
            output: args.output,
        })
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(crate) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_plan(&config, writer)
}

/// Load the snapshot, solve, and write the report for a resolved config.
pub(crate) fn execute_plan(config: &PlanConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let (network, pois) = Snapshot::load(&config.snapshot)?.into_parts(&config.snapshot)?;
    let solver = GreedySolver::attraction(&network, &pois, config.tour);
    let request = SolveRequest::new(
        config.start.clone(),
        config.end.clone(),
        config.budget_minutes,
    );
    let response = solver
        .solve(&request)
        .map_err(|source| CliError::Solve { source })?;
    let summary = TourSummary::new(
        &response.plan,
        config.budget_minutes,
        config.tour.buffer_fraction,
    );
    let report = PlanReport {
        response: &response,
        summary,
    };

    match &config.output {
        Some(path) => {
            let mut file = create_utf8_file(path).map_err(|source| CliError::CreateOutput {
                path: path.clone(),
                source,
            })?;
            report.write(config.format, &mut file)
        }
        None => report.write(config.format, writer),
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
