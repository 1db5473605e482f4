//! Command implementations.

pub mod check;
pub mod describe;
pub mod synth;

use pipeline_accelerator_infra::checks::{check_app, Report, SolutionsChecks};
use pipeline_accelerator_infra::{pipeline_accelerator_stack, App};

use crate::config::StackConfig;
use crate::error::{CliError, Result};
use crate::prelude::*;

/// Builds the app holding the pipeline accelerator stack.
pub fn build_app(config: &StackConfig) -> Result<App> {
    let mut app = App::new();
    app.add_stack(pipeline_accelerator_stack(
        &config.stack_name,
        config.stack_props(),
    )?)?;
    Ok(app)
}

/// Runs the solutions checks over `app`, prints the findings and fails when any
/// of them is an error.
pub fn enforce_checks(app: &App, global: &crate::Global) -> Result<Report> {
    let report = check_app(app, &SolutionsChecks::default());
    print_report(&report, global);

    if report.has_errors() {
        return Err(CliError::ChecksFailed {
            errors: report.errors().count(),
        });
    }
    Ok(report)
}

/// Prints every finding of a checks report.
pub fn print_report(report: &Report, global: &crate::Global) {
    if global.is_silent() {
        return;
    }

    if report.is_empty() {
        aprintln!("{}", p_g("No rule findings."));
        return;
    }

    for finding in report.errors() {
        aprintln!("  {}", p_r(&finding.format(global.is_verbose())));
    }
    for finding in report.warnings() {
        aprintln!("  {}", p_y(&finding.format(global.is_verbose())));
    }
    aprintln!();
}
