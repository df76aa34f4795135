//! `report` - browsing external usage reports.

use crate::{
    cli::render,
    config::Settings,
    core::report::{self, ReportFilter},
    errors::Result,
};
use chrono::{Local, Months, NaiveDate};
use clap::{Args, Subcommand};

/// External usage reports
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommands,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// List configured report sources
    Sources,
    /// Show rows of one source
    Show(ShowArgs),
}

/// Arguments for `report show`
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Report source key
    pub source: String,

    /// Only rows whose customer, serial or team contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// First day to include, YYYY-MM-DD [default: one month ago]
    #[arg(long, conflicts_with = "all_dates")]
    pub from: Option<NaiveDate>,

    /// Last day to include, YYYY-MM-DD [default: today]
    #[arg(long, conflicts_with = "all_dates")]
    pub to: Option<NaiveDate>,

    /// Show every row regardless of date
    #[arg(long)]
    pub all_dates: bool,
}

impl ShowArgs {
    fn filter(&self, today: NaiveDate) -> ReportFilter {
        let (from, to) = if self.all_dates {
            (None, None)
        } else {
            (
                Some(
                    self.from
                        .unwrap_or_else(|| today.checked_sub_months(Months::new(1)).unwrap_or(today)),
                ),
                Some(self.to.unwrap_or(today)),
            )
        };
        ReportFilter {
            query: self.search.clone().unwrap_or_default(),
            from,
            to,
        }
    }
}

/// Execute report commands
pub fn execute(args: ReportArgs, settings: &Settings) -> Result<()> {
    match args.command {
        ReportCommands::Sources => {
            let rows: Vec<Vec<String>> = settings
                .report_sources
                .iter()
                .map(|source| {
                    vec![
                        source.key.clone(),
                        source.display_name.clone(),
                        source.path.display().to_string(),
                        if source.path.exists() { "yes" } else { "no" }.to_string(),
                    ]
                })
                .collect();
            render::print_table(
                &["Key", "Name", "File", "Present"],
                &rows,
                "No report sources configured.",
            );
        }
        ReportCommands::Show(show) => {
            let source = settings.report_source(&show.source)?;
            let rows = report::load_report_rows(source)?;
            let filter = show.filter(Local::now().date_naive());
            let shown: Vec<Vec<String>> = report::filter_rows(&rows, &filter)
                .into_iter()
                .map(|row| {
                    vec![
                        row.timestamp.clone(),
                        row.subscription_id.clone(),
                        row.customer.clone(),
                        row.serial_number.clone(),
                        row.team.clone(),
                    ]
                })
                .collect();
            render::print_table(
                &["Timestamp", "Subscription ID", "Customer", "SN", "Team"],
                &shown,
                "No matching rows.",
            );
            println!("{} of {} row(s) from {}", shown.len(), rows.len(), source.display_name);
        }
    }
    Ok(())
}
