//! Interactive dashboard shell
//!
//! Reads one command per line, runs it against [`SalesDeskService`] and
//! prints the result. Domain errors are shown inline and never end the
//! session; only I/O failures on the terminal do.

pub mod commands;
pub mod tokenize;

use std::io::Write;
use std::sync::Arc;
use std::time::Instant;

use clap::CommandFactory;
use salesdesk_core::{
    clean_for_display, BulkProgress, BulkUpdateReport, SalesDeskService, SearchField, Table,
};
use salesdesk_domain::{Opportunity, Record, SalesDeskError, SolutionLine};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::render::{activity_table, format_amount, render_table, totals_table};
use crate::utils::logging::log_command_execution;
use commands::{ShellCommand, ShellLine};
use tokenize::split_line;

/// Whether the shell keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Error)]
enum ShellError {
    #[error(transparent)]
    Domain(#[from] SalesDeskError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

type CommandResult = Result<Flow, ShellError>;

pub struct Shell<R, W> {
    service: Arc<SalesDeskService>,
    input: R,
    output: W,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write + Send,
{
    pub fn new(service: Arc<SalesDeskService>, input: R, output: W) -> Self {
        Self { service, input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until `quit` or end of input.
    ///
    /// # Errors
    /// Returns an error when the terminal cannot be read or written.
    pub async fn run(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "Sales Opportunity Dashboard. Type `help` for commands.")?;
        loop {
            write!(self.output, "{}", self.prompt())?;
            self.output.flush()?;
            let Some(line) = self.read_line().await? else {
                writeln!(self.output)?;
                break;
            };
            if self.execute_line(&line).await? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn prompt(&self) -> String {
        match self.service.current_group() {
            Ok(info) => format!("salesdesk [{}]> ", info.sales_group),
            Err(_) => "salesdesk> ".to_string(),
        }
    }

    /// Execute a single input line.
    ///
    /// # Errors
    /// Returns an error only for terminal I/O failures.
    pub async fn execute_line(&mut self, line: &str) -> std::io::Result<Flow> {
        let tokens = match split_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(Flow::Continue);
            }
        };
        if tokens.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match commands::parse(&tokens) {
            Ok(command) => command,
            Err(err) => {
                write!(self.output, "{err}")?;
                return Ok(Flow::Continue);
            }
        };

        let name = command.name();
        let started = Instant::now();
        match self.dispatch(command).await {
            Ok(flow) => {
                log_command_execution(name, started.elapsed(), None);
                Ok(flow)
            }
            Err(ShellError::Domain(err)) => {
                log_command_execution(name, started.elapsed(), Some(&err));
                writeln!(self.output, "{}", err.user_message())?;
                Ok(Flow::Continue)
            }
            Err(ShellError::Io(err)) => Err(err),
        }
    }

    async fn dispatch(&mut self, command: ShellCommand) -> CommandResult {
        debug!(command = command.name(), "dispatching shell command");
        match command {
            ShellCommand::Help => self.help(),
            ShellCommand::Quit => Ok(Flow::Quit),
            ShellCommand::Names => self.names().await,
            ShellCommand::Login { name } => self.login(name).await,
            ShellCommand::Whoami => self.whoami(),
            ShellCommand::Logout => {
                self.service.logout();
                writeln!(self.output, "Logged out.")?;
                Ok(Flow::Continue)
            }
            ShellCommand::Passwd => self.change_password().await,
            ShellCommand::List => self.list().await,
            ShellCommand::Totals => self.totals().await,
            ShellCommand::Options { field } => {
                let options = self.service.search_options(field.into()).await?;
                if options.is_empty() {
                    writeln!(self.output, "No options available.")?;
                }
                for option in options {
                    writeln!(self.output, "  {option}")?;
                }
                Ok(Flow::Continue)
            }
            ShellCommand::Search { field, term } => {
                self.search(field.into(), &term.join(" ")).await
            }
            ShellCommand::Editable => self.editable().await,
            ShellCommand::Stage { id, stage, notes } => {
                let message = self.service.update_stage(&id, stage, notes).await?;
                writeln!(self.output, "{message}")?;
                Ok(Flow::Continue)
            }
            ShellCommand::Lines { id } => self.lines(&id).await,
            ShellCommand::Price { id, updates } => self.update_prices(&id, &updates).await,
            ShellCommand::Lumpsum { id, price } => {
                let message = self.service.update_lump_sum(&id, price).await?;
                writeln!(self.output, "{message}")?;
                Ok(Flow::Continue)
            }
            ShellCommand::Activity => {
                let rows = self.service.activity_log().await?;
                if rows.is_empty() {
                    writeln!(self.output, "No activity recorded for your group.")?;
                } else {
                    self.print_table(&activity_table(&rows))?;
                }
                Ok(Flow::Continue)
            }
            ShellCommand::Lookup { kind } => {
                let rows = self.service.lookup(kind.into()).await?;
                if rows.is_empty() {
                    writeln!(self.output, "No data available.")?;
                } else {
                    self.print_table(&Table::from_records(&rows, &[], &[]))?;
                }
                Ok(Flow::Continue)
            }
            ShellCommand::Refresh => {
                self.service.refresh();
                writeln!(self.output, "Cached data cleared.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn help(&mut self) -> CommandResult {
        let help = ShellLine::command().render_help();
        write!(self.output, "{help}")?;
        Ok(Flow::Continue)
    }

    async fn names(&mut self) -> CommandResult {
        for name in self.service.sales_names().await? {
            writeln!(self.output, "  {name}")?;
        }
        Ok(Flow::Continue)
    }

    async fn login(&mut self, name: Vec<String>) -> CommandResult {
        let name = if name.is_empty() { self.choose_name().await? } else { Some(name.join(" ")) };
        let password = self.ask("Password: ").await?;

        let info = self.service.login(name.as_deref(), &password).await?;
        writeln!(self.output, "Welcome, {}", info.display_name())?;
        Ok(Flow::Continue)
    }

    /// Offer the numbered user list; an empty answer logs in without a name.
    async fn choose_name(&mut self) -> Result<Option<String>, ShellError> {
        let names = self.service.sales_names().await?;
        for (index, name) in names.iter().enumerate() {
            writeln!(self.output, "  {:>2}. {name}", index + 1)?;
        }
        let answer = self.ask("Select your name (number or name): ").await?;
        if answer.is_empty() {
            return Ok(None);
        }

        let chosen = match answer.parse::<usize>() {
            Ok(n) if (1..=names.len()).contains(&n) => names[n - 1].clone(),
            _ => names
                .iter()
                .find(|name| name.eq_ignore_ascii_case(&answer))
                .cloned()
                .ok_or_else(|| {
                    SalesDeskError::InvalidInput(format!("Unknown sales name: {answer}"))
                })?,
        };
        Ok(Some(chosen))
    }

    fn whoami(&mut self) -> CommandResult {
        let info = self.service.current_group()?;
        writeln!(self.output, "Welcome, {}", info.display_name())?;
        writeln!(self.output, "Group: {}", info.sales_group)?;
        Ok(Flow::Continue)
    }

    async fn change_password(&mut self) -> CommandResult {
        self.service.current_group()?;
        let old_password = self.ask("Old password: ").await?;
        let new_password = self.ask("New password: ").await?;
        let message = self.service.change_password(&old_password, &new_password).await?;
        writeln!(self.output, "{message}")?;
        Ok(Flow::Continue)
    }

    async fn list(&mut self) -> CommandResult {
        let rows = self.service.opportunities().await?;
        if rows.is_empty() {
            writeln!(self.output, "No opportunities found for you.")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "Found {} solutions for you.", rows.len())?;
        self.print_table(&clean_for_display(&rows))?;
        Ok(Flow::Continue)
    }

    async fn totals(&mut self) -> CommandResult {
        let totals = self.service.opportunity_totals().await?;
        if totals.is_empty() {
            writeln!(self.output, "Could not load opportunities list for you.")?;
            return Ok(Flow::Continue);
        }
        self.print_table(&totals_table(&totals))?;
        let grand_total: f64 = totals.iter().map(|t| t.total_selling_price).sum();
        writeln!(self.output, "Grand total: {}", format_amount(grand_total))?;
        Ok(Flow::Continue)
    }

    async fn search(&mut self, field: SearchField, term: &str) -> CommandResult {
        let rows = self.service.search(field, term).await?;
        if rows.is_empty() {
            writeln!(self.output, "No solution found with the given criteria in your scope.")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "Found {} matching solution(s).", rows.len())?;
        self.print_table(&clean_for_display(&rows))?;
        Ok(Flow::Continue)
    }

    async fn editable(&mut self) -> CommandResult {
        let opportunities = self.service.editable_opportunities().await?;
        if opportunities.is_empty() {
            writeln!(self.output, "No opportunities found for you.")?;
            return Ok(Flow::Continue);
        }
        let records: Vec<Record> = opportunities.iter().map(opportunity_record).collect();
        self.print_table(&clean_for_display(&records))?;
        Ok(Flow::Continue)
    }

    async fn lines(&mut self, opportunity_id: &str) -> CommandResult {
        let lines = self.service.solution_lines(opportunity_id).await?;
        if lines.is_empty() {
            writeln!(self.output, "No solution details found for this opportunity.")?;
            return Ok(Flow::Continue);
        }
        let records: Vec<Record> = lines.iter().map(line_record).collect();
        self.print_table(&clean_for_display(&records))?;
        Ok(Flow::Continue)
    }

    async fn update_prices(
        &mut self,
        opportunity_id: &str,
        updates: &[(String, u64)],
    ) -> CommandResult {
        let service = Arc::clone(&self.service);
        let output = &mut self.output;
        let mut io_error: Option<std::io::Error> = None;
        let mut progress = |step: BulkProgress<'_>| {
            if io_error.is_none() {
                if let Err(err) = writeln!(
                    output,
                    "Updating price for solution {}/{}...",
                    step.position, step.total
                ) {
                    io_error = Some(err);
                }
            }
        };

        let report = service.update_prices(opportunity_id, updates, &mut progress).await?;
        if let Some(err) = io_error {
            return Err(err.into());
        }
        self.print_report(&report)?;
        Ok(Flow::Continue)
    }

    fn print_report(&mut self, report: &BulkUpdateReport) -> std::io::Result<()> {
        if report.succeeded > 0 {
            writeln!(
                self.output,
                "{} of {} solution prices updated.",
                report.succeeded, report.total
            )?;
        }
        if !report.is_complete_success() {
            writeln!(
                self.output,
                "{} of {} solution prices failed to update.",
                report.failed_count(),
                report.total
            )?;
            for (uid, message) in &report.failed {
                writeln!(self.output, "  {uid}: {message}")?;
            }
        }
        Ok(())
    }

    fn print_table(&mut self, table: &Table) -> std::io::Result<()> {
        write!(self.output, "{}", render_table(table))
    }

    async fn ask(&mut self, prompt: &str) -> std::io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        Ok(self.read_line().await?.unwrap_or_default())
    }

    async fn read_line(&mut self) -> std::io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn opportunity_record(opportunity: &Opportunity) -> Record {
    Record::new()
        .with("opportunity_id", opportunity.opportunity_id.clone())
        .with("opportunity_name", opportunity.opportunity_name.clone())
        .with("company_name", opportunity.company_name.clone())
        .with("sales_name", opportunity.sales_name.clone())
        .with("stage", opportunity.stage.label())
        .with("sales_notes", opportunity.sales_notes.clone())
}

fn line_record(line: &SolutionLine) -> Record {
    Record::new()
        .with("uid", line.uid.clone())
        .with("pillar", line.pillar.clone())
        .with("solution", line.solution.clone())
        .with("brand", line.brand.clone())
        .with("selling_price", line.selling_price)
}
