//! Shell command grammar

use clap::{Parser, Subcommand, ValueEnum};
use salesdesk_core::SearchField;
use salesdesk_domain::{Dataset, Stage};

/// One line of shell input.
#[derive(Debug, Parser)]
#[command(
    name = "salesdesk",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: ShellCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum ShellCommand {
    /// List the sales users that can log in
    Names,
    /// Log in; without a name the user list is offered
    Login { name: Vec<String> },
    /// Show available commands
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
    /// Show the logged-in user and group
    Whoami,
    /// End the session
    Logout,
    /// Change your password
    Passwd,
    /// Show every solution visible to you
    #[command(alias = "ls")]
    List,
    /// Show opportunities with their summed selling price
    Totals,
    /// List the values a search field can take
    Options {
        #[arg(value_enum)]
        field: FieldArg,
    },
    /// Search solutions by field
    Search {
        #[arg(value_enum)]
        field: FieldArg,
        #[arg(required = true, num_args = 1..)]
        term: Vec<String>,
    },
    /// List the opportunities you can edit
    Editable,
    /// Set the stage (open, won, lost) and optionally the notes
    Stage {
        id: String,
        #[arg(value_parser = parse_stage)]
        stage: Stage,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Show the solution lines of an opportunity
    Lines { id: String },
    /// Post solution prices, e.g. `price OPP-1 U-1=1500000`
    Price {
        id: String,
        #[arg(value_parser = parse_price_override)]
        updates: Vec<(String, u64)>,
    },
    /// Replace an opportunity's price with one lump sum
    Lumpsum { id: String, price: u64 },
    /// Show recent activity for your group
    Activity,
    /// Browse a reference list
    Lookup {
        #[arg(value_enum)]
        kind: LookupArg,
    },
    /// Drop cached data
    Refresh,
}

impl ShellCommand {
    /// Name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Names => "names",
            Self::Login { .. } => "login",
            Self::Help => "help",
            Self::Quit => "quit",
            Self::Whoami => "whoami",
            Self::Logout => "logout",
            Self::Passwd => "passwd",
            Self::List => "list",
            Self::Totals => "totals",
            Self::Options { .. } => "options",
            Self::Search { .. } => "search",
            Self::Editable => "editable",
            Self::Stage { .. } => "stage",
            Self::Lines { .. } => "lines",
            Self::Price { .. } => "price",
            Self::Lumpsum { .. } => "lumpsum",
            Self::Activity => "activity",
            Self::Lookup { .. } => "lookup",
            Self::Refresh => "refresh",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FieldArg {
    #[value(alias = "opportunity")]
    OpportunityName,
    Company,
    #[value(alias = "sales")]
    SalesName,
    #[value(alias = "presales")]
    PresalesAccountManager,
    Pillar,
    Solution,
    Brand,
}

impl From<FieldArg> for SearchField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::OpportunityName => Self::OpportunityName,
            FieldArg::Company => Self::Company,
            FieldArg::SalesName => Self::SalesName,
            FieldArg::PresalesAccountManager => Self::PresalesAccountManager,
            FieldArg::Pillar => Self::Pillar,
            FieldArg::Solution => Self::Solution,
            FieldArg::Brand => Self::Brand,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LookupArg {
    Opportunities,
    Companies,
    SalesGroups,
    Responsibles,
    Pillars,
    Brands,
}

impl From<LookupArg> for Dataset {
    fn from(arg: LookupArg) -> Self {
        match arg {
            LookupArg::Opportunities => Self::Opportunities,
            LookupArg::Companies => Self::Companies,
            LookupArg::SalesGroups => Self::SalesGroups,
            LookupArg::Responsibles => Self::Responsibles,
            LookupArg::Pillars => Self::Pillars,
            LookupArg::Brands => Self::Brands,
        }
    }
}

/// Accepts the stage labels plus `won`, `lost` and dashed forms.
fn parse_stage(raw: &str) -> Result<Stage, String> {
    let normalized = raw.trim().replace(['-', '_'], " ");
    match normalized.to_ascii_lowercase().as_str() {
        "won" => Ok(Stage::ClosedWon),
        "lost" => Ok(Stage::ClosedLost),
        _ => normalized.parse::<Stage>().map_err(|_| {
            let labels: Vec<&str> = Stage::ALL.iter().map(|s| s.label()).collect();
            format!("expected one of: {}", labels.join(", "))
        }),
    }
}

/// `UID=PRICE`; the price may carry `,` or `_` digit grouping.
///
/// Prices are whole amounts: a `.` fraction is accepted only when it is
/// all zeros.
fn parse_price_override(raw: &str) -> Result<(String, u64), String> {
    let (uid, price) =
        raw.split_once('=').ok_or_else(|| format!("expected UID=PRICE, got `{raw}`"))?;
    let uid = uid.trim();
    if uid.is_empty() {
        return Err(format!("missing solution uid in `{raw}`"));
    }
    let (whole, fraction) = price.trim().split_once('.').unwrap_or((price.trim(), ""));
    if !fraction.chars().all(|c| c == '0') {
        return Err(format!("price must be a whole amount in `{raw}`"));
    }
    let digits: String = whole.chars().filter(|c| !matches!(c, ',' | '_')).collect();
    let price = digits.parse::<u64>().map_err(|_| format!("invalid price in `{raw}`"))?;
    Ok((uid.to_string(), price))
}

/// Parse pre-split tokens into a command.
///
/// # Errors
/// Returns the clap error, already formatted for display.
pub fn parse(tokens: &[String]) -> Result<ShellCommand, clap::Error> {
    ShellLine::try_parse_from(tokens).map(|line| line.command)
}
