use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{self, DEFAULT_PROFILE, Overrides, Settings, list_profile_names, parse_shock};
use crate::context::DashboardContext;
use crate::dashboard;
use crate::error::Result;
use crate::logging::{self, LogTarget};
use crate::report::{ImpactReport, ParamsReport, write_json};

#[derive(Debug, Parser)]
#[command(
    name = "shocksim",
    about = "National Kcal supply forecast dashboard and supply shock scenario simulator",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Defaults to `dashboard`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Processed CSV table (overrides the profile's data_path).
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Built-in profile to start from.
    #[arg(long, global = true, default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// key=value file layered over the profile.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Refit the shock coefficient from the training columns.
    #[arg(long, global = true)]
    pub refit: bool,

    /// tracing filter directive, e.g. `shocksim=debug`.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_filter: Option<String>,

    /// Write logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalArgs {
    fn default() -> Self {
        Self {
            data: None,
            profile: DEFAULT_PROFILE.to_string(),
            config: None,
            refit: false,
            log_filter: None,
            log_file: None,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the interactive terminal dashboard.
    Dashboard(DashboardArgs),

    /// Evaluate one shock scenario and print the result.
    Impact(ImpactArgs),

    /// Print the model parameter cards.
    Params(ParamsArgs),

    /// Print built-in profile names.
    #[command(name = "list-profiles")]
    ListProfiles,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DashboardArgs {
    /// Initial slider position in percent, e.g. `-7.5`.
    #[arg(long, allow_hyphen_values = true, value_name = "PCT")]
    pub shock: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct ImpactArgs {
    /// Shock percentage in [-20, 20], snapped to the 0.5 grid.
    #[arg(long, allow_hyphen_values = true, value_name = "PCT")]
    pub shock: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ParamsArgs {
    #[arg(long)]
    pub json: bool,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let command = cli
        .command
        .unwrap_or(Commands::Dashboard(DashboardArgs::default()));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::ListProfiles => print_profiles(&mut out),
        Commands::Dashboard(args) => {
            let mut overrides = overrides_from(&cli.global);
            if let Some(raw) = &args.shock {
                overrides.initial_shock = Some(parse_shock(raw)?.value());
            }
            let settings = prepare(&cli.global, &overrides, true)?;
            let context = DashboardContext::load(&settings)?;
            drop(out);
            dashboard::run(context)
        }
        Commands::Impact(args) => {
            let shock = parse_shock(&args.shock)?;
            let settings = prepare(&cli.global, &overrides_from(&cli.global), false)?;
            let context = DashboardContext::load(&settings)?;
            let report = ImpactReport::new(context.params(), shock);
            tracing::debug!(
                message = "impact.evaluated",
                shock_pct = report.shock_pct,
                deviation = report.deviation
            );
            if args.json {
                write_json(&report, &mut out)
            } else {
                report.write_text(&mut out)
            }
        }
        Commands::Params(args) => {
            let settings = prepare(&cli.global, &overrides_from(&cli.global), false)?;
            let context = DashboardContext::load(&settings)?;
            let report = ParamsReport::new(&context);
            if args.json {
                write_json(&report, &mut out)
            } else {
                report.write_text(&mut out)
            }
        }
    }
}

pub fn print_profiles(out: &mut impl Write) -> Result<()> {
    for name in list_profile_names() {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn overrides_from(global: &GlobalArgs) -> Overrides {
    Overrides {
        data_path: global.data.clone(),
        refit: global.refit,
        initial_shock: None,
        log_filter: global.log_filter.clone(),
        log_file: global.log_file.clone(),
    }
}

/// Resolve settings and start logging. The dashboard owns the terminal, so
/// it only logs when a file is configured.
fn prepare(global: &GlobalArgs, overrides: &Overrides, owns_terminal: bool) -> Result<Settings> {
    let settings = config::resolve(&global.profile, global.config.as_deref(), overrides)?;
    let env_filter = std::env::var(logging::LOG_ENV).ok();
    let filter = logging::select_filter(
        global.log_filter.as_deref(),
        env_filter.as_deref(),
        &settings.log_filter,
    );
    logging::init(
        filter,
        LogTarget::for_run(settings.log_file.as_deref(), owns_terminal),
    )?;
    tracing::debug!(
        message = "settings.resolved",
        profile = %settings.profile,
        data_path = %settings.data_path.display(),
        coefficient = %settings.coefficient
    );
    Ok(settings)
}
