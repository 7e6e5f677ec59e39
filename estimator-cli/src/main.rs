use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use estimator_cli::app::{self, App, OutputOptions};
use estimator_cli::{config, logging, utils};
use estimator_core::{BudgetRates, BudgetSession, LineItem, MaterialRates, WallSides, WallSpec};
use estimator_data::line_items;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Material and cost estimates for construction work.
///
/// Computes wall plaster quantities and itemized budgets, and keeps a
/// history of saved estimates.
#[derive(Debug, Parser)]
#[command(name = "estimator", version)]
struct Cli {
    /// Configuration file. A missing file means built-in defaults.
    #[arg(long, global = true, default_value = "estimator.toml")]
    config: PathBuf,

    /// Storage backend (`sqlite` or `memory`). Overrides the config file.
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Storage connection string. For SQLite a file path or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Log filter, e.g. `debug` or `estimator_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Hide log output on the console.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Estimate cement, sand and labor to plaster a wall.
    Plaster(PlasterArgs),
    /// Price a list of line items with overhead, profit and tax.
    Budget(BudgetArgs),
    /// List saved estimates, newest first.
    History,
}

#[derive(Debug, Args)]
struct PlasterArgs {
    /// Wall length in metres.
    #[arg(long, value_parser = utils::parse_number)]
    length: Option<f64>,

    /// Wall height in metres.
    #[arg(long, value_parser = utils::parse_number)]
    height: Option<f64>,

    /// Sides to plaster (1 or 2).
    #[arg(long)]
    sides: Option<u8>,

    /// Plaster thickness in centimetres.
    #[arg(long, value_parser = utils::parse_number)]
    thickness: Option<f64>,

    /// Square metres covered by one bag of cement.
    #[arg(long, value_parser = utils::parse_number)]
    bag_yield: Option<f64>,

    /// Price of one bag of cement.
    #[arg(long, value_parser = utils::parse_number)]
    bag_price: Option<f64>,

    /// Labor price per square metre.
    #[arg(long, value_parser = utils::parse_number)]
    labor_price: Option<f64>,

    /// Parts of sand per part of cement.
    #[arg(long, value_parser = utils::parse_number)]
    sand_ratio: Option<f64>,

    /// Save the estimate to the history.
    #[arg(long)]
    save: bool,

    /// Write a paginated text document to this path.
    #[arg(long)]
    export: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct BudgetArgs {
    /// CSV file of line items.
    #[arg(long)]
    items: Option<PathBuf>,

    /// Line item as `description,quantity,unit,unit_price[,labor_hours]`.
    /// May be repeated.
    #[arg(long = "item", value_parser = utils::parse_line_item)]
    item: Vec<LineItem>,

    /// Labor rate per hour.
    #[arg(long, value_parser = utils::parse_number)]
    labor_rate: Option<f64>,

    /// Overhead percentage.
    #[arg(long, value_parser = utils::parse_number)]
    overhead: Option<f64>,

    /// Profit percentage.
    #[arg(long, value_parser = utils::parse_number)]
    profit: Option<f64>,

    /// Tax percentage, charged on subtotal plus overhead and profit.
    #[arg(long, value_parser = utils::parse_number)]
    tax: Option<f64>,

    /// Client or job label used for the document title and history.
    #[arg(long, default_value = "Budget")]
    client: String,

    /// Save the budget to the history.
    #[arg(long)]
    save: bool,

    /// Write a paginated text document to this path.
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write the line items as CSV to this path.
    #[arg(long)]
    export_csv: Option<PathBuf>,
}

impl PlasterArgs {
    fn wall(
        &self,
        base: WallSpec,
    ) -> anyhow::Result<WallSpec> {
        let sides = match self.sides {
            Some(count) => WallSides::try_from(count)?,
            None => base.sides,
        };
        Ok(WallSpec {
            length: self.length.unwrap_or(base.length),
            height: self.height.unwrap_or(base.height),
            sides,
            thickness_cm: self.thickness.unwrap_or(base.thickness_cm),
        })
    }

    fn rates(
        &self,
        base: MaterialRates,
    ) -> MaterialRates {
        MaterialRates {
            bag_yield_m2: self.bag_yield.unwrap_or(base.bag_yield_m2),
            bag_price: self.bag_price.unwrap_or(base.bag_price),
            labor_price_per_m2: self.labor_price.unwrap_or(base.labor_price_per_m2),
            sand_ratio: self.sand_ratio.unwrap_or(base.sand_ratio),
        }
    }
}

impl BudgetArgs {
    fn rates(
        &self,
        base: BudgetRates,
    ) -> BudgetRates {
        BudgetRates {
            labor_rate: self.labor_rate.unwrap_or(base.labor_rate),
            overhead_pct: self.overhead.unwrap_or(base.overhead_pct),
            profit_pct: self.profit.unwrap_or(base.profit_pct),
            tax_pct: self.tax.unwrap_or(base.tax_pct),
        }
    }

    fn session(
        &self,
        base: BudgetRates,
    ) -> anyhow::Result<BudgetSession> {
        let mut session = BudgetSession::new(self.rates(base))?;
        if let Some(path) = &self.items {
            let items = line_items::load_from_file(path)
                .with_context(|| format!("Failed to load line items from {}", path.display()))?;
            for item in items {
                session.add_item(item)?;
            }
        }
        for item in &self.item {
            session.add_item(item.clone())?;
        }
        Ok(session)
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_default_logging();
    if let Some(level) = &cli.log_level {
        logging::set_log_level(level)?;
    }
    if cli.quiet {
        logging::set_console_enabled(false)?;
    }
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let loaded = config::load(&cli.config);
    let mut db_config = loaded.config.db_config();
    if let Some(backend) = &cli.backend {
        db_config.backend = backend.clone();
    }
    if let Some(db) = &cli.db {
        db_config.connection_string = db.clone();
    }

    let app = if loaded.persistence_enabled {
        App::connect(&app::build_registry(), &db_config).await
    } else {
        debug!("persistence disabled by configuration");
        App::without_persistence()
    };

    let mut out = io::stdout();
    match &cli.command {
        Command::Plaster(args) => {
            let wall = args.wall(loaded.config.plaster.wall)?;
            let rates = args.rates(loaded.config.plaster.rates);
            let options = OutputOptions {
                save: args.save,
                export: args.export.clone(),
            };
            app.run_plaster(&wall, &rates, &options, &mut out).await
        }
        Command::Budget(args) => {
            let mut session = args.session(loaded.config.budget)?;
            let options = OutputOptions {
                save: args.save,
                export: args.export.clone(),
            };
            app.run_budget(
                &mut session,
                &args.client,
                &options,
                args.export_csv.as_ref(),
                &mut out,
            )
            .await
        }
        Command::History => app.run_history(&mut out).await,
    }
}
