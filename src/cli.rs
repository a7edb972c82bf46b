//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::TradewatchError;
use crate::domain::query::{self, SignalFilter, TradeFilter, TradeQuery};
use crate::logging::{init_logging, LogSettings};
use crate::ports::config_port::ConfigPort;
use crate::ports::trade_port::TradePort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

#[derive(Parser, Debug)]
#[command(
    name = "tradewatch",
    about = "Tag disclosed trades with technical signals"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Ticker symbol, case-insensitive
    #[arg(long)]
    pub ticker: Option<String>,
    /// Filer party, case-insensitive
    #[arg(long)]
    pub party: Option<String>,
    /// Purchase or Sale
    #[arg(long)]
    pub transaction: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> TradeFilter {
        TradeFilter::from_params(
            self.ticker.as_deref(),
            self.party.as_deref(),
            self.transaction.as_deref(),
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List trades with their channel tags
    List {
        #[arg(short, long)]
        config: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// List trades that have indicator data, optionally narrowed by signal
    Signals {
        #[arg(short, long)]
        config: PathBuf,
        #[command(flatten)]
        filter: FilterArgs,
        /// RSI-14 above 55 and a positive MACD histogram
        #[arg(long)]
        bullish_only: bool,
        /// Donchian channel breakouts and breakdowns only
        #[arg(long)]
        donchian_breakouts_only: bool,
    },
    /// Show a single trade by id
    Show {
        #[arg(short, long)]
        config: PathBuf,
        id: u64,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let config_path = match &cli.command {
        Command::List { config, .. }
        | Command::Signals { config, .. }
        | Command::Show { config, .. }
        | Command::Serve { config } => config.clone(),
    };

    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let log_settings = match LogSettings::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    init_logging(&log_settings);
    info!(config = %config_path.display(), "loaded config");

    let result = match cli.command {
        Command::List { filter, .. } => {
            run_query(&config, &TradeQuery::listing(filter.to_filter()))
        }
        Command::Signals {
            filter,
            bullish_only,
            donchian_breakouts_only,
            ..
        } => {
            let signals = SignalFilter {
                bullish_only,
                donchian_breakouts_only,
            };
            run_query(&config, &TradeQuery::signals(filter.to_filter(), signals))
        }
        Command::Show { id, .. } => run_show(&config, id),
        Command::Serve { .. } => run_serve(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            (&e).into()
        }
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, TradewatchError> {
    FileConfigAdapter::from_file(path).map_err(|e| TradewatchError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn build_listen_addr(config: &dyn ConfigPort) -> Result<SocketAddr, TradewatchError> {
    let raw = config
        .get_string("web", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    raw.parse().map_err(|_| TradewatchError::ConfigInvalid {
        section: "web".into(),
        key: "listen".into(),
        reason: format!("'{raw}' is not a socket address"),
    })
}

/// Run a query against the source and render the result as pretty JSON.
pub fn render_query(port: &dyn TradePort, query: &TradeQuery) -> Result<String, TradewatchError> {
    let records = port.load_trades()?;
    let trades = query::filter(&records, query);
    info!(total = records.len(), matched = trades.len(), "query complete");
    Ok(serde_json::to_string_pretty(&trades)?)
}

/// Render one trade as pretty JSON, or `TradeNotFound`.
pub fn render_trade(port: &dyn TradePort, id: u64) -> Result<String, TradewatchError> {
    let records = port.load_trades()?;
    let trade = query::find_by_id(&records, id).ok_or(TradewatchError::TradeNotFound { id })?;
    Ok(serde_json::to_string_pretty(&trade)?)
}

fn run_query(config: &dyn ConfigPort, query: &TradeQuery) -> Result<(), TradewatchError> {
    let port = CsvAdapter::from_config(config)?;
    println!("{}", render_query(&port, query)?);
    Ok(())
}

fn run_show(config: &dyn ConfigPort, id: u64) -> Result<(), TradewatchError> {
    let port = CsvAdapter::from_config(config)?;
    println!("{}", render_trade(&port, id)?);
    Ok(())
}

fn run_serve(config: &dyn ConfigPort) -> Result<(), TradewatchError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState};
        use std::sync::Arc;

        let port = CsvAdapter::from_config(config)?;
        let addr = build_listen_addr(config)?;

        let state = AppState {
            trades: Arc::new(port),
        };
        let router = build_router(state);

        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!(%addr, "web server listening");
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;
            info!("web server stopped");
            Ok::<(), TradewatchError>(())
        })
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config;
        Err(TradewatchError::ConfigInvalid {
            section: "web".into(),
            key: "listen".into(),
            reason: "built without the web feature".into(),
        })
    }
}

#[cfg(feature = "web")]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
