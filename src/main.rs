use {
    anyhow::{Context, Result},
    clap::Parser,
    std::panic,
    stock_lens::{
        ANALYSIS, Cli,
        app::{OptimizeArgs, ServeArgs, qualify_symbol, run_optimize, run_seasonality, run_serve},
        Command,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    init_log();

    let args = Cli::parse();
    let settings = args.optimizer_settings();

    match args.command.clone().unwrap_or(Command::Serve) {
        Command::Serve => {
            run_serve(ServeArgs {
                db_path: args.db,
                bind: args.bind,
                port: args.port,
                settings,
            })
            .await
        }
        Command::Optimize {
            symbols,
            seed,
            start,
            end,
        } => {
            let range = &ANALYSIS.ema_range;
            let start = start
                .or_else(|| range.start_date())
                .context("No start date")?;
            let end = end.or_else(|| range.end_date()).context("No end date")?;

            run_optimize(OptimizeArgs {
                symbols: symbols.iter().map(|s| qualify_symbol(s)).collect(),
                settings,
                seed,
                start,
                end,
            })
            .await
        }
        Command::Seasonality { symbol } => run_seasonality(&qualify_symbol(&symbol)).await,
    }
}

/// `RUST_LOG` still wins over these defaults.
fn init_log() {
    let (global_level, my_code_level) = if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    env_logger::Builder::new()
        .filter(None, global_level)
        .filter(Some("stock_lens"), my_code_level)
        .parse_default_env()
        .init();
}
