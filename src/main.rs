use clap::Parser;
use library_ledger::core::Clock;
use library_ledger::utils::error::{ErrorSeverity, LibraryError};
use library_ledger::utils::logger;
use library_ledger::{CliConfig, FixedClock, Library, Session, Settings, SystemClock};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_format);

    tracing::info!("Starting library-ledger");
    tracing::debug!("CLI config: {:?}", config);

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Configuration failed: {} (Category: {:?})", e, e.category());
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Hint: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    };

    if config.print_config {
        print!("{}", settings.to_toml_string()?);
        return Ok(());
    }

    let result = match settings.today {
        Some(today) => {
            tracing::info!("Clock pinned to {}", today);
            run(settings, FixedClock(today))
        }
        None => run(settings, SystemClock),
    };

    if let Err(e) = result {
        tracing::error!(
            "Session ended abnormally: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

fn run<C: Clock>(settings: Settings, clock: C) -> Result<(), LibraryError> {
    let mut library = Library::new(settings.policy, clock);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(&mut library, stdin.lock(), stdout.lock()).run()
}

fn exit_code(e: &LibraryError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
