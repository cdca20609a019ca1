use clap::Parser;
use hotel_desk::app::seed;
use hotel_desk::config::toml_config::LogFormat;
use hotel_desk::utils::{logger, validation::Validate};
use hotel_desk::{CliConfig, Console, HotelService};

fn main() {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file is valid TOML or remove it to use defaults");
            std::process::exit(e.exit_code());
        }
    };

    // 初始化日誌
    match config.logging.format {
        LogFormat::Json => logger::init_json_logger(cli.verbose),
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
    }

    tracing::info!("Starting hotel-desk");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }

    let storage = config.storage.open();

    if cli.seed {
        match seed::seed_if_empty(&storage) {
            Ok(true) => println!("✓ Sample rooms and guests created"),
            Ok(false) => {}
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(e.exit_code());
            }
        }
    }

    let service = match HotelService::open(&config.hotel.name, storage, config.billing.tax_rate) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("❌ Failed to load hotel data: {} ({:?})", e, e.kind());
            eprintln!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };
    println!("✓ Data loaded from {}", config.storage.data_dir);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::new(service, stdin.lock(), stdout.lock())
        .with_currency(config.billing.currency_symbol.clone());

    if let Err(e) = console.run() {
        tracing::error!("❌ Session ended with error: {} ({:?})", e, e.kind());
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}
