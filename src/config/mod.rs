pub mod toml_config;

pub use toml_config::HotelConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hotel-desk")]
#[command(about = "Console front desk for rooms, guests and bookings")]
pub struct CliConfig {
    /// Path to TOML configuration file (optional)
    #[arg(short, long, default_value = "hotel.toml")]
    pub config: String,

    /// Directory holding rooms.json, guests.json and bookings.json
    #[arg(long)]
    pub data_dir: Option<String>,

    /// Override the tax rate applied on invoices (0.0 - 1.0)
    #[arg(long)]
    pub tax_rate: Option<f64>,

    /// Write sample rooms and guests when the data files do not exist yet
    #[arg(long)]
    pub seed: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the config file and applies command-line overrides on top.
    pub fn resolve(&self) -> crate::utils::error::Result<HotelConfig> {
        let mut config = HotelConfig::from_file_or_default(&self.config)?;

        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
            tracing::debug!("Data directory overridden to: {}", dir);
        }
        if let Some(rate) = self.tax_rate {
            config.billing.tax_rate = rate;
            tracing::debug!("Tax rate overridden to: {}", rate);
        }

        Ok(config)
    }
}
