use crate::adapters::JsonFileStorage;
use crate::adapters::json_file::{BOOKINGS_FILE, GUESTS_FILE, ROOMS_FILE};
use crate::core::hotel::DEFAULT_TAX_RATE;
use crate::utils::error::{HotelError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelConfig {
    pub hotel: HotelSection,
    pub storage: StorageConfig,
    pub billing: BillingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelSection {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub rooms_file: String,
    pub guests_file: String,
    pub bookings_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub tax_rate: f64,
    pub currency_symbol: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Default for HotelSection {
    fn default() -> Self {
        Self {
            name: "Luxury Hotel".to_string(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".to_string(),
            rooms_file: ROOMS_FILE.to_string(),
            guests_file: GUESTS_FILE.to_string(),
            bookings_file: BOOKINGS_FILE.to_string(),
        }
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            currency_symbol: "$".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn rooms_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.rooms_file)
    }

    pub fn guests_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.guests_file)
    }

    pub fn bookings_path(&self) -> PathBuf {
        Path::new(&self.data_dir).join(&self.bookings_file)
    }

    pub fn open(&self) -> JsonFileStorage {
        JsonFileStorage::with_paths(self.rooms_path(), self.guests_path(), self.bookings_path())
    }
}

impl HotelConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| HotelError::ConfigError {
            message: format!("Cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 檔案不存在時使用預設值
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(
                "Config file {} not found, using defaults",
                path.as_ref().display()
            );
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HotelError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOTEL_DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HotelError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("hotel.name", &self.hotel.name)?;

        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_file_name("storage.rooms_file", &self.storage.rooms_file)?;
        validation::validate_file_name("storage.guests_file", &self.storage.guests_file)?;
        validation::validate_file_name("storage.bookings_file", &self.storage.bookings_file)?;

        let files = [
            &self.storage.rooms_file,
            &self.storage.guests_file,
            &self.storage.bookings_file,
        ];
        for (i, a) in files.iter().enumerate() {
            if files[i + 1..].contains(a) {
                return Err(HotelError::InvalidConfigValueError {
                    field: "storage".to_string(),
                    value: a.to_string(),
                    reason: "Each collection needs its own file".to_string(),
                });
            }
        }

        validation::validate_range("billing.tax_rate", self.billing.tax_rate, 0.0, 1.0)?;

        Ok(())
    }
}

impl Validate for HotelConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
