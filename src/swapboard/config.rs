use crate::error::{MarketError, Result};
use crate::model::Profile;
use crate::search::DEFAULT_MAX_PRICE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LIST_WIDTH: usize = 80;

/// The administrator account registered when a platform is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdminSeed {
    pub username: String,
    pub password: String,
    pub email: String,
    pub phone: String,
    pub student_id: String,
    pub real_name: String,
    pub college: String,
}

impl Default for AdminSeed {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
            email: "admin@nju.edu.cn".to_string(),
            phone: "13921590994".to_string(),
            student_id: "231240015".to_string(),
            real_name: "System Administrator".to_string(),
            college: "Kuang Yaming Honors College".to_string(),
        }
    }
}

impl AdminSeed {
    pub fn profile(&self) -> Profile {
        Profile::new(&self.username, &self.password, &self.email)
            .with_phone(&self.phone)
            .with_student_id(&self.student_id)
            .with_real_name(&self.real_name)
            .with_college(&self.college)
    }
}

/// Configuration for swapboard, stored as config.json in the config directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketConfig {
    #[serde(default)]
    pub admin: AdminSeed,

    /// Upper price bound applied when a search gives none
    #[serde(default = "default_max_price")]
    pub max_price: f64,

    /// Column budget for one line of an item list
    #[serde(default = "default_list_width")]
    pub list_width: usize,
}

fn default_max_price() -> f64 {
    DEFAULT_MAX_PRICE
}

fn default_list_width() -> usize {
    DEFAULT_LIST_WIDTH
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            admin: AdminSeed::default(),
            max_price: DEFAULT_MAX_PRICE,
            list_width: DEFAULT_LIST_WIDTH,
        }
    }
}

impl MarketConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(MarketError::Io)?;
        let config: MarketConfig =
            serde_json::from_str(&content).map_err(MarketError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(MarketError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(MarketError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(MarketError::Io)?;
        Ok(())
    }
}
