use crate::map::MapConfig;
use crate::renderer::RenderConfig;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Config {
    pub map: MapConfig,
    pub render: RenderConfig,
}

impl Config {
    pub fn read_file(path: &str) -> Result<Self, ron::Error> {
        let reader = std::fs::File::open(path)?;

        ron::de::from_reader(reader)
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ron::Error> {
        ron::de::from_str(s)
    }
}
