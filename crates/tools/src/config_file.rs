//! TOML file holding a dungeon configuration for the command-line tools.

use roomgraph::DungeonConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DungeonConfigFile {
    pub format_version: u32,
    #[serde(default)]
    pub dungeon: DungeonConfig,
}

impl DungeonConfigFile {
    pub fn new(dungeon: DungeonConfig) -> Self {
        Self { format_version: FORMAT_VERSION, dungeon }
    }

    pub fn write_atomic(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        let text = toml::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(&tmp_path, text)?;
        fs::rename(&tmp_path, path)?;
        Ok(())
    }

    pub fn load(path: &Path) -> io::Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: Self = toml::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if file.format_version != FORMAT_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported config format version {}", file.format_version),
            ));
        }
        Ok(file)
    }
}
