pub mod config_file;
pub mod preview;

pub use config_file::DungeonConfigFile;
pub use preview::PreviewPresenter;
