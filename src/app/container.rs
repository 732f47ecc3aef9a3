use std::sync::Arc;

use crate::adapters::{
    FfmpegEncodeAdapter, JsonCatalogAdapter, TomlConfigAdapter, TracingLogAdapter,
};
use crate::app::{library_interactor::LibraryInteractor, trim_interactor::TrimInteractor};
use crate::domain::errors::TrimResult;
use crate::ports::{CatalogPort, ConfigPort, EncodePort, LogPort};

pub trait AppContainer: Send + Sync {
    fn trim_interactor(&self) -> Arc<TrimInteractor>;
    fn library_interactor(&self) -> Arc<LibraryInteractor>;
    fn encode_port(&self) -> Arc<dyn EncodePort>;
    fn config_port(&self) -> Arc<dyn ConfigPort>;
}

pub struct DefaultAppContainer {
    trim_interactor: Arc<TrimInteractor>,
    library_interactor: Arc<LibraryInteractor>,
    encode_port: Arc<dyn EncodePort>,
    config_port: Arc<dyn ConfigPort>,
}

impl DefaultAppContainer {
    /// Wire the production adapters. An existing `clipcut.toml` next to
    /// the working directory overrides the built-in defaults.
    pub async fn new() -> TrimResult<Self> {
        let config = Arc::new(TomlConfigAdapter::new());
        let config_path = TomlConfigAdapter::default_config_path();
        if config_path.exists() {
            config
                .load_file(&config_path.to_string_lossy())
                .await?;
        }

        let media_dir = config.get_or_default("media_dir", "clips").await?;
        let thumbnail_dir = config.get_or_default("thumbnail_dir", "thumbnails").await?;
        let catalog_path = config.get_or_default("catalog_path", "catalog.json").await?;
        let overwrite = config.get_or_default("overwrite_policy", "always").await? != "never";

        let encode_port: Arc<dyn EncodePort> = Arc::new(
            FfmpegEncodeAdapter::new(media_dir, thumbnail_dir).overwrite(overwrite),
        );
        let catalog_port: Arc<dyn CatalogPort> = Arc::new(JsonCatalogAdapter::new(catalog_path));
        let log_port: Arc<dyn LogPort> = Arc::new(TracingLogAdapter::new());
        let config_port: Arc<dyn ConfigPort> = config;

        let trim_interactor = Arc::new(TrimInteractor::new(
            Arc::clone(&encode_port),
            Arc::clone(&catalog_port),
            Arc::clone(&config_port),
            Arc::clone(&log_port),
        ));

        let library_interactor = Arc::new(LibraryInteractor::new(
            Arc::clone(&catalog_port),
            Arc::clone(&log_port),
        ));

        Ok(Self {
            trim_interactor,
            library_interactor,
            encode_port,
            config_port,
        })
    }
}

impl AppContainer for DefaultAppContainer {
    fn trim_interactor(&self) -> Arc<TrimInteractor> {
        Arc::clone(&self.trim_interactor)
    }

    fn library_interactor(&self) -> Arc<LibraryInteractor> {
        Arc::clone(&self.library_interactor)
    }

    fn encode_port(&self) -> Arc<dyn EncodePort> {
        Arc::clone(&self.encode_port)
    }

    fn config_port(&self) -> Arc<dyn ConfigPort> {
        Arc::clone(&self.config_port)
    }
}
