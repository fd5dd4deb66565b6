//! Fluent builder for constructing a [`Pipeline`].

use ua_tables::DirectorySource;
use ua_zones::ZoneAssigner;

use crate::{Pipeline, PipelineConfig, PipelineResult};

/// Fluent builder for [`Pipeline`].
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                                         |
/// |-------------------------|-------------------------------------------------|
/// | `.directory_source(s)`  | HTTP client for `directory.base_url` (`http`)   |
///
/// # Example
///
/// ```rust,ignore
/// let config = PipelineConfig::load(Path::new("usim2asim.toml"))?;
/// let pipeline = PipelineBuilder::new(config).build()?;
/// let summary = pipeline.run(&mut LoggingObserver::new())?;
/// ```
pub struct PipelineBuilder {
    config:    PipelineConfig,
    directory: Option<Box<dyn DirectorySource>>,
}

impl PipelineBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config, directory: None }
    }

    /// Serve schools and colleges from `source` instead of the HTTP API.
    ///
    /// Ignored when `directory.enabled` is false.
    pub fn directory_source(mut self, source: impl DirectorySource + 'static) -> Self {
        self.directory = Some(Box::new(source));
        self
    }

    /// Validate the configuration and return a ready-to-run [`Pipeline`].
    ///
    /// Fails if directory fetching is enabled, no source was supplied and
    /// the crate was built without the `http` feature.
    pub fn build(self) -> PipelineResult<Pipeline> {
        self.config.validate()?;
        let assigner = ZoneAssigner::new(self.config.assignment)?;

        let directory = if !self.config.directory.enabled {
            None
        } else {
            match self.directory {
                Some(source) => Some(source),
                None => Some(default_directory(&self.config)?),
            }
        };

        Ok(Pipeline { config: self.config, assigner, directory })
    }
}

#[cfg(feature = "http")]
fn default_directory(config: &PipelineConfig) -> PipelineResult<Box<dyn DirectorySource>> {
    Ok(Box::new(ua_tables::UrbanInstituteClient::new(config.directory.base_url.clone())))
}

#[cfg(not(feature = "http"))]
fn default_directory(_config: &PipelineConfig) -> PipelineResult<Box<dyn DirectorySource>> {
    Err(crate::PipelineError::Config(
        "directory fetching is enabled but this build has no HTTP client; \
         set [directory] enabled = false"
            .into(),
    ))
}
