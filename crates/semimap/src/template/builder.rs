use super::{Shared, Template};
use crate::{Config, EntityConverter, EventHooks, NoEvents};

use semimap_core::{driver::Driver, schema::EntitiesMetadata, stmt::QueryParser, Error, Result};

use std::sync::Arc;

/// Collects the template's collaborators. The driver and the registry are
/// required.
#[derive(Default)]
pub struct Builder {
    driver: Option<Arc<dyn Driver>>,
    registry: Option<Arc<dyn EntitiesMetadata>>,
    config: Config,
    events: Option<Arc<dyn EventHooks>>,
    parser: Option<Arc<dyn QueryParser>>,
}

impl Builder {
    pub fn driver(&mut self, driver: impl Driver) -> &mut Self {
        self.driver = Some(Arc::new(driver));
        self
    }

    pub fn shared_driver(&mut self, driver: Arc<dyn Driver>) -> &mut Self {
        self.driver = Some(driver);
        self
    }

    pub fn registry(&mut self, registry: impl EntitiesMetadata) -> &mut Self {
        self.registry = Some(Arc::new(registry));
        self
    }

    pub fn shared_registry(&mut self, registry: Arc<dyn EntitiesMetadata>) -> &mut Self {
        self.registry = Some(registry);
        self
    }

    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    pub fn events(&mut self, events: impl EventHooks) -> &mut Self {
        self.events = Some(Arc::new(events));
        self
    }

    /// Parser used by [`Template::query`].
    pub fn parser(&mut self, parser: impl QueryParser) -> &mut Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    pub fn build(&self) -> Result<Template> {
        let driver = self.driver.clone().ok_or_else(|| Error::null_argument("driver"))?;
        let registry = self
            .registry
            .clone()
            .ok_or_else(|| Error::null_argument("registry"))?;

        Ok(Template {
            shared: Arc::new(Shared {
                driver,
                converter: EntityConverter::new(registry),
                config: self.config.clone(),
                events: self.events.clone().unwrap_or_else(|| Arc::new(NoEvents)),
                parser: self.parser.clone(),
            }),
        })
    }
}

impl std::fmt::Debug for Builder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builder")
            .field("driver", &self.driver)
            .field("registry", &self.registry.is_some())
            .field("config", &self.config)
            .finish()
    }
}
