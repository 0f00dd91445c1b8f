use semimap_core::{schema::Model, stmt::CommunicationEntity};

use std::fmt::Debug;

/// Callbacks fired around every write issued by the template.
///
/// The order for one write is `pre_persist`, `pre_entity`, the driver call,
/// `post_entity`, then `post_persist` with the object read back from the
/// stored entity.
pub trait EventHooks: Debug + Send + Sync + 'static {
    fn pre_persist(&self, model: &dyn Model) {
        let _ = model;
    }

    fn pre_entity(&self, entity: &CommunicationEntity) {
        let _ = entity;
    }

    fn post_entity(&self, entity: &CommunicationEntity) {
        let _ = entity;
    }

    fn post_persist(&self, model: &dyn Model) {
        let _ = model;
    }
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventHooks for NoEvents {}
