use std::sync::Arc;

use crate::{data::Snapshot, registry::MetricRegistry};

/// Handle for acquiring snapshots.
///
/// Exporters poll a `Controller` on their own schedule; nothing is ever pushed to them from the
/// recording path.
#[derive(Clone, Debug)]
pub struct Controller {
    registry: Arc<MetricRegistry>,
}

impl Controller {
    pub(crate) fn new(registry: Arc<MetricRegistry>) -> Controller {
        Controller { registry }
    }

    /// Provide a snapshot of every bound instrument.
    pub fn snapshot(&self) -> Snapshot {
        self.registry.snapshot()
    }
}
