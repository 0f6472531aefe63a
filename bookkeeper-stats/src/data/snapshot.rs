use crate::common::{Identifier, Kind, Scope};
use crate::data::OpStatsSnapshot;

/// A point-in-time value for a single instrument.
#[derive(Clone, Debug, PartialEq)]
pub enum MetricValue {
    /// Counter value.
    Counter(i64),
    /// Gauge value, or `None` if no sampler is bound or the sampler failed.
    Gauge(Option<i64>),
    /// Operation stats.
    OpStats(OpStatsSnapshot),
}

impl MetricValue {
    /// Gets the kind of instrument this value was read from.
    pub fn kind(&self) -> Kind {
        match self {
            MetricValue::Counter(_) => Kind::Counter,
            MetricValue::Gauge(_) => Kind::Gauge,
            MetricValue::OpStats(_) => Kind::OpStats,
        }
    }
}

/// A single bound instrument, as seen by an exporter.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricEntry {
    scope: Scope,
    name: String,
    value: MetricValue,
}

impl MetricEntry {
    pub(crate) fn new(id: Identifier, value: MetricValue) -> Self {
        let (scope, name) = id.into_parts();
        Self { scope, name, value }
    }

    /// Scope the instrument is registered under.
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Leaf name of the instrument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Flattened, fully-scoped name of the instrument.
    pub fn scoped_name(&self) -> String {
        self.scope.scoped_name(&self.name)
    }

    /// Kind of the instrument.
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Value of the instrument at the time of the snapshot.
    pub fn value(&self) -> &MetricValue {
        &self.value
    }
}

/// A collection of point-in-time metric values.
#[derive(Clone, Default, Debug)]
pub struct Snapshot {
    entries: Vec<MetricEntry>,
}

impl Snapshot {
    pub(crate) fn new(mut entries: Vec<MetricEntry>) -> Self {
        entries.sort_by(|a, b| (&a.scope, &a.name).cmp(&(&b.scope, &b.name)));
        Self { entries }
    }

    /// Number of entries in this snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether or not the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the entries, ordered by scope and then name.
    pub fn iter(&self) -> impl Iterator<Item = &MetricEntry> {
        self.entries.iter()
    }

    /// Finds the entry for the given fully-scoped name.
    ///
    /// Leaf names may contain `.` themselves, so distinct entries can flatten to the same name: the
    /// one that sorts first is returned.  Use [`get_in`](Snapshot::get_in) for an exact match.
    pub fn get(&self, scoped_name: &str) -> Option<&MetricEntry> {
        self.entries.iter().find(|e| e.scoped_name() == scoped_name)
    }

    /// Finds the entry for the given scope and leaf name.
    pub fn get_in(&self, scope: &Scope, name: &str) -> Option<&MetricEntry> {
        self.entries
            .binary_search_by(|e| (&e.scope, e.name.as_str()).cmp(&(scope, name)))
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Converts a [`Snapshot`] into the underlying entries.
    pub fn into_entries(self) -> Vec<MetricEntry> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::{MetricEntry, MetricValue, Snapshot};
    use crate::common::{Identifier, Scope};

    #[test]
    fn test_get_in_tells_apart_names_that_flatten_alike() {
        let client = Scope::Root.add_part("bookkeeper_client");
        let nested = client.clone().add_part("LEDGER_ENSEMBLE_BOOKIE_DISTRIBUTION-10");
        let snapshot = Snapshot::new(vec![
            MetricEntry::new(
                Identifier::new(client.clone(), "LEDGER_ENSEMBLE_BOOKIE_DISTRIBUTION-10.0"),
                MetricValue::Counter(1),
            ),
            MetricEntry::new(Identifier::new(nested.clone(), "0"), MetricValue::Counter(2)),
        ]);

        let flat = "bookkeeper_client.LEDGER_ENSEMBLE_BOOKIE_DISTRIBUTION-10.0";
        assert_eq!(snapshot.iter().filter(|e| e.scoped_name() == flat).count(), 2);

        let leaf = snapshot.get_in(&client, "LEDGER_ENSEMBLE_BOOKIE_DISTRIBUTION-10.0").unwrap();
        assert_eq!(leaf.value(), &MetricValue::Counter(1));
        let scoped = snapshot.get_in(&nested, "0").unwrap();
        assert_eq!(scoped.value(), &MetricValue::Counter(2));

        assert!(snapshot.get_in(&client, "0").is_none());
        assert!(snapshot.get_in(&Scope::Root, flat).is_none());
    }
}
