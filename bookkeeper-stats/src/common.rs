use std::fmt;

/// A scope, or namespace, for a metric.
///
/// Two loggers with equal scopes resolve to the same underlying instruments, while identical leaf
/// names under different scopes never collide.
///
/// See also: [StatsLogger::scoped](crate::StatsLogger::scoped).
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord)]
pub enum Scope {
    /// Root scope.
    Root,

    /// A nested scope, with arbitrarily deep nesting.
    Nested(Vec<String>),
}

impl Scope {
    /// Adds a new part to this scope.
    pub fn add_part<S>(self, part: S) -> Self
    where
        S: Into<String>,
    {
        match self {
            Scope::Root => Scope::Nested(vec![part.into()]),
            Scope::Nested(mut parts) => {
                parts.push(part.into());
                Scope::Nested(parts)
            }
        }
    }

    /// Gets the path segments of this scope.
    pub fn parts(&self) -> &[String] {
        match self {
            Scope::Root => &[],
            Scope::Nested(parts) => parts.as_slice(),
        }
    }

    /// Joins the scope path and the given leaf name into a flat, dot-separated name.
    pub fn scoped_name(&self, name: &str) -> String {
        match self {
            Scope::Root => name.to_string(),
            Scope::Nested(parts) => {
                let mut joined = parts.join(".");
                if !name.is_empty() {
                    if !joined.is_empty() {
                        joined.push('.');
                    }
                    joined.push_str(name);
                }
                joined
            }
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scoped_name(""))
    }
}

/// Instrument kind.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum Kind {
    /// Counter type.
    Counter,
    /// Gauge type.
    Gauge,
    /// Operation stats logger type.
    OpStats,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Counter => "counter",
            Kind::Gauge => "gauge",
            Kind::OpStats => "op_stats",
        };
        f.write_str(s)
    }
}

/// Registry key: a metric name within a scope.
///
/// The kind is not part of the key: a name maps to one kind of instrument per scope.
#[derive(PartialEq, Eq, Hash, Clone, Debug, PartialOrd, Ord)]
pub struct Identifier(Scope, String);

impl Identifier {
    /// Creates a new [`Identifier`].
    pub fn new<N>(scope: Scope, name: N) -> Self
    where
        N: Into<String>,
    {
        Identifier(scope, name.into())
    }

    /// Gets the scope.
    pub fn scope(&self) -> &Scope {
        &self.0
    }

    /// Gets the leaf name.
    pub fn name(&self) -> &str {
        &self.1
    }

    /// Gets the flattened, fully-scoped name.
    pub fn scoped_name(&self) -> String {
        self.0.scoped_name(&self.1)
    }

    pub(crate) fn into_parts(self) -> (Scope, String) {
        (self.0, self.1)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scoped_name())
    }
}
