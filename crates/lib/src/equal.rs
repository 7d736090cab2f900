//! Structural deep equality with per-kind and per-record overrides.

use std::{collections::HashMap, fmt, sync::Arc};

use crate::value::{Kind, Value};

/// Comparison hook used in place of the built-in rule for a kind or record type
pub type EqualityOverride = Arc<dyn Fn(&Value, &Value) -> bool + Send + Sync>;

/// Options for [`are_equal`].
///
/// ```
/// use dynpath::equal::{EqualityOptions, are_equal};
/// use dynpath::value::Value;
///
/// let options = EqualityOptions::new().with_float_tolerance(1e-6);
/// assert!(are_equal(&Value::Float(0.1 + 0.2), &Value::Float(0.3), Some(&options)));
/// assert!(!are_equal(&Value::Float(0.1 + 0.2), &Value::Float(0.3), None));
/// ```
#[derive(Clone, Default)]
pub struct EqualityOptions {
    float_tolerance: Option<f64>,
    kind_overrides: HashMap<Kind, EqualityOverride>,
    record_overrides: HashMap<String, EqualityOverride>,
}

impl EqualityOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Floats compare equal when `|left - right| <= tolerance`
    pub fn with_float_tolerance(mut self, tolerance: f64) -> Self {
        self.float_tolerance = Some(tolerance);
        self
    }

    /// Compares every pair of values of `kind` with `compare`.
    ///
    /// The override only runs when both sides have that kind.
    pub fn with_kind_override<F>(mut self, kind: Kind, compare: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.kind_overrides.insert(kind, Arc::new(compare));
        self
    }

    /// Compares records named `type_name` with `compare`. Takes precedence over a
    /// [`Kind::Record`] override.
    pub fn with_record_override<F>(mut self, type_name: impl Into<String>, compare: F) -> Self
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.record_overrides.insert(type_name.into(), Arc::new(compare));
        self
    }

    fn override_for(&self, left: &Value, right: &Value) -> Option<&EqualityOverride> {
        if let (Value::Record(l), Value::Record(r)) = (left, right) {
            if l.name() == r.name() {
                if let Some(compare) = self.record_overrides.get(l.name()) {
                    return Some(compare);
                }
            }
        }
        let kind = left.kind();
        if kind != right.kind() {
            return None;
        }
        self.kind_overrides.get(&kind)
    }
}

impl fmt::Debug for EqualityOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EqualityOptions")
            .field("float_tolerance", &self.float_tolerance)
            .field("kind_overrides", &self.kind_overrides.keys().collect::<Vec<_>>())
            .field("record_overrides", &self.record_overrides.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Compares two values structurally.
///
/// References are followed on both sides, so a reference equals the value it points to and two
/// nil references equal each other and null. Maps compare as sets of entries, ignoring order.
/// Lists compare element-wise and must agree on being fixed-length or growable. Records must
/// share a name and have equal fields, hidden ones included. Ints and floats never compare equal
/// to each other.
pub fn are_equal(left: &Value, right: &Value, options: Option<&EqualityOptions>) -> bool {
    let default = EqualityOptions::default();
    equal(left, right, options.unwrap_or(&default))
}

fn equal(left: &Value, right: &Value, options: &EqualityOptions) -> bool {
    let (left, right) = (left.deref_value(), right.deref_value());
    if let Some(compare) = options.override_for(left, right) {
        return compare(left, right);
    }

    match (left, right) {
        (l, r) if l.is_absent() && r.is_absent() => true,
        (Value::Bool(l), Value::Bool(r)) => l == r,
        (Value::Int(l), Value::Int(r)) => l == r,
        (Value::Float(l), Value::Float(r)) => match options.float_tolerance {
            Some(tolerance) => (l - r).abs() <= tolerance,
            None => l == r,
        },
        (Value::Text(l), Value::Text(r)) => l == r,
        (Value::List(l), Value::List(r)) => {
            l.can_grow() == r.can_grow()
                && l.len() == r.len()
                && l.iter().zip(r.iter()).all(|(a, b)| equal(a, b, options))
        }
        (Value::Map(l), Value::Map(r)) => {
            l.len() == r.len()
                && l.iter()
                    .all(|(key, a)| r.get(key).is_some_and(|b| equal(a, b, options)))
        }
        (Value::Record(l), Value::Record(r)) => {
            l.name() == r.name()
                && l.len() == r.len()
                && l.fields().zip(r.fields()).all(|(a, b)| {
                    a.name == b.name && a.exported == b.exported && equal(&a.value, &b.value, options)
                })
        }
        _ => false,
    }
}
