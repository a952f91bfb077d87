//! Publish capability for named output scalars.

use std::collections::BTreeMap;

/// Receives the signal catalogue once per tick.
pub trait SignalSink {
    fn publish(&mut self, name: &str, value: f64);
}

impl<F> SignalSink for F
where
    F: FnMut(&str, f64),
{
    fn publish(&mut self, name: &str, value: f64) {
        self(name, value)
    }
}

/// Collects published signals in name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSink {
    values: BTreeMap<String, f64>,
}

impl MapSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, f64> {
        self.values
    }
}

impl SignalSink for MapSink {
    fn publish(&mut self, name: &str, value: f64) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
        } else {
            self.values.insert(name.to_owned(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_sink_overwrites_by_name() {
        let mut sink = MapSink::new();
        sink.publish("Rumble.A", 0.2);
        sink.publish("Rumble.A", 0.4);
        sink.publish("Rumble.B", 1.0);
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.get("Rumble.A"), Some(0.4));
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |name: &str, value: f64| seen.push((name.to_owned(), value));
            sink.publish("X", 1.0);
        }
        assert_eq!(seen, vec![("X".to_owned(), 1.0)]);
    }
}
