//! Read capability over named telemetry channels.

use std::collections::HashMap;

use tracing::trace;

use crate::sample::Wheels;

/// Named-scalar lookup provided by the host.
///
/// Implementations must be non-blocking and must not fail: a channel that the
/// active simulator does not expose, or whose value is not numeric, reads as
/// `None`.
pub trait TelemetrySource {
    /// Numeric value of `name`, if the channel resolves to a number.
    fn read(&self, name: &str) -> Option<f64>;

    /// Text value of `name`, if the channel carries text.
    fn read_text(&self, _name: &str) -> Option<&str> {
        None
    }

    /// Numeric value of `name`, or `fallback` when absent or non-finite.
    fn read_or(&self, name: &str, fallback: f64) -> f64 {
        match self.read(name) {
            Some(v) if v.is_finite() => v,
            _ => fallback,
        }
    }

    /// First channel in `names` that resolves to a finite number, else `0`.
    fn read_first(&self, names: &[&str]) -> f64 {
        let hit = names
            .iter()
            .enumerate()
            .find_map(|(rank, name)| self.read(name).filter(|v| v.is_finite()).map(|v| (rank, *name, v)));
        match hit {
            Some((0, _, value)) => value,
            Some((_, channel, value)) => {
                trace!(channel, "Using fallback channel");
                value
            }
            None => 0.0,
        }
    }

    /// One channel per wheel, each falling back to `0`.
    fn read_wheels(&self, names: &Wheels<&str>) -> Wheels<f64> {
        names.map(|name| self.read_or(name, 0.0))
    }
}

impl<F> TelemetrySource for F
where
    F: Fn(&str) -> Option<f64>,
{
    fn read(&self, name: &str) -> Option<f64> {
        self(name)
    }
}

/// A channel value as stored by [`MapSource`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelValue {
    Number(f64),
    Text(String),
}

impl From<f64> for ChannelValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ChannelValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// In-memory source for hosts that push values and for tests.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, ChannelValue>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ChannelValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn insert_number(&mut self, name: impl Into<String>, value: f64) {
        self.insert(name, ChannelValue::Number(value));
    }

    pub fn remove(&mut self, name: &str) -> Option<ChannelValue> {
        self.values.remove(name)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl TelemetrySource for MapSource {
    fn read(&self, name: &str) -> Option<f64> {
        match self.values.get(name)? {
            ChannelValue::Number(v) => Some(*v),
            ChannelValue::Text(text) => text.trim().parse().ok(),
        }
    }

    fn read_text(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            ChannelValue::Text(text) => Some(text.as_str()),
            ChannelValue::Number(_) => None,
        }
    }
}

impl<K: Into<String>, V: Into<ChannelValue>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_channel_uses_fallback() {
        let source = MapSource::new();
        assert_eq!(source.read("Nope"), None);
        assert_eq!(source.read_or("Nope", 7.0), 7.0);
    }

    #[test]
    fn test_numeric_text_parses() {
        let source: MapSource = [("A", "  12.5 ")].into_iter().collect();
        assert_eq!(source.read("A"), Some(12.5));
        assert_eq!(source.read_text("A"), Some("  12.5 "));
    }

    #[test]
    fn test_malformed_text_falls_back() {
        let source: MapSource = [("Gear", "N")].into_iter().collect();
        assert_eq!(source.read("Gear"), None);
        assert_eq!(source.read_or("Gear", 0.0), 0.0);
    }

    #[test]
    fn test_non_finite_value_falls_back() {
        let source: MapSource = [("A", f64::NAN)].into_iter().collect();
        assert_eq!(source.read_or("A", 1.0), 1.0);
    }

    #[test]
    fn test_read_first_skips_unresolved_channels() {
        let mut source = MapSource::new();
        source.insert("B", "bogus");
        source.insert_number("C", 0.4);
        assert_eq!(source.read_first(&["A", "B", "C"]), 0.4);
        assert_eq!(source.read_first(&["A", "B"]), 0.0);
    }

    #[test]
    fn test_removed_channel_falls_through_to_next() {
        let mut source = MapSource::new();
        source.insert_number("Primary", 0.8);
        source.insert_number("Backup", 0.2);
        assert_eq!(source.read_first(&["Primary", "Backup"]), 0.8);

        assert_eq!(source.remove("Primary"), Some(ChannelValue::Number(0.8)));
        assert_eq!(source.remove("Primary"), None);
        assert_eq!(source.read_first(&["Primary", "Backup"]), 0.2);

        source.clear();
        assert!(source.is_empty());
        assert_eq!(source.read_first(&["Primary", "Backup"]), 0.0);
    }

    #[test]
    fn test_closure_source() {
        let source = |name: &str| (name == "Speed").then_some(88.0);
        assert_eq!(source.read_or("Speed", 0.0), 88.0);
        assert_eq!(source.read_or("Rpm", 1.0), 1.0);
    }
}
