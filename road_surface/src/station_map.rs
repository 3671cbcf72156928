//! Ordered map keyed by station, used for every piecewise-by-`s` record.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Entries sorted by their start station. Lookups select the entry with the
/// greatest key not exceeding the query and saturate to the first entry.
#[derive(Debug, Clone, PartialEq)]
pub struct StationMap<T> {
    entries: Vec<(f64, T)>,
}

impl<T> Default for StationMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> StationMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` at station `s`, replacing an entry with the same key.
    pub fn insert(&mut self, s: f64, value: T) {
        let idx = self.entries.partition_point(|(k, _)| *k < s);
        match self.entries.get_mut(idx) {
            Some(entry) if entry.0 == s => entry.1 = value,
            _ => self.entries.insert(idx, (s, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry with the greatest key `<= s`, or of the first entry
    /// when every key is greater than `s`.
    pub fn floor_index(&self, s: f64) -> Option<usize> {
        if self.entries.is_empty() {
            return None;
        }
        let above = self.entries.partition_point(|(k, _)| *k <= s);
        Some(above.saturating_sub(1))
    }

    /// Entry selected by [`StationMap::floor_index`].
    pub fn floor(&self, s: f64) -> Option<(f64, &T)> {
        self.floor_index(s).and_then(|i| self.entry(i))
    }

    pub fn entry(&self, index: usize) -> Option<(f64, &T)> {
        self.entries.get(index).map(|(k, v)| (*k, v))
    }

    /// Entry following `index`, if any.
    pub fn next(&self, index: usize) -> Option<(f64, &T)> {
        self.entry(index + 1)
    }

    /// Exact key lookup.
    pub fn get(&self, s: f64) -> Option<&T> {
        let idx = self.entries.partition_point(|(k, _)| *k < s);
        self.entries
            .get(idx)
            .filter(|(k, _)| *k == s)
            .map(|(_, v)| v)
    }

    pub fn first(&self) -> Option<(f64, &T)> {
        self.entry(0)
    }

    pub fn last(&self) -> Option<(f64, &T)> {
        self.entries.last().map(|(k, v)| (*k, v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &T)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.entries.iter_mut().map(|(_, v)| v)
    }
}

impl<T> From<Vec<(f64, T)>> for StationMap<T> {
    fn from(entries: Vec<(f64, T)>) -> Self {
        let mut map = Self::new();
        for (s, v) in entries {
            map.insert(s, v);
        }
        map
    }
}

impl<T> FromIterator<(f64, T)> for StationMap<T> {
    fn from_iter<I: IntoIterator<Item = (f64, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (s, v) in iter {
            map.insert(s, v);
        }
        map
    }
}

impl<T: Serialize> Serialize for StationMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for StationMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<(f64, T)>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StationMap<&'static str> {
        StationMap::from(vec![(10.0, "b"), (0.0, "a"), (20.0, "c")])
    }

    #[test]
    fn floor_selects_greatest_key_not_above() {
        let map = sample();
        assert_eq!(map.floor(0.0), Some((0.0, &"a")));
        assert_eq!(map.floor(9.999), Some((0.0, &"a")));
        assert_eq!(map.floor(10.0), Some((10.0, &"b")));
        assert_eq!(map.floor(1e9), Some((20.0, &"c")));
    }

    #[test]
    fn floor_saturates_to_first() {
        let map = sample();
        assert_eq!(map.floor(-5.0), Some((0.0, &"a")));
        assert_eq!(StationMap::<u8>::new().floor(1.0), None);
    }

    #[test]
    fn insert_replaces_equal_key() {
        let mut map = sample();
        map.insert(10.0, "B");
        assert_eq!(map.len(), 3);
        assert_eq!(map.get(10.0), Some(&"B"));
        assert_eq!(map.get(10.5), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec![0.0, 10.0, 20.0]);
    }

    #[test]
    fn next_follows_floor() {
        let map = sample();
        let idx = map.floor_index(12.0).unwrap();
        assert_eq!(map.next(idx), Some((20.0, &"c")));
        assert_eq!(map.next(2), None);
    }

    #[test]
    fn deserialize_sorts_entries() {
        let map: StationMap<i32> = serde_json::from_str("[[5.0, 2], [1.0, 1]]").unwrap();
        assert_eq!(map.first(), Some((1.0, &1)));
        assert_eq!(map.last(), Some((5.0, &2)));
    }
}
