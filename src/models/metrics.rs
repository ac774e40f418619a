use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Filler word tallies in vocabulary scan order.
///
/// Only non-zero counts are ever stored. Serializes as a JSON object whose
/// key order follows insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillerCounts {
    entries: Vec<(String, u32)>,
}

impl FillerCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of `filler`; zero counts are ignored
    pub fn add(&mut self, filler: &str, count: u32) {
        if count == 0 {
            return;
        }
        match self.entries.iter_mut().find(|(f, _)| f == filler) {
            Some((_, existing)) => *existing += count,
            None => self.entries.push((filler.to_string(), count)),
        }
    }

    /// Count for a filler, 0 if never seen
    pub fn get(&self, filler: &str) -> u32 {
        self.entries
            .iter()
            .find(|(f, _)| f == filler)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(f, c)| (f.as_str(), *c))
    }

    /// Sum of all filler occurrences
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Number of distinct fillers seen
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FillerCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (filler, count) in &self.entries {
            map.serialize_entry(filler, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FillerCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FillerCountsVisitor;

        impl<'de> Visitor<'de> for FillerCountsVisitor {
            type Value = FillerCounts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of filler words to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut counts = FillerCounts::new();
                while let Some((filler, count)) = access.next_entry::<String, u32>()? {
                    counts.add(&filler, count);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(FillerCountsVisitor)
    }
}

/// Deterministic metrics derived from the transcript
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    /// Speaking pace in words per minute
    #[serde(rename = "pace")]
    pub pace_wpm: u32,
    /// Filler words and their counts
    #[serde(rename = "fillerWords")]
    pub filler_counts: FillerCounts,
    /// Whitespace-delimited word count
    #[serde(rename = "wordCount", default)]
    pub word_count: u32,
}
