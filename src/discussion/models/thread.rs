use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ReplyCategory;

/// One reply's contribution to a thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadEntry {
    pub cdate: i64,
    pub writer: String,
    pub content: String,
}

/// A discussion thread anchored at a top-level reply to the submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    /// Root reply id. Serialized as the key of the enclosing map.
    #[serde(skip)]
    pub id: String,
    pub cdate: i64,
    #[serde(rename = "type")]
    pub kind: ReplyCategory,
    pub content: Vec<ThreadEntry>,
}

/// Threads of one submission in chronological order of their roots.
///
/// Serialized as a JSON object keyed by root id; key order is the thread order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Threads(Vec<Thread>);

impl Threads {
    pub fn iter(&self) -> std::slice::Iter<'_, Thread> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Thread rooted at reply `id`.
    pub fn get(&self, id: &str) -> Option<&Thread> {
        self.0.iter().find(|t| t.id == id)
    }

    /// Total number of entries across all threads.
    pub fn entry_count(&self) -> usize {
        self.0.iter().map(|t| t.content.len()).sum()
    }
}

impl From<Vec<Thread>> for Threads {
    fn from(threads: Vec<Thread>) -> Self {
        Self(threads)
    }
}

impl<'a> IntoIterator for &'a Threads {
    type Item = &'a Thread;
    type IntoIter = std::slice::Iter<'a, Thread>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Threads {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for thread in &self.0 {
            map.serialize_entry(&thread.id, thread)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Threads {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ThreadsVisitor;

        impl<'de> Visitor<'de> for ThreadsVisitor {
            type Value = Threads;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of thread id to thread")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Threads, A::Error> {
                let mut threads = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, mut thread)) = access.next_entry::<String, Thread>()? {
                    thread.id = id;
                    threads.push(thread);
                }
                Ok(Threads(threads))
            }
        }

        deserializer.deserialize_map(ThreadsVisitor)
    }
}
