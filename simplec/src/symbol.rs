use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Line,
    Variable,
    Constant,
}

/// `key` is the line number, the variable's character code or the constant's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub kind: Kind,
    pub key: i32,
    pub location: u16,
}

impl Entry {
    pub fn line(number: i32, location: u16) -> Self {
        Entry {
            kind: Kind::Line,
            key: number,
            location,
        }
    }

    pub fn variable(name: char, location: u16) -> Self {
        Entry {
            kind: Kind::Variable,
            key: name as i32,
            location,
        }
    }

    pub fn constant(value: i32, location: u16) -> Self {
        Entry {
            kind: Kind::Constant,
            key: value,
            location,
        }
    }
}

// (kind, key) -> location
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable(IndexMap<(Kind, i32), u16>);

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable(IndexMap::new())
    }

    /// Entries never move once placed; a second `Line` with the same number is refused.
    pub fn put(&mut self, entry: Entry) -> Result<(), Error> {
        let id = (entry.kind, entry.key);
        if self.0.contains_key(&id) {
            return Err(match entry.kind {
                Kind::Line => Error::DuplicateLine(entry.key),
                _ => Error::MalformedStatement(format!(
                    "symbol {:?} {} already placed",
                    entry.kind, entry.key
                )),
            });
        }
        self.0.insert(id, entry.location);
        Ok(())
    }

    pub fn get(&self, kind: Kind, key: i32) -> Option<Entry> {
        self.0.get(&(kind, key)).map(|&location| Entry {
            kind,
            key,
            location,
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.0.iter().map(|(&(kind, key), &location)| Entry {
            kind,
            key,
            location,
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.entries().collect::<Vec<_>>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let mut table = SymbolTable::new();
        table.put(Entry::line(10, 0)).unwrap();
        table.put(Entry::variable('A', 999)).unwrap();
        table.put(Entry::constant(65, 998)).unwrap();

        assert_eq!(table.get(Kind::Line, 10), Some(Entry::line(10, 0)));
        assert_eq!(table.get(Kind::Line, 20), None);
        // 'A' and 65 share a key but not a kind
        assert_eq!(table.get(Kind::Variable, 65).map(|e| e.location), Some(999));
        assert_eq!(table.get(Kind::Constant, 65).map(|e| e.location), Some(998));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_duplicate_line() {
        let mut table = SymbolTable::new();
        table.put(Entry::line(10, 0)).unwrap();
        assert_eq!(table.put(Entry::line(10, 4)), Err(Error::DuplicateLine(10)));
        assert_eq!(table.get(Kind::Line, 10).map(|e| e.location), Some(0));
    }

    #[test]
    fn test_yaml() {
        let mut table = SymbolTable::new();
        table.put(Entry::line(10, 0)).unwrap();
        table.put(Entry::variable('x', 999)).unwrap();
        let yaml = table.to_yaml().unwrap();
        let back: Vec<Entry> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, vec![Entry::line(10, 0), Entry::variable('x', 999)]);
    }
}
