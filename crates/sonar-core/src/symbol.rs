//! Function symbols and a simple PC-to-line table.

use crate::location::{LineEntry, LineResolver};
use crate::Error;

/// A function known to the debugger, covering `[entry, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    /// Symbol name (may be mangled).
    pub name: String,
    /// Address of the first instruction.
    pub entry: u64,
    /// Address one past the last instruction.
    pub end: u64,
}

impl Function {
    /// Creates a new function covering `[entry, end)`.
    pub fn new(name: impl Into<String>, entry: u64, end: u64) -> Self {
        Self {
            name: name.into(),
            entry,
            end,
        }
    }

    /// Returns true if `pc` falls inside this function.
    pub fn contains(&self, pc: u64) -> bool {
        pc >= self.entry && pc < self.end
    }

    /// Size of the function in bytes; zero when `end` precedes `entry`.
    pub fn size(&self) -> u64 {
        self.end.saturating_sub(self.entry)
    }
}

#[derive(Debug, Clone)]
struct FunctionRecord {
    function: Function,
    file: String,
    /// `(pc, line)` pairs sorted by pc; each line runs until the next pc.
    lines: Vec<(u64, u32)>,
}

/// An in-memory function table with per-function line information.
///
/// Functions are kept sorted by entry address and may not overlap.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    records: Vec<FunctionRecord>,
}

impl FunctionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a function defined in `file`, with `(pc, line)` rows for its body.
    pub fn insert(
        &mut self,
        function: Function,
        file: impl Into<String>,
        mut lines: Vec<(u64, u32)>,
    ) -> Result<(), Error> {
        if function.end <= function.entry {
            return Err(Error::EmptyFunction {
                name: function.name,
                entry: function.entry,
            });
        }
        if let Some(other) = self
            .records
            .iter()
            .find(|r| r.function.entry < function.end && function.entry < r.function.end)
        {
            return Err(Error::OverlappingFunction {
                name: function.name,
                other: other.function.name.clone(),
            });
        }

        lines.retain(|&(pc, _)| function.contains(pc));
        lines.sort_by_key(|&(pc, _)| pc);

        let at = self
            .records
            .partition_point(|r| r.function.entry < function.entry);
        self.records.insert(
            at,
            FunctionRecord {
                function,
                file: file.into(),
                lines,
            },
        );
        Ok(())
    }

    /// Number of functions in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table holds no functions.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over functions in address order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.records.iter().map(|r| &r.function)
    }

    fn record_at(&self, pc: u64) -> Option<&FunctionRecord> {
        let idx = self.records.partition_point(|r| r.function.entry <= pc);
        let record = self.records.get(idx.checked_sub(1)?)?;
        record.function.contains(pc).then_some(record)
    }
}

impl LineResolver for FunctionTable {
    fn pc_to_line(&self, pc: u64) -> Option<LineEntry> {
        let record = self.record_at(pc)?;
        let idx = record.lines.partition_point(|&(start, _)| start <= pc);
        let line = idx
            .checked_sub(1)
            .and_then(|i| record.lines.get(i))
            .map(|&(_, line)| line)
            .unwrap_or(0);
        Some(LineEntry {
            file: record.file.clone(),
            line,
            function: record.function.clone(),
        })
    }

    fn function_at(&self, pc: u64) -> Option<&Function> {
        self.record_at(pc).map(|r| &r.function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> FunctionTable {
        let mut table = FunctionTable::new();
        table
            .insert(
                Function::new("main.main", 0x1000, 0x1040),
                "main.go",
                vec![(0x1010, 8), (0x1000, 7), (0x1030, 9), (0x2000, 99)],
            )
            .unwrap();
        table
            .insert(Function::new("main.helper", 0x0800, 0x0900), "helper.go", vec![])
            .unwrap();
        table
    }

    #[test]
    fn test_lookup() {
        let table = table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.functions().next().unwrap().name, "main.helper");

        let entry = table.pc_to_line(0x1014).unwrap();
        assert_eq!(entry.file, "main.go");
        assert_eq!(entry.line, 8);
        assert_eq!(entry.function.name, "main.main");
        assert_eq!(table.pc_to_line(0x103c).unwrap().line, 9);

        // No line rows: the function is still known.
        assert_eq!(table.pc_to_line(0x0804).unwrap().line, 0);
    }

    #[test]
    fn test_lookup_outside_text() {
        let table = table();
        assert!(table.pc_to_line(0x1040).is_none());
        assert!(table.pc_to_line(0x0400).is_none());
        assert!(table.function_at(0x0a00).is_none());
    }

    #[test]
    fn test_function_size() {
        assert_eq!(Function::new("main.f", 0x1000, 0x1100).size(), 0x100);
        assert_eq!(Function::new("main.empty", 0x1000, 0x1000).size(), 0);
        let inverted = Function::new("main.bad", 0x2000, 0x1000);
        assert_eq!(inverted.size(), 0);
        assert!(!inverted.contains(0x1800));
    }

    #[test]
    fn test_insert_rejects_bad_ranges() {
        let mut table = table();
        assert!(matches!(
            table.insert(Function::new("overlap", 0x1020, 0x1100), "x.go", vec![]),
            Err(Error::OverlappingFunction { .. })
        ));
        assert!(matches!(
            table.insert(Function::new("empty", 0x3000, 0x3000), "x.go", vec![]),
            Err(Error::EmptyFunction { .. })
        ));
    }
}
