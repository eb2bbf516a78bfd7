//! Resolved code locations and the line/function resolver interface.

use crate::symbol::Function;

/// A source position for a program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineEntry {
    pub file: String,
    pub line: u32,
    pub function: Function,
}

/// Maps program counters to source positions.
///
/// Implemented by whatever owns the debug information; the debugger core
/// only consumes it.
pub trait LineResolver {
    /// Resolves `pc` to a file, line and enclosing function.
    fn pc_to_line(&self, pc: u64) -> Option<LineEntry>;

    /// Returns the function containing `pc`.
    fn function_at(&self, pc: u64) -> Option<&Function>;
}

/// A resolved control-flow target or instruction address.
///
/// `file`, `line` and `function` are absent when the address falls outside
/// known program text; `pc` is always populated.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub pc: u64,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub function: Option<Function>,
}

impl Location {
    /// A location carrying only an address.
    pub fn from_pc(pc: u64) -> Self {
        Self {
            pc,
            file: None,
            line: None,
            function: None,
        }
    }

    /// Resolves `pc` through `resolver`, falling back to the bare address.
    pub fn resolve(pc: u64, resolver: &dyn LineResolver) -> Self {
        match resolver.pc_to_line(pc) {
            Some(entry) => Self {
                pc,
                file: Some(entry.file),
                line: Some(entry.line),
                function: Some(entry.function),
            },
            None => Self::from_pc(pc),
        }
    }

    /// Returns true if the location resolved to a known function.
    pub fn is_resolved(&self) -> bool {
        self.function.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::FunctionTable;

    #[test]
    fn test_resolve_known_and_unknown() {
        let mut table = FunctionTable::new();
        table
            .insert(Function::new("runtime.morestack", 0x4000, 0x4100), "asm.s", vec![(0x4000, 12)])
            .unwrap();

        let known = Location::resolve(0x4008, &table);
        assert!(known.is_resolved());
        assert_eq!(known.line, Some(12));
        assert_eq!(known.file.as_deref(), Some("asm.s"));

        let unknown = Location::resolve(0x2000, &table);
        assert_eq!(unknown, Location::from_pc(0x2000));
        assert!(!unknown.is_resolved());
    }
}
