//! Architecture-neutral view of a thread's registers.

use std::fmt;

use crate::error::RegisterError;

/// A register name and value, as listed by [`Registers::slice`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedRegister {
    pub name: String,
    pub value: u64,
}

impl NamedRegister {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Register state of one thread at a point in time.
pub trait Registers: fmt::Debug {
    /// Program counter.
    fn pc(&self) -> u64;

    /// Stack pointer.
    fn sp(&self) -> u64;

    /// Frame pointer.
    fn bp(&self) -> u64;

    /// Thread-local storage base, 0 where the architecture keeps none.
    fn tls(&self) -> u64;

    /// Address of the current goroutine, when a register holds it.
    fn g_addr(&self) -> Option<u64>;

    /// The `n`th general-purpose register.
    fn get(&self, n: usize) -> Result<u64, RegisterError>;

    /// Lists every register by name. Floating-point registers are loaded on
    /// first request and appended only when `floating_point` is set.
    fn slice(&mut self, floating_point: bool) -> Result<Vec<NamedRegister>, RegisterError>;

    /// Returns a snapshot that later reads or writes do not affect.
    fn copy(&mut self) -> Result<Box<dyn Registers>, RegisterError>;
}
