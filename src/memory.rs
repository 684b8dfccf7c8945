//! # memory.rs
//!
//! The single-value memory register (`MS`, `MR`, `M+`, `M-`, `MC`).

use serde::{Deserialize, Serialize};

use crate::format::format_number;

/// Memory register holding one value, zero when empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    value: f64,
}

impl Memory {
    /// `MS`: replaces the register with `value`.
    pub fn store(&mut self, value: f64) {
        self.value = value;
    }

    /// `MR`: the stored value (zero when cleared).
    pub fn recall(&self) -> f64 {
        self.value
    }

    /// `M+`
    pub fn add(&mut self, value: f64) {
        self.value += value;
    }

    /// `M-`
    pub fn subtract(&mut self, value: f64) {
        self.value -= value;
    }

    /// `MC`: resets the register to zero.
    pub fn clear(&mut self) {
        self.value = 0.0;
    }

    /// True when the register holds a non-zero value.
    pub fn is_set(&self) -> bool {
        self.value != 0.0
    }

    /// Text of the memory indicator: `M: <value>`, or empty when the register is zero.
    pub fn indicator(&self) -> String {
        if self.is_set() {
            format!("M: {}", format_number(self.value))
        } else {
            String::new()
        }
    }
}
