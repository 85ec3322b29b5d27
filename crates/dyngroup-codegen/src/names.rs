//! Deterministic identifier generation
//!
//! Every node instance and generated output variable gets its name here,
//! so names are globally unique within one serialization run and the same
//! selection always produces the same program.

use std::collections::HashSet;

/// Allocates unique, sanitized identifiers.
#[derive(Debug, Default)]
pub struct NameAllocator {
    used: HashSet<String>,
}

impl NameAllocator {
    /// Create an empty allocator
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitize a raw name: lower-case, whitespace runs collapse to one
    /// underscore, everything outside `[a-z0-9_]` is dropped. A name that
    /// sanitizes to nothing becomes `node`.
    pub fn sanitize(raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        let mut pending_sep = false;
        for ch in raw.trim().chars() {
            if ch.is_whitespace() {
                pending_sep = !out.is_empty();
                continue;
            }
            let ch = ch.to_ascii_lowercase();
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
                if pending_sep {
                    out.push('_');
                    pending_sep = false;
                }
                out.push(ch);
            }
        }
        if out.is_empty() {
            "node".to_string()
        } else {
            out
        }
    }

    /// Allocate a unique name derived from `raw`, disambiguating collisions
    /// with `_1`, `_2`, ... in first-seen order.
    pub fn allocate(&mut self, raw: &str) -> String {
        let base = Self::sanitize(raw);
        let mut name = base.clone();
        let mut counter = 0;
        while self.used.contains(&name) {
            counter += 1;
            name = format!("{base}_{counter}");
        }
        self.used.insert(name.clone());
        name
    }
}
