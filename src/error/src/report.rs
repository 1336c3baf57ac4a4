//! Diagnostic reporting for errors that must never abort the simulation.

use std::fmt::Display;

/// A caller broke an operation's precondition (missing level, missing owner).
pub fn contract(component: &str, operation: &str, detail: impl Display) {
    tracing::warn!(component, operation, "contract violated: {}", detail);
}

/// Internal state no longer matches what an operation promised.
pub fn invariant(component: &str, operation: &str, detail: impl Display) {
    tracing::error!(component, operation, "invariant violated: {}", detail);
}
