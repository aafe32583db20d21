//! Test helpers shared across server modules.
