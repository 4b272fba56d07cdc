//! Cross-crate tests: a full audit pass over an in-memory capture channel and
//! interface resolution against a fixed set of host interfaces.

#[cfg(test)]
mod audit;
#[cfg(test)]
mod interface;
