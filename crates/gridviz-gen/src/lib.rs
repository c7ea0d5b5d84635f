//! Layout generators for the grid visualiser.
//!
//! Provides two generators operating in place on a
//! [`GridGraph`](gridviz_core::GridGraph):
//! - **Recursive division maze**: walls with single gaps, recursively
//!   partitioning the interior ([`LayoutGen::maze`]).
//! - **Random scatter**: per-cell uniform blocks and dense terrain
//!   ([`LayoutGen::random_layout`]).

mod mapgen;

pub use mapgen::LayoutGen;
