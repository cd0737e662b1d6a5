//! e-SparX Graph Layering
//!
//! This crate lays out artifact and pipeline dependency graphs into levels.
//! It includes:
//!
//! - **Names**: Opaque node identifiers ([`NodeName`])
//! - **Dependency maps**: Insertion-ordered predecessor lists ([`DependencyMap`])
//! - **Layering**: The cycle-tolerant topological sort ([`layer`]) and its
//!   result ([`Layering`])
//!
//! # Example
//!
//! ```
//! use esparx_layering::{DependencyMap, layer};
//!
//! let map: DependencyMap = [
//!     ("raw", vec![]),
//!     ("clean", vec!["raw"]),
//!     ("model", vec!["clean", "raw"]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let layering = layer(&map);
//! assert_eq!(layering.order(), ["raw", "clean", "model"]);
//! assert_eq!(layering.level("model"), Some(2));
//! ```

mod dependency_map;
mod layering;
mod node;

pub use dependency_map::DependencyMap;
pub use layering::{Layering, layer};
pub use node::{Level, NodeName};
