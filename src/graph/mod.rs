//! Graph module for package co-usage modeling.
//!
//! This module provides the [`UsageGraph`] struct, which links declared
//! packages that are used in the same source files. It backs the
//! `dependencyGraph` section of an analysis report.
//!
//! # Example
//!
//! ```rust
//! use usagescope::graph::UsageGraph;
//!
//! let mut graph = UsageGraph::new();
//! graph.add_package("react");
//! graph.add_package("react-dom");
//! graph.record_file(&["react", "react-dom"]);
//!
//! assert_eq!(graph.node_count(), 2);
//! assert_eq!(graph.edge_count(), 1);
//! ```

mod usage_graph;

pub use usage_graph::UsageGraph;
