//! monoseq - dependency-safe ordering of monorepo projects
//!
//! This crate builds a project graph from a workspace config and the
//! projects' package.json manifests, orders any subset of that graph so
//! every project comes after the projects it depends on, and drives
//! scripts and local package publishing over the resulting order.

pub mod config;
pub mod export;
pub mod graph;
pub mod order;
pub mod parser;
pub mod runner;
