//! Constraint filtering and the directed trade graph (C1–C2).

pub mod constraint;
pub mod trade_graph;
