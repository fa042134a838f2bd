mod common;
pub use self::common::*;
mod error;
pub use self::error::{Error, Result};
pub mod graph;
pub use self::graph::LinkGraph;
mod rank;
pub use self::rank::RankTable;

pub mod corpus;
pub mod page_rank;
pub use self::page_rank::{iterate_rank, sample_rank};

#[cfg(test)]
mod testing;
