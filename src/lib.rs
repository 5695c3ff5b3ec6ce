#![allow(dead_code)]

pub mod board;
pub mod cli;
pub mod levels;
pub mod render;
pub mod solver;

pub mod utils {
    pub mod prelude {
        pub use anyhow::{anyhow, Context, Error};
        pub type Result<T> = anyhow::Result<T, Error>;

        pub use std::{
            collections::{BTreeSet, HashMap, HashSet},
            time::Duration,
        };
    }
}

pub mod prelude {
    pub use super::board::*;
    pub use super::solver::*;
    pub use super::utils::prelude::*;
}
