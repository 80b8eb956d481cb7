//! Compute module - The ICA engine and its operators.
//!
//! Each iteration runs, in order: assimilation, revolution, leadership
//! exchange, imperialistic competition (with collapse) and unification.

mod assimilation;
mod competition;
mod engine;
mod error;
mod init;
mod objective;
mod population;
mod revolution;
mod unification;

pub use assimilation::*;
pub use competition::*;
pub use engine::*;
pub use error::*;
pub use init::*;
pub use objective::*;
pub use population::*;
pub use revolution::*;
pub use unification::*;
