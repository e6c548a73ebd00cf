//! Ready-made epistemic scenarios and the `epistemic` command-line driver.

pub mod demos;
pub mod error;
pub mod wise_men;

pub use demos::{Demo, DemoReport};
pub use error::ScenarioError;
pub use wise_men::{does_not_know, hat_world, Step, UpdateMode, WiseMen};
