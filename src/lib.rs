#![allow(dead_code)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(unused_mut)]

pub mod history;
pub mod predictor;
pub mod trace;
pub mod stats;
pub mod branch;
pub mod config;

pub use branch::*;
pub use trace::*;
pub use history::*;
pub use predictor::*;
pub use config::*;


