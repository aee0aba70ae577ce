//! NCF inference adapter
//!
//! Sits in front of a neural collaborative filtering model server:
//! - validates and forwards a batch inference request unmodified
//! - decodes the one-hot item feature of every instance into an item id
//! - pairs the returned scores with those ids and ranks them by score

pub mod config;
pub mod context;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

pub use config::Config;
pub use context::InvocationContext;
pub use error::{AppError, Result};
pub use handlers::AdapterState;
pub use services::{handle, HttpModelServer, InvocationOutput, ModelServer, RankedPrediction};
