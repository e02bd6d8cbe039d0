//! Route tree.
//!
//! ```text
//! /                                 liveness banner
//! /health                           service and database health
//!
//! /diseases                         list (GET), create (POST)
//! /diseases/bulk                    bulk create (POST)
//! /diseases/plant/{plantType}       exact plant-type lookup (GET)
//! /diseases/search                  substring search (GET)
//! ```

pub mod disease;
pub mod health;
