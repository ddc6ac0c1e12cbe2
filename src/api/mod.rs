//! HTTP API module for the salary engine.
//!
//! This module provides the REST API endpoints for computing net salary
//! breakdowns, gross-salary sweeps and regional surtax lookups.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{MAX_SWEEP_ROWS, create_router};
pub use request::{CalculationRequest, SalaryInputRequest, SurtaxQuery, SweepRequest};
pub use response::{ApiError, CalculationResponse, SurtaxResponse, SweepResponse};
pub use state::AppState;
