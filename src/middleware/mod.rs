//! Access-control gates for protected routes.
//!
//! Two independent gates compose in fixed order: the business-day gate
//! runs first, then the token gate. The ordering is part of the API
//! contract — an out-of-hours request is rejected before its token is
//! even looked at.

pub mod business_day;
pub mod token_gate;

pub use business_day::business_day_gate;
pub use token_gate::token_gate;
