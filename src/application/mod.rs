//! Application layer: services and the adapters between the quote form and
//! the calculator.

pub mod forms;
pub mod presentation;
pub mod services;
