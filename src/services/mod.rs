// Core services
pub mod accounts;

pub use accounts::AccountService;
