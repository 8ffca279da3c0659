pub mod forecast;
pub mod ledger;
pub mod stats;
pub mod transaction;
