pub mod auth_commands;
pub mod code_commands;
pub mod ledger_commands;
pub mod loan_commands;
pub mod reward_commands;
pub mod store_commands;
