//! Command handlers for the inventory CLI.

pub mod ask;
pub mod console;
pub mod demo;
pub mod stock;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use console::ConsoleCommand;
pub use demo::DemoCommand;
pub use stock::StockCommand;
