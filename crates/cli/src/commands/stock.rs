//! Stock command handler.
//!
//! One-shot get/set/show against a freshly ingested store. Updates live only
//! for the duration of the command.

use crate::form;
use crate::render::{self, Feedback};
use crate::session;
use clap::{Args, Subcommand};
use inventory_core::{config::AppConfig, AppResult};
use inventory_stock::StockStore;

/// Read or change stock quantities
#[derive(Args, Debug)]
pub struct StockCommand {
    #[command(subcommand)]
    pub action: StockAction,
}

#[derive(Subcommand, Debug)]
pub enum StockAction {
    /// Show the stock of a product
    Get {
        /// Unique Entry ID of the product
        id: String,
    },

    /// Set the stock of a product (every row with the ID)
    Set {
        /// Unique Entry ID of the product
        id: String,

        /// New quantity (integer)
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },

    /// Print the first rows of the inventory
    Show {
        /// Number of rows to print
        #[arg(short = 'n', long, default_value_t = 5)]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl StockCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stock command");
        tracing::debug!("Stock command options: {:?}", self);

        let mut store = session::open_store(config);

        match &self.action {
            StockAction::Get { id } => println!("{}", check_stock(&store, id)),
            StockAction::Set { id, quantity } => {
                println!("{}", update_stock(&mut store, id, quantity))
            }
            StockAction::Show { limit, json } => show(&store, *limit, *json)?,
        }

        Ok(())
    }
}

/// Validate the ID and look it up.
pub fn check_stock(store: &StockStore, raw_id: &str) -> Feedback {
    match form::product_id(raw_id) {
        Ok(id) => Feedback::lookup(id, &store.get_quantity(id)),
        Err(e) => Feedback::invalid(&e),
    }
}

/// Validate both fields and apply the update.
pub fn update_stock(store: &mut StockStore, raw_id: &str, raw_quantity: &str) -> Feedback {
    match form::stock_update(raw_id, raw_quantity) {
        Ok((id, quantity)) => Feedback::update(id, quantity, &store.set_quantity(id, quantity)),
        Err(e) => Feedback::invalid(&e),
    }
}

/// Print the head of the record set, or a warning when nothing was loaded.
pub fn show(store: &StockStore, limit: usize, json: bool) -> AppResult<()> {
    let Some(records) = store.snapshot() else {
        println!(
            "{}",
            Feedback::Warning("Inventory is not loaded; nothing to show.".to_string())
        );
        return Ok(());
    };

    if json {
        let output = serde_json::to_string_pretty(&render::records_json(records, limit))?;
        println!("{}", output);
    } else {
        println!("{}", render::table(records, limit));
    }

    Ok(())
}
