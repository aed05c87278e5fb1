//! Demo command handler.
//!
//! Scripted walk-through: one question through the bridge, one stock update
//! read back, then the head of the inventory.

use crate::commands::stock::{check_stock, show, update_stock};
use crate::render::Feedback;
use crate::session;
use clap::Args;
use inventory_core::{config::AppConfig, AppResult};

pub const DEMO_QUESTION: &str = "What is the price of the black 3D glasses?";
pub const DEMO_PRODUCT_ID: &str = "FNxEraBTeWRiCvtFu";
pub const DEMO_QUANTITY: i64 = 45;

/// Run the scripted demo
#[derive(Args, Debug)]
pub struct DemoCommand {
    /// Skip the question step (no API key needed)
    #[arg(long)]
    pub no_ask: bool,

    /// Question asked in the first step
    #[arg(long, default_value = DEMO_QUESTION)]
    pub question: String,

    /// Product updated in the second step
    #[arg(long, default_value = DEMO_PRODUCT_ID)]
    pub product_id: String,

    /// Quantity written in the second step
    #[arg(long, default_value_t = DEMO_QUANTITY, allow_hyphen_values = true)]
    pub quantity: i64,
}

impl DemoCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing demo command");
        tracing::debug!("Demo command options: {:?}", self);

        let mut store = session::open_store(config);

        if self.no_ask {
            tracing::info!("Skipping question step");
        } else {
            println!("Question: {}", self.question);
            let feedback = match session::connect_bridge(config).await {
                Ok(bridge) => Feedback::answer(bridge.answer(&self.question).await.as_deref()),
                Err(e) => {
                    tracing::warn!("Query bridge unavailable: {}", e);
                    Feedback::Warning(format!("Question answering is unavailable: {}", e))
                }
            };
            println!("{}", feedback);
        }

        let quantity = self.quantity.to_string();
        println!("{}", update_stock(&mut store, &self.product_id, &quantity));
        println!("{}", check_stock(&store, &self.product_id));

        show(&store, 5, false)
    }
}
