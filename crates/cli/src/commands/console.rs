//! Console command handler.
//!
//! Interactive menu over one store for the whole session: check stock,
//! update stock and ask questions. The query bridge is built on the first
//! question so the stock actions work without an API key.

use crate::commands::stock::{check_stock, update_stock};
use crate::form;
use crate::render::{self, Feedback};
use crate::session;
use clap::Args;
use inventory_core::{config::AppConfig, AppResult};
use inventory_knowledge::QueryBridge;
use inventory_stock::StockStore;
use std::io::{BufRead, Write};

const MENU: &str = "\n\
Inventory console\n\
  1) Check stock\n\
  2) Update stock\n\
  3) Ask a question\n\
  4) Show inventory\n\
  q) Quit";

/// Interactive inventory console
#[derive(Args, Debug)]
pub struct ConsoleCommand {
    /// Rows printed by "Show inventory"
    #[arg(short = 'n', long, default_value_t = 5)]
    pub limit: usize,
}

impl ConsoleCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing console command");

        let store = session::open_store(config);
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();

        let mut console = Console::new(config, store, stdin.lock(), stdout.lock(), self.limit);
        console.run().await
    }
}

/// Menu choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Check,
    Update,
    Ask,
    Show,
    Quit,
}

impl Choice {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "1" | "check" => Some(Self::Check),
            "2" | "update" => Some(Self::Update),
            "3" | "ask" => Some(Self::Ask),
            "4" | "show" => Some(Self::Show),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// One console session over any line reader and writer.
pub struct Console<'a, R, W> {
    config: &'a AppConfig,
    store: StockStore,
    bridge: Option<QueryBridge>,
    input: R,
    output: W,
    limit: usize,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(config: &'a AppConfig, store: StockStore, input: R, output: W, limit: usize) -> Self {
        Self {
            config,
            store,
            bridge: None,
            input,
            output,
            limit,
        }
    }

    /// Loop until the user quits or input ends.
    pub async fn run(&mut self) -> AppResult<()> {
        if !self.store.is_loaded() {
            self.say(&Feedback::Warning(
                "Inventory is not loaded; stock actions will report it.".to_string(),
            ))?;
        }

        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(line) = self.prompt("> ")? else {
                break;
            };

            match Choice::parse(&line) {
                Some(Choice::Check) => self.check()?,
                Some(Choice::Update) => self.update()?,
                Some(Choice::Ask) => self.ask().await?,
                Some(Choice::Show) => self.show()?,
                Some(Choice::Quit) => break,
                None => self.say(&Feedback::Warning(format!(
                    "Unknown choice '{}'.",
                    line.trim()
                )))?,
            }
        }

        tracing::info!("Console session ended");
        Ok(())
    }

    /// The store as changed during this session.
    pub fn store(&self) -> &StockStore {
        &self.store
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn check(&mut self) -> AppResult<()> {
        let Some(id) = self.prompt("Product ID: ")? else {
            return Ok(());
        };
        let feedback = check_stock(&self.store, &id);
        self.say(&feedback)
    }

    fn update(&mut self) -> AppResult<()> {
        let Some(id) = self.prompt("Product ID: ")? else {
            return Ok(());
        };
        let Some(quantity) = self.prompt("New quantity: ")? else {
            return Ok(());
        };
        let feedback = update_stock(&mut self.store, &id, &quantity);
        self.say(&feedback)
    }

    async fn ask(&mut self) -> AppResult<()> {
        let Some(raw) = self.prompt("Question: ")? else {
            return Ok(());
        };
        let question = match form::question(&raw) {
            Ok(question) => question.to_string(),
            Err(e) => return self.say(&Feedback::invalid(&e)),
        };

        if self.bridge.is_none() {
            writeln!(self.output, "Indexing inventory, this can take a moment...")?;
            match session::connect_bridge(self.config).await {
                Ok(bridge) => self.bridge = Some(bridge),
                Err(e) => {
                    tracing::warn!("Query bridge unavailable: {}", e);
                    return self.say(&Feedback::Warning(format!(
                        "Question answering is unavailable: {}",
                        e
                    )));
                }
            }
        }

        let feedback = match &self.bridge {
            Some(bridge) => {
                let result = bridge.answer(&question).await;
                Feedback::answer(result.as_deref())
            }
            None => return Ok(()),
        };
        self.say(&feedback)
    }

    fn show(&mut self) -> AppResult<()> {
        let text = match self.store.snapshot() {
            Some(records) => render::table(records, self.limit),
            None => Feedback::Warning("Inventory is not loaded; nothing to show.".to_string())
                .to_string(),
        };
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Print a label and read one line; `None` at end of input.
    fn prompt(&mut self, label: &str) -> AppResult<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn say(&mut self, feedback: &Feedback) -> AppResult<()> {
        writeln!(self.output, "{}", feedback)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventory_stock::{IngestError, RecordSet, StockValue};
    use std::io::Cursor;

    fn store() -> StockStore {
        let records = RecordSet::from_reader(
            "Unique Entry ID,Product Name\nFNxEraBTeWRiCvtFu,3D Glasses\nQ9zLmT,HDMI Cable\n"
                .as_bytes(),
        )
        .unwrap();
        StockStore::new(records)
    }

    async fn run_session(store: StockStore, script: &str) -> (StockStore, String) {
        let config = AppConfig::default();
        let mut console = Console::new(&config, store, Cursor::new(script.to_string()), Vec::new(), 5);
        console.run().await.unwrap();

        let store = console.store().clone();
        let output = String::from_utf8(console.into_output()).unwrap();
        (store, output)
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse(" 1 "), Some(Choice::Check));
        assert_eq!(Choice::parse("UPDATE"), Some(Choice::Update));
        assert_eq!(Choice::parse("q"), Some(Choice::Quit));
        assert_eq!(Choice::parse("9"), None);
    }

    #[tokio::test]
    async fn test_update_then_check() {
        let (store, output) =
            run_session(store(), "2\nFNxEraBTeWRiCvtFu\n45\n1\nFNxEraBTeWRiCvtFu\nq\n").await;

        assert!(output.contains("[ok] Stock for product with ID FNxEraBTeWRiCvtFu updated to 45 units."));
        assert!(output.contains("[ok] Product with ID FNxEraBTeWRiCvtFu has 45 units in stock."));
        assert_eq!(
            store.get_quantity("FNxEraBTeWRiCvtFu").quantity(),
            Some(&StockValue::Count(45))
        );
    }

    #[tokio::test]
    async fn test_invalid_input_is_a_warning() {
        let (store, output) = run_session(store(), "2\nQ9zLmT\nten\n1\n\n3\n   \nq\n").await;

        assert!(output.contains("[warning] Please enter a numeric value for the stock quantity (got 'ten')."));
        assert!(output.contains("[warning] Please enter a valid product ID."));
        assert!(output.contains("[warning] Please enter a question."));
        assert_eq!(
            store.get_quantity("Q9zLmT").quantity(),
            Some(&StockValue::Count(0))
        );
    }

    #[tokio::test]
    async fn test_show_and_unknown_choice() {
        let (_, output) = run_session(store(), "4\nfoo\n").await;

        assert!(output.contains("Unique Entry ID    Product Name  Stock"));
        assert!(output.contains("[warning] Unknown choice 'foo'."));
    }

    #[tokio::test]
    async fn test_end_of_input_quits() {
        let (_, output) = run_session(store(), "2\nFNxEraBTeWRiCvtFu\n").await;
        assert!(!output.contains("[ok]"));
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let store = StockStore::unavailable(IngestError::SourceEmpty {
            path: "inventory.csv".into(),
        });
        let (_, output) = run_session(store, "1\nA1\n4\nq\n").await;

        assert!(output.contains("[warning] Inventory is not loaded; stock actions will report it."));
        assert!(output.contains("[warning] Inventory is not loaded; stock cannot be checked."));
        assert!(output.contains("[warning] Inventory is not loaded; nothing to show."));
    }
}
