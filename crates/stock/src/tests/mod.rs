//! Cross-module scenarios: file on disk through ingestion into the store.

mod scenarios;
