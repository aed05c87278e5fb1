//! End-to-end bridge tests with offline embeddings and a recorded chat model.
