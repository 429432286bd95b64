//! Integration tests for fridgekit-client
//!
//! The store tests drive `ItemStore` against an in-memory inventory service;
//! the HTTP tests use wiremock to check the reqwest adapter's requests and
//! error mapping.


mod test_drag_drop;
mod test_store;
