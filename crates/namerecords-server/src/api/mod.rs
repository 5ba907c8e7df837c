// ABOUTME: API module containing the HTTP handler functions for the namerecords REST API.
// ABOUTME: The namerecords sub-module covers both the collection and item paths.

pub mod namerecords;
