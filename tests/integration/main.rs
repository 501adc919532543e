//! End-to-end tests against mock HTTP servers

mod crawl_tests;
mod report_tests;
