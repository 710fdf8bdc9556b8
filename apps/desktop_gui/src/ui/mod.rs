//! UI layer: app shell and the two views (intake form, results report).

pub mod app;
