#![forbid(unsafe_code)]
//! shelf-exec: the session that sits between interaction events and the
//! pipeline.
//!
//! A `Session` owns the joined catalog, the collation, and the mutable
//! `ViewState`. Events mutate the state one at a time; every render rebuilds
//! a `QuerySpec` from it and reruns `prepare_products` over the full catalog.

pub mod session;

pub use session::{Event, ExecError, PanelView, Session, View, ViewState};
