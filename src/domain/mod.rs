//! Domain types for the data-package shop: the catalog, the order form and
//! its validation rules, and the ports through which orders leave the crate.

pub mod catalog;
pub mod form;
pub mod order;
pub mod ports;
