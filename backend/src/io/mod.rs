//! # IO Module
//!
//! The interface layer: the REST API exposed to the admin client and the
//! tabular adapter that turns uploaded bulk documents into rows the domain
//! layer can validate.

pub mod rest;
pub mod tabular;
