#![cfg_attr(
	not(doc),
	expect(missing_docs, reason = "docs are enabled only under `doc` cfg")
)]
#![cfg_attr(doc, doc = include_str!("../README.md"))]
#![cfg_attr(not(test), no_std)]
#![cfg_attr(doc, feature(doc_cfg))]

#[macro_use]
mod trace;

mod assert;
mod error;
mod optional;
mod slot;

use self::slot::Slot;

pub use self::{error::BadOptionalAccess, optional::OptionalBox, trace::Transition};
