pub mod card;
pub mod document;
pub mod filter;
pub mod label;

pub use card::{Card, CardId, CardPatch, Priority};
pub use document::{Column, ColumnId, Document};
pub use filter::CardFilter;
