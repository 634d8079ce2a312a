pub mod sink;
pub mod terminal;
