pub mod word;
pub mod words;
