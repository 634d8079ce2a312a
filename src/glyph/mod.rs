pub mod atlas;
pub mod rle;
