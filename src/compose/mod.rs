pub mod canvas;
pub mod layer;
pub mod mask;
