pub mod adjacency;
pub mod spiral;
