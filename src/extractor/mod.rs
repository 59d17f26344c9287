pub mod models;
pub mod youtube;

pub use models::VideoDescriptor;
pub use youtube::YoutubeResolver;
