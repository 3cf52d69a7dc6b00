pub mod cdn;
pub mod config;
pub mod data;
pub mod error;
pub mod fields;
pub mod gallery;
pub mod html;
pub mod lightbox;
pub mod model;
pub mod normalize;
pub mod paths;
pub mod templates;
pub mod video;
