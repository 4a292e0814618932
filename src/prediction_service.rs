pub mod demo_images;
pub mod main;
pub mod response;
