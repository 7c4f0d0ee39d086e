pub mod folders;
pub mod image;
pub mod removal;
pub mod submit;
