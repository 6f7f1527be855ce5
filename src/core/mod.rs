pub mod generate;
pub mod resolver;
pub mod session;
