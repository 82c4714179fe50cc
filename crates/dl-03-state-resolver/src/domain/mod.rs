pub mod resolver;
pub mod scan;
pub mod states;
