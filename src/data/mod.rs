pub mod discovery;
pub mod loader;

pub use discovery::find_input;
pub use loader::load_table;
