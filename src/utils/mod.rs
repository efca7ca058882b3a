pub mod io;
pub mod system;
