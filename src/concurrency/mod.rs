pub mod delay;
pub mod locks;
pub mod probe;
