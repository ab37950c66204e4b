pub mod guild;
pub mod prelude;
pub mod result;
pub mod sokuji;
