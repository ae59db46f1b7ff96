pub mod export;
pub mod list_state;
pub mod modifiable;
pub mod validation;
