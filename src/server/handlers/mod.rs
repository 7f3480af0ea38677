pub mod health;
pub mod script;
pub mod voice;
