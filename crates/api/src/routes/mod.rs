pub mod analytics;
pub mod audit;
pub mod health;
pub mod purge;
pub mod resolve;
pub mod settings;
pub mod track;
