//! Cafetera con una cantidad fija de outlets y un stock de ingredientes compartido
//! entre los pedidos concurrentes.
pub mod coffee_machine;
pub mod constants;
pub mod container;
pub mod errors;
pub mod ledger;
pub mod machine_reader;
pub mod outlets;
pub mod recipe;
pub mod statistics;

pub use coffee_machine::CoffeeMachine;
pub use errors::{ConfigError, DispenseError};
pub use recipe::{Catalog, Recipe};
