//! Errores de la cafetera
use thiserror::Error;

/// Errores de un pedido. Su `Display` es el mensaje que se le muestra al cliente.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispenseError {
    #[error("{0} is not available")]
    UnknownDrink(String),
    #[error("{drink} cannot be prepared because {ingredient} is not available")]
    IngredientAbsent { drink: String, ingredient: String },
    #[error("{drink} cannot be prepared because item {ingredient} is not sufficient")]
    IngredientInsufficient { drink: String, ingredient: String },
    #[error("{0} cannot be prepared because no outlet became free")]
    OutletTimeout(String),
    #[error("machine state lock was poisoned")]
    LockError,
}

impl<T> From<std::sync::PoisonError<T>> for DispenseError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        DispenseError::LockError
    }
}

/// Errores al construir la cafetera. Nunca se devuelve una cafetera a medio construir.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("outlet count is missing from the machine configuration")]
    MissingOutletCount,
    #[error("outlet count must be positive, got {0}")]
    InvalidOutletCount(i64),
    #[error("recipe {drink} requires a non positive quantity of {ingredient}")]
    InvalidRecipeQuantity { drink: String, ingredient: String },
    #[error("could not read machine file: {0}")]
    FileReader(#[from] std::io::Error),
    #[error("invalid machine file: {0}")]
    Parse(#[from] serde_json::Error),
}
