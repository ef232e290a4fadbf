//! Recetas y menu de la cafetera
use std::collections::{BTreeMap, HashMap};

use crate::errors::ConfigError;

/// Cantidad de cada ingrediente que necesita una bebida.
/// Los ingredientes quedan ordenados por nombre, que es el orden en el que se verifican.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recipe {
    ingredients: BTreeMap<String, u64>,
}

impl Recipe {
    pub fn new(drink: &str, ingredients: HashMap<String, u64>) -> Result<Recipe, ConfigError> {
        if let Some((ingredient, _)) = ingredients.iter().find(|(_, quantity)| **quantity == 0) {
            return Err(ConfigError::InvalidRecipeQuantity {
                drink: drink.to_string(),
                ingredient: ingredient.clone(),
            });
        }
        Ok(Recipe {
            ingredients: ingredients.into_iter().collect(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.ingredients
            .iter()
            .map(|(ingredient, quantity)| (ingredient.as_str(), *quantity))
    }

    pub fn quantity_of(&self, ingredient: &str) -> Option<u64> {
        self.ingredients.get(ingredient).copied()
    }
}

/// Menu de la cafetera. No cambia una vez construido.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    recipes: HashMap<String, Recipe>,
}

impl Catalog {
    pub fn new(beverages: HashMap<String, HashMap<String, u64>>) -> Result<Catalog, ConfigError> {
        let recipes = beverages
            .into_iter()
            .map(|(drink, ingredients)| {
                let recipe = Recipe::new(&drink, ingredients)?;
                Ok::<_, ConfigError>((drink, recipe))
            })
            .collect::<Result<HashMap<_, _>, ConfigError>>()?;
        Ok(Catalog { recipes })
    }

    pub fn recipe(&self, drink: &str) -> Option<&Recipe> {
        self.recipes.get(drink)
    }

    /// Nombres de las bebidas, ordenados
    pub fn drinks(&self) -> Vec<String> {
        let mut drinks: Vec<String> = self.recipes.keys().cloned().collect();
        drinks.sort();
        drinks
    }
}
