//! Registro de ingredientes de la cafetera. Es el unico que modifica el stock.
use std::{
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};

use log::{debug, info};

use crate::{container::Container, errors::DispenseError, recipe::Recipe};

/// Stock compartido por todos los pedidos, protegido por un unico lock.
/// Tanto la reserva como la reposicion toman el mismo lock, por lo que quedan serializadas.
pub struct IngredientLedger {
    containers: Mutex<HashMap<String, Container>>,
}

impl IngredientLedger {
    pub fn new(stock: HashMap<String, u64>) -> IngredientLedger {
        let containers = stock
            .into_iter()
            .map(|(ingredient, quantity)| (ingredient, Container::new(quantity)))
            .collect();
        IngredientLedger {
            containers: Mutex::new(containers),
        }
    }

    /// Verifica y descuenta los ingredientes de la receta en una sola seccion critica.
    /// Si falta algun ingrediente no se descuenta nada y se informa el primero
    /// (en orden alfabetico) que no alcanza.
    pub fn reserve(&self, drink: &str, recipe: &Recipe) -> Result<(), DispenseError> {
        let mut containers = self.containers.lock()?;

        for (ingredient, quantity_required) in recipe.iter() {
            match containers.get(ingredient) {
                None => {
                    return Err(DispenseError::IngredientAbsent {
                        drink: drink.to_string(),
                        ingredient: ingredient.to_string(),
                    })
                }
                Some(container) if !container.has_enough(quantity_required) => {
                    debug!(
                        "[LEDGER] {} needs {} of {}, there is {}",
                        drink, quantity_required, ingredient, container.remaining
                    );
                    return Err(DispenseError::IngredientInsufficient {
                        drink: drink.to_string(),
                        ingredient: ingredient.to_string(),
                    });
                }
                Some(_) => {}
            }
        }

        for (ingredient, quantity_required) in recipe.iter() {
            if let Some(container) = containers.get_mut(ingredient) {
                container.consume(quantity_required);
                debug!(
                    "[LEDGER] {} used {} of {}, remains {}",
                    drink, quantity_required, ingredient, container.remaining
                );
            }
        }
        Ok(())
    }

    /// Agrega `amount` al ingrediente, creandolo si no existia
    pub fn refill(&self, ingredient: &str, amount: u64) -> Result<(), DispenseError> {
        let mut containers = self.containers.lock()?;
        match containers.get_mut(ingredient) {
            Some(container) => container.replenish(amount),
            None => {
                containers.insert(ingredient.to_string(), Container::new(amount));
            }
        }
        info!("[LEDGER] Refilled {} with {}", ingredient, amount);
        Ok(())
    }

    pub fn remaining(&self, ingredient: &str) -> Result<Option<u64>, DispenseError> {
        let containers = self.containers.lock()?;
        Ok(containers.get(ingredient).map(|container| container.remaining))
    }

    /// Copia del estado de todos los contenedores, ordenada por ingrediente
    pub fn snapshot(&self) -> Result<BTreeMap<String, Container>, DispenseError> {
        let containers = self.containers.lock()?;
        Ok(containers
            .iter()
            .map(|(ingredient, container)| (ingredient.clone(), *container))
            .collect())
    }

    /// Ingredientes de la receta cuyo stock quedo por debajo del porcentaje de su capacidad
    pub fn running_low(
        &self,
        recipe: &Recipe,
        percentage: u64,
    ) -> Result<Vec<String>, DispenseError> {
        let containers = self.containers.lock()?;
        Ok(recipe
            .iter()
            .filter(|(ingredient, _)| {
                containers
                    .get(*ingredient)
                    .map_or(false, |container| container.is_running_low(percentage))
            })
            .map(|(ingredient, _)| ingredient.to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::{sync::Arc, thread};

    fn stock(items: &[(&str, u64)]) -> HashMap<String, u64> {
        items
            .iter()
            .map(|(name, quantity)| (name.to_string(), *quantity))
            .collect()
    }

    fn recipe(drink: &str, items: &[(&str, u64)]) -> Recipe {
        Recipe::new(drink, stock(items)).unwrap()
    }

    #[test]
    fn should_reserve_every_ingredient_of_the_recipe() {
        let ledger = IngredientLedger::new(stock(&[("hot_water", 500), ("sugar_syrup", 100)]));
        let black_tea = recipe("black_tea", &[("hot_water", 300), ("sugar_syrup", 50)]);

        assert_eq!(Ok(()), ledger.reserve("black_tea", &black_tea));
        assert_eq!(Ok(Some(200)), ledger.remaining("hot_water"));
        assert_eq!(Ok(Some(50)), ledger.remaining("sugar_syrup"));
    }

    #[test]
    fn should_report_an_absent_ingredient_without_consuming() {
        let ledger = IngredientLedger::new(stock(&[("hot_water", 500)]));
        let green_tea = recipe("green_tea", &[("green_mixture", 30), ("hot_water", 100)]);

        assert_eq!(
            Err(DispenseError::IngredientAbsent {
                drink: "green_tea".to_string(),
                ingredient: "green_mixture".to_string(),
            }),
            ledger.reserve("green_tea", &green_tea)
        );
        assert_eq!(Ok(Some(500)), ledger.remaining("hot_water"));
    }

    #[test]
    fn should_not_partially_consume_when_an_ingredient_is_insufficient() {
        let ledger = IngredientLedger::new(stock(&[("hot_water", 500), ("sugar_syrup", 10)]));
        let black_tea = recipe("black_tea", &[("hot_water", 300), ("sugar_syrup", 50)]);

        assert_eq!(
            Err(DispenseError::IngredientInsufficient {
                drink: "black_tea".to_string(),
                ingredient: "sugar_syrup".to_string(),
            }),
            ledger.reserve("black_tea", &black_tea)
        );
        assert_eq!(Ok(Some(500)), ledger.remaining("hot_water"));
        assert_eq!(Ok(Some(10)), ledger.remaining("sugar_syrup"));
    }

    #[test]
    fn should_report_the_first_failing_ingredient_by_name() {
        let ledger = IngredientLedger::new(stock(&[("hot_water", 0), ("sugar_syrup", 0)]));
        let black_tea = recipe("black_tea", &[("sugar_syrup", 1), ("hot_water", 1)]);

        assert_eq!(
            Err(DispenseError::IngredientInsufficient {
                drink: "black_tea".to_string(),
                ingredient: "hot_water".to_string(),
            }),
            ledger.reserve("black_tea", &black_tea)
        );
    }

    #[test]
    fn should_refill_existing_and_unknown_ingredients() {
        let ledger = IngredientLedger::new(stock(&[("hot_water", 1)]));
        ledger.refill("hot_water", 500).unwrap();
        ledger.refill("sugar_syrup", 500).unwrap();

        assert_eq!(Ok(Some(501)), ledger.remaining("hot_water"));
        assert_eq!(Ok(Some(500)), ledger.remaining("sugar_syrup"));
    }

    #[test]
    fn should_keep_consumed_in_the_snapshot() {
        let ledger = IngredientLedger::new(stock(&[("hot_water", 100)]));
        ledger
            .reserve("hot_tea", &recipe("hot_tea", &[("hot_water", 40)]))
            .unwrap();

        let snapshot = ledger.snapshot().unwrap();
        let hot_water = snapshot.get("hot_water").unwrap();
        assert_eq!(60, hot_water.remaining);
        assert_eq!(40, hot_water.consumed);
    }

    #[test]
    fn should_list_ingredients_running_low() {
        let ledger = IngredientLedger::new(stock(&[("hot_water", 100), ("sugar_syrup", 100)]));
        let black_tea = recipe("black_tea", &[("hot_water", 90), ("sugar_syrup", 10)]);
        ledger.reserve("black_tea", &black_tea).unwrap();

        assert_eq!(
            vec!["hot_water".to_string()],
            ledger.running_low(&black_tea, 20).unwrap()
        );
    }

    #[test]
    fn should_never_over_commit_under_concurrent_reservations() {
        let ledger = Arc::new(IngredientLedger::new(stock(&[("hot_water", 10)])));
        let hot_tea = Arc::new(recipe("hot_tea", &[("hot_water", 3)]));

        let handles: Vec<_> = (0..10)
            .map(|_| {
                let ledger = ledger.clone();
                let hot_tea = hot_tea.clone();
                thread::spawn(move || ledger.reserve("hot_tea", &hot_tea).is_ok())
            })
            .collect();
        let reserved = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(3, reserved);
        assert_eq!(Ok(Some(1)), ledger.remaining("hot_water"));
    }

    proptest! {
        #[test]
        fn reservation_is_all_or_nothing(
            available in proptest::collection::vec(0u64..20, 3),
            required in proptest::collection::vec(1u64..20, 3),
        ) {
            let names = ["cacao", "hot_milk", "hot_water"];
            let initial: HashMap<String, u64> = names
                .iter()
                .zip(available.iter())
                .map(|(name, quantity)| (name.to_string(), *quantity))
                .collect();
            let needs: HashMap<String, u64> = names
                .iter()
                .zip(required.iter())
                .map(|(name, quantity)| (name.to_string(), *quantity))
                .collect();
            let ledger = IngredientLedger::new(initial.clone());
            let hot_coco = Recipe::new("hot_coco", needs.clone()).unwrap();

            let enough = names.iter().all(|name| initial[*name] >= needs[*name]);
            let result = ledger.reserve("hot_coco", &hot_coco);
            prop_assert_eq!(enough, result.is_ok());

            for name in names.iter() {
                let expected = if enough { initial[*name] - needs[*name] } else { initial[*name] };
                prop_assert_eq!(Ok(Some(expected)), ledger.remaining(name));
            }
        }
    }
}
