//! Cafetera: atiende los pedidos usando los outlets y el registro de ingredientes.
use std::{
    collections::{BTreeMap, HashMap},
    sync::RwLock,
    thread,
    time::Duration,
};

use log::{debug, info, warn};

use crate::{
    constants::{BREW_TIME_IN_MS, LOW_STOCK_PERCENTAGE, OUTLET_COUNT_KEY},
    container::Container,
    errors::{ConfigError, DispenseError},
    ledger::IngredientLedger,
    machine_reader::MachineConfiguration,
    outlets::{OutletLimiter, OutletSlot},
    recipe::{Catalog, Recipe},
};

/// Representa a la cafetera. Se comparte entre los hilos que hacen pedidos (por ejemplo con un `Arc`).
/// El menu no cambia; el stock solo cambia con `serve` y `refill`.
pub struct CoffeeMachine {
    catalog: Catalog,
    ledger: IngredientLedger,
    outlets: OutletLimiter,
    brew_time: Duration,
    orders_processed: RwLock<u64>,
    orders_rejected: RwLock<u64>,
}

impl CoffeeMachine {
    pub fn new(
        catalog: Catalog,
        outlet_count: Option<i64>,
        stock: HashMap<String, u64>,
    ) -> Result<CoffeeMachine, ConfigError> {
        let outlet_count = outlet_count.ok_or(ConfigError::MissingOutletCount)?;
        if outlet_count <= 0 {
            return Err(ConfigError::InvalidOutletCount(outlet_count));
        }
        let capacity = usize::try_from(outlet_count)
            .map_err(|_| ConfigError::InvalidOutletCount(outlet_count))?;

        info!("[MACHINE] Starting with {} outlets", capacity);
        Ok(CoffeeMachine {
            catalog,
            ledger: IngredientLedger::new(stock),
            outlets: OutletLimiter::new(capacity),
            brew_time: Duration::from_millis(BREW_TIME_IN_MS),
            orders_processed: RwLock::new(0),
            orders_rejected: RwLock::new(0),
        })
    }

    pub fn from_configuration(
        configuration: MachineConfiguration,
    ) -> Result<CoffeeMachine, ConfigError> {
        let outlet_count = configuration.outlets.get(OUTLET_COUNT_KEY).copied();
        let catalog = Catalog::new(configuration.beverages)?;
        CoffeeMachine::new(catalog, outlet_count, configuration.total_items_quantity)
    }

    pub fn with_brew_time(mut self, brew_time: Duration) -> CoffeeMachine {
        self.brew_time = brew_time;
        self
    }

    /// Atiende un pedido y devuelve el mensaje para el cliente
    pub fn serve(&self, drink: &str) -> String {
        self.try_serve(drink).unwrap_or_else(|err| err.to_string())
    }

    /// Como `serve`, pero si no se libera un outlet en `timeout` el pedido se descarta
    /// sin tocar los ingredientes
    pub fn serve_timeout(&self, drink: &str, timeout: Duration) -> String {
        let result = self.recipe(drink).and_then(|recipe| {
            let outlet = self
                .outlets
                .acquire_timeout(timeout)?
                .ok_or_else(|| DispenseError::OutletTimeout(drink.to_string()))?;
            self.dispense(drink, recipe, outlet)
        });
        self.record(result).unwrap_or_else(|err| err.to_string())
    }

    pub fn try_serve(&self, drink: &str) -> Result<String, DispenseError> {
        let result = self.recipe(drink).and_then(|recipe| {
            let outlet = self.outlets.acquire()?;
            self.dispense(drink, recipe, outlet)
        });
        self.record(result)
    }

    pub fn refill(&self, ingredient: &str, amount: u64) -> Result<(), DispenseError> {
        self.ledger.refill(ingredient, amount)
    }

    pub fn remaining(&self, ingredient: &str) -> Result<Option<u64>, DispenseError> {
        self.ledger.remaining(ingredient)
    }

    pub fn snapshot(&self) -> Result<BTreeMap<String, Container>, DispenseError> {
        self.ledger.snapshot()
    }

    pub fn drinks(&self) -> Vec<String> {
        self.catalog.drinks()
    }

    pub fn outlets(&self) -> &OutletLimiter {
        &self.outlets
    }

    pub fn orders_processed(&self) -> Result<u64, DispenseError> {
        Ok(*self.orders_processed.read()?)
    }

    pub fn orders_rejected(&self) -> Result<u64, DispenseError> {
        Ok(*self.orders_rejected.read()?)
    }

    fn recipe(&self, drink: &str) -> Result<&Recipe, DispenseError> {
        self.catalog
            .recipe(drink)
            .ok_or_else(|| DispenseError::UnknownDrink(drink.to_string()))
    }

    // El outlet queda tomado durante toda la preparacion, el lock del stock solo durante la reserva
    fn dispense(
        &self,
        drink: &str,
        recipe: &Recipe,
        outlet: OutletSlot<'_>,
    ) -> Result<String, DispenseError> {
        self.ledger.reserve(drink, recipe)?;
        debug!("[MACHINE] Brewing {}", drink);

        for ingredient in self.ledger.running_low(recipe, LOW_STOCK_PERCENTAGE)? {
            warn!("[MACHINE] {} is running low", ingredient);
        }

        thread::sleep(self.brew_time);
        outlet.release();
        Ok(format!("{} is prepared", drink))
    }

    fn record(&self, result: Result<String, DispenseError>) -> Result<String, DispenseError> {
        let counter = match result {
            Ok(_) => &self.orders_processed,
            Err(_) => &self.orders_rejected,
        };
        *counter.write()? += 1;
        match &result {
            Ok(message) => info!("[MACHINE] {}", message),
            Err(err) => info!("[MACHINE] {}", err),
        }
        result
    }
}
