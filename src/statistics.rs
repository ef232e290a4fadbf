use std::{
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use log::{error, info};

use crate::{coffee_machine::CoffeeMachine, constants::STATISTICS_WAIT_IN_MS, errors::DispenseError};

pub struct StatisticsPrinter {
    machine: Arc<CoffeeMachine>,
    finish: Mutex<bool>,
}

impl StatisticsPrinter {
    pub fn new(machine: Arc<CoffeeMachine>) -> StatisticsPrinter {
        StatisticsPrinter {
            machine,
            finish: Mutex::new(false),
        }
    }

    pub fn finish(&self) {
        if let Ok(mut finish) = self.finish.lock() {
            *finish = true;
            return;
        }
        error!("Error setting statistics thread to finish");
    }

    pub fn process_statistics(&self) -> Result<(), DispenseError> {
        loop {
            if *self.finish.lock()? {
                info!("{}", self.report()?);
                return Ok(());
            }

            info!("{}", self.report()?);

            thread::sleep(Duration::from_millis(STATISTICS_WAIT_IN_MS));
        }
    }

    pub fn report(&self) -> Result<String, DispenseError> {
        let mut statistics = format!(
            "[STATISTICS] Orders processed={} rejected={} | Outlets in use={}/{} | Ingredient=(remaining, consumed) |",
            self.machine.orders_processed()?,
            self.machine.orders_rejected()?,
            self.machine.outlets().in_use()?,
            self.machine.outlets().capacity()
        );
        for (ingredient, container) in self.machine.snapshot()? {
            statistics.push_str(&format!(
                " {}=({},{}) ",
                ingredient, container.remaining, container.consumed
            ));
        }
        Ok(statistics)
    }
}
