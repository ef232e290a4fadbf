//! Lectura del archivo de configuracion de la cafetera
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::errors::ConfigError;

/// Contenido del archivo: la cafetera y, opcionalmente, los pedidos a atender
#[derive(Deserialize, Debug)]
pub struct MachineInput {
    pub machine: MachineConfiguration,
    #[serde(default)]
    pub orders: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct MachineConfiguration {
    #[serde(default)]
    pub outlets: HashMap<String, i64>,
    #[serde(default)]
    pub total_items_quantity: HashMap<String, u64>,
    #[serde(default)]
    pub beverages: HashMap<String, HashMap<String, u64>>,
}

impl MachineInput {
    /// Pedidos del archivo. Si no hay, se pide una vez cada bebida del menu.
    pub fn orders_or_menu(&self) -> Vec<String> {
        if !self.orders.is_empty() {
            return self.orders.clone();
        }
        let mut drinks: Vec<String> = self.machine.beverages.keys().cloned().collect();
        drinks.sort();
        drinks
    }
}

pub fn read_machine_from_file<P: AsRef<Path>>(path: P) -> Result<MachineInput, ConfigError> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    let input: MachineInput = serde_json::from_reader(reader)?;
    info!(
        "[READER] Read machine with {} beverages and {} orders",
        input.machine.beverages.len(),
        input.orders.len()
    );
    debug!("[READER] {:?}", input);
    Ok(input)
}

pub fn read_machine_from_str(json: &str) -> Result<MachineInput, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coffee_machine::CoffeeMachine;

    const MACHINE: &str = r#"{
        "machine": {
            "outlets": { "count_n": 3 },
            "total_items_quantity": {
                "hot_water": 500,
                "hot_milk": 500,
                "ginger_syrup": 100,
                "sugar_syrup": 100,
                "tea_leaves_syrup": 100
            },
            "beverages": {
                "hot_tea": { "hot_water": 200, "hot_milk": 100, "ginger_syrup": 10, "sugar_syrup": 10, "tea_leaves_syrup": 30 },
                "hot_coffee": { "hot_water": 100, "ginger_syrup": 30, "hot_milk": 400, "sugar_syrup": 50, "tea_leaves_syrup": 30 },
                "black_tea": { "hot_water": 300, "ginger_syrup": 30, "sugar_syrup": 50, "tea_leaves_syrup": 30 },
                "green_tea": { "hot_water": 100, "ginger_syrup": 30, "sugar_syrup": 50, "green_mixture": 30 }
            }
        }
    }"#;

    #[test]
    fn should_read_the_machine_and_default_orders_to_the_menu() {
        let input = read_machine_from_str(MACHINE).unwrap();
        assert_eq!(Some(&3), input.machine.outlets.get("count_n"));
        assert_eq!(Some(&500), input.machine.total_items_quantity.get("hot_water"));
        assert_eq!(
            vec!["black_tea", "green_tea", "hot_coffee", "hot_tea"],
            input.orders_or_menu()
        );
    }

    #[test]
    fn should_keep_the_orders_of_the_file() {
        let input = read_machine_from_str(
            r#"{ "machine": { "outlets": { "count_n": 1 } }, "orders": ["hot_tea", "hot_tea"] }"#,
        )
        .unwrap();
        assert_eq!(vec!["hot_tea", "hot_tea"], input.orders_or_menu());
    }

    #[test]
    fn should_serve_the_menu_of_the_file_in_order() {
        let input = read_machine_from_str(MACHINE).unwrap();
        let machine = CoffeeMachine::from_configuration(input.machine)
            .unwrap()
            .with_brew_time(std::time::Duration::from_millis(1));

        assert_eq!("hot_tea is prepared", machine.serve("hot_tea"));
        assert_eq!("hot_coffee is prepared", machine.serve("hot_coffee"));
        assert_eq!(
            "green_tea cannot be prepared because green_mixture is not available",
            machine.serve("green_tea")
        );
        assert_eq!(
            "black_tea cannot be prepared because item hot_water is not sufficient",
            machine.serve("black_tea")
        );
    }

    #[test]
    fn should_fail_without_outlet_count() {
        let input = read_machine_from_str(r#"{ "machine": { "outlets": {} } }"#).unwrap();
        assert!(matches!(
            CoffeeMachine::from_configuration(input.machine),
            Err(ConfigError::MissingOutletCount)
        ));
    }

    #[test]
    fn should_reject_negative_stock() {
        let result = read_machine_from_str(
            r#"{ "machine": { "outlets": { "count_n": 1 }, "total_items_quantity": { "hot_water": -1 } } }"#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn should_fail_on_a_missing_file() {
        assert!(matches!(
            read_machine_from_file("does_not_exist.json"),
            Err(ConfigError::FileReader(_))
        ));
    }
}
