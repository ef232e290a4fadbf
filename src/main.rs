use std::{env, process, sync::Arc, thread, thread::JoinHandle};

use coffee_machine::{
    constants::DEFAULT_MACHINE_FILE, machine_reader::read_machine_from_file,
    statistics::StatisticsPrinter, CoffeeMachine, ConfigError,
};
use log::{error, LevelFilter};
use rand::{seq::SliceRandom, thread_rng};
use simple_logger::SimpleLogger;

fn main() {
    if let Err(err) = SimpleLogger::new().with_level(LevelFilter::Info).env().init() {
        eprintln!("Could not start the logger: {}", err);
    }

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_MACHINE_FILE.to_string());
    if let Err(err) = run(&path) {
        error!("{}", err);
        process::exit(1);
    }
}

fn run(path: &str) -> Result<(), ConfigError> {
    let input = read_machine_from_file(path)?;
    let mut orders = input.orders_or_menu();
    orders.shuffle(&mut thread_rng());

    let machine = Arc::new(CoffeeMachine::from_configuration(input.machine)?);

    let statistics = Arc::new(StatisticsPrinter::new(machine.clone()));
    let statistics_clone = statistics.clone();
    let statistics_thread = thread::spawn(move || statistics_clone.process_statistics());

    let customers: Vec<JoinHandle<String>> = orders
        .into_iter()
        .map(|drink| {
            let machine = machine.clone();
            thread::spawn(move || machine.serve(&drink))
        })
        .collect();

    for customer in customers {
        match customer.join() {
            Ok(message) => println!("{}", message),
            Err(_) => error!("A customer thread panicked"),
        }
    }

    statistics.finish();
    match statistics_thread.join() {
        Ok(Err(err)) => error!("Statistics stopped: {}", err),
        Err(_) => error!("Statistics thread panicked"),
        Ok(Ok(())) => {}
    }
    Ok(())
}
