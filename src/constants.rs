//! Parametros de configuracion de la cafetera

/// Tiempo que tarda en prepararse una bebida una vez reservados sus ingredientes
pub const BREW_TIME_IN_MS: u64 = 1000;

/// Indica cuanto tiempo se debe de esperar (por lo menos) para imprimir por pantalla las estadisticas de la cafetera
pub const STATISTICS_WAIT_IN_MS: u64 = 50;

/// Porcentaje de la capacidad a partir del cual se alerta de que se acaba un ingrediente
pub const LOW_STOCK_PERCENTAGE: u64 = 20;

/// Archivo de configuracion leido cuando no se indica uno por linea de comandos
pub const DEFAULT_MACHINE_FILE: &str = "machine.json";

/// Clave del archivo de configuracion que indica la cantidad de outlets
pub const OUTLET_COUNT_KEY: &str = "count_n";
