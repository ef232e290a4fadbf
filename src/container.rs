//! Contenedor de un ingrediente
use log::debug;

/// Stock de un ingrediente. `capacity` es el maximo `remaining` que tuvo el contenedor
/// y se usa para alertar cuando queda poco.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub remaining: u64,
    pub consumed: u64,
    pub capacity: u64,
}

impl Container {
    pub fn new(initial_capacity: u64) -> Container {
        Container {
            remaining: initial_capacity,
            consumed: 0,
            capacity: initial_capacity,
        }
    }

    pub fn has_enough(&self, quantity_required: u64) -> bool {
        self.remaining >= quantity_required
    }

    /// Consume la cantidad pedida. Se debe verificar antes con `has_enough`.
    pub fn consume(&mut self, quantity_required: u64) {
        debug_assert!(self.has_enough(quantity_required));
        self.remaining -= quantity_required;
        self.consumed = self.consumed.saturating_add(quantity_required);
    }

    pub fn replenish(&mut self, amount: u64) {
        self.remaining = self.remaining.saturating_add(amount);
        if self.remaining > self.capacity {
            debug!("Capacity raised from {} to {}", self.capacity, self.remaining);
            self.capacity = self.remaining;
        }
    }

    /// Indica si lo que queda esta por debajo del porcentaje dado de la capacidad
    pub fn is_running_low(&self, percentage: u64) -> bool {
        self.capacity > 0
            && (self.remaining as u128) * 100 < (self.capacity as u128) * (percentage as u128)
    }
}
