//! Outlets de la cafetera. Limitan cuantas bebidas se preparan al mismo tiempo.
use std::{
    collections::VecDeque,
    sync::{Condvar, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use log::debug;

use crate::errors::DispenseError;

struct OutletsState {
    available: usize,
    in_use: usize,
    peak_in_use: usize,
    next_ticket: u64,
    waiting: VecDeque<u64>,
}

impl OutletsState {
    fn can_take(&self, ticket: u64) -> bool {
        self.available > 0 && self.waiting.front() == Some(&ticket)
    }

    fn take(&mut self) {
        self.waiting.pop_front();
        self.available -= 1;
        self.in_use += 1;
        self.peak_in_use = self.peak_in_use.max(self.in_use);
    }
}

/// Semaforo con la cantidad de outlets. Los pedidos que esperan se atienden en orden de llegada.
pub struct OutletLimiter {
    capacity: usize,
    state: Mutex<OutletsState>,
    outlet_cond: Condvar,
}

impl OutletLimiter {
    pub fn new(capacity: usize) -> OutletLimiter {
        OutletLimiter {
            capacity,
            state: Mutex::new(OutletsState {
                available: capacity,
                in_use: 0,
                peak_in_use: 0,
                next_ticket: 0,
                waiting: VecDeque::new(),
            }),
            outlet_cond: Condvar::new(),
        }
    }

    /// Bloquea hasta que haya un outlet libre y lo toma
    pub fn acquire(&self) -> Result<OutletSlot<'_>, DispenseError> {
        let mut state = self.state.lock()?;
        let ticket = Self::enqueue(&mut state);
        let mut state = match self
            .outlet_cond
            .wait_while(state, |state| !state.can_take(ticket))
        {
            Ok(state) => state,
            Err(poisoned) => {
                self.leave_queue(poisoned.into_inner(), ticket);
                return Err(DispenseError::LockError);
            }
        };
        state.take();
        debug!("[OUTLETS] Ticket {} took an outlet, {} in use", ticket, state.in_use);
        drop(state);
        // El siguiente en la fila puede tener un outlet libre
        self.outlet_cond.notify_all();
        Ok(OutletSlot { limiter: self })
    }

    /// Como `acquire`, pero se rinde pasado `timeout`. Si se rinde no queda en la fila.
    pub fn acquire_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Option<OutletSlot<'_>>, DispenseError> {
        let mut state = self.state.lock()?;
        let ticket = Self::enqueue(&mut state);
        let mut state = match self.outlet_cond.wait_timeout_while(state, timeout, |state| {
            !state.can_take(ticket)
        }) {
            Ok((state, _)) => state,
            Err(poisoned) => {
                let (state, _) = poisoned.into_inner();
                self.leave_queue(state, ticket);
                return Err(DispenseError::LockError);
            }
        };

        if !state.can_take(ticket) {
            debug!("[OUTLETS] Ticket {} gave up waiting for an outlet", ticket);
            self.leave_queue(state, ticket);
            return Ok(None);
        }

        state.take();
        drop(state);
        self.outlet_cond.notify_all();
        Ok(Some(OutletSlot { limiter: self }))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> Result<usize, DispenseError> {
        Ok(self.state.lock()?.available)
    }

    pub fn in_use(&self) -> Result<usize, DispenseError> {
        Ok(self.state.lock()?.in_use)
    }

    /// Maxima cantidad de outlets usados a la vez desde que se creo
    pub fn peak_in_use(&self) -> Result<usize, DispenseError> {
        Ok(self.state.lock()?.peak_in_use)
    }

    fn enqueue(state: &mut MutexGuard<OutletsState>) -> u64 {
        let ticket = state.next_ticket;
        state.next_ticket += 1;
        state.waiting.push_back(ticket);
        ticket
    }

    // El que sigue en la fila no puede quedar esperando a un ticket que ya se fue
    fn leave_queue(&self, mut state: MutexGuard<OutletsState>, ticket: u64) {
        state.waiting.retain(|waiting| *waiting != ticket);
        drop(state);
        self.outlet_cond.notify_all();
    }

    // Se llama desde Drop, asi que no puede fallar por un lock envenenado
    fn release(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(state.in_use > 0, "outlet released without being acquired");
        state.in_use -= 1;
        state.available += 1;
        debug!("[OUTLETS] Outlet released, {} in use", state.in_use);
        drop(state);
        self.outlet_cond.notify_all();
    }
}

/// Outlet tomado. Se devuelve al limitador al hacer `release` o al salir de scope.
pub struct OutletSlot<'a> {
    limiter: &'a OutletLimiter,
}

impl OutletSlot<'_> {
    pub fn release(self) {}
}

impl Drop for OutletSlot<'_> {
    fn drop(&mut self) {
        self.limiter.release();
    }
}
