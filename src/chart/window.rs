use std::collections::VecDeque;

use crate::{Error, Result};

/// Fixed-capacity FIFO buffer of the most recent prices for one symbol.
///
/// Capacity is set once, from the length of the initial history push, and
/// never changes for the window's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceWindow {
    capacity: usize,
    prices: VecDeque<f64>,
}

impl PriceWindow {
    pub fn seed(history: &[f64]) -> Result<Self> {
        if history.is_empty() {
            return Err(Error::InvalidInput("price history is empty".into()));
        }
        Ok(Self {
            capacity: history.len(),
            prices: history.iter().copied().collect(),
        })
    }

    /// Pushes the newest price, evicting the oldest once the window is full.
    pub fn append(&mut self, price: f64) {
        if self.prices.len() == self.capacity {
            self.prices.pop_front();
        }
        self.prices.push_back(price);
    }

    /// Current prices, oldest first.
    pub fn snapshot(&self) -> Vec<f64> {
        self.prices.iter().copied().collect()
    }

    pub fn last(&self) -> Option<f64> {
        self.prices.back().copied()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
