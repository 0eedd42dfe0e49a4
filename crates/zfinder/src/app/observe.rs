//! Observable cells that notify listeners after every write.

use std::fmt;

type Listener<T> = Box<dyn FnMut(&T)>;

/// A value whose writes are followed by callbacks to every registered listener.
pub struct Observed<T> {
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T> Observed<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Register a listener. Listeners run in registration order.
    pub fn on_update(&mut self, listener: impl FnMut(&T) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Store `value`, then notify listeners with the stored value.
    pub fn set(&mut self, value: T) {
        self.value = value;
        for listener in self.listeners.iter_mut() {
            listener(&self.value);
        }
    }

    #[cfg(test)]
    fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: Default> Default for Observed<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observed")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_observe_the_new_value_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut cell = Observed::new(0);

        let first = Rc::clone(&log);
        cell.on_update(move |value| first.borrow_mut().push(format!("first:{value}")));
        let second = Rc::clone(&log);
        cell.on_update(move |value| second.borrow_mut().push(format!("second:{value}")));

        cell.set(7);
        assert_eq!(*cell.get(), 7);
        assert_eq!(*log.borrow(), vec!["first:7", "second:7"]);
    }

    #[test]
    fn every_write_notifies_even_when_unchanged() {
        let hits = Rc::new(RefCell::new(0));
        let mut cell = Observed::new("same");
        let counter = Rc::clone(&hits);
        cell.on_update(move |_| *counter.borrow_mut() += 1);

        cell.set("same");
        cell.set("same");
        assert_eq!(*hits.borrow(), 2);
        assert_eq!(cell.listener_count(), 1);
    }
}
