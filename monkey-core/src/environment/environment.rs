use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::prelude::Value;

pub type Env = Rc<RefCell<Environment>>;

/// A single lexical scope. Lookups that miss fall through to `outer`.
#[derive(Default, Debug)]
pub struct Environment {
    pub store: HashMap<String, Value>,
    pub outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            outer: None
        }
    }

    pub fn new_root() -> Env {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn new_enclosed(outer: Env) -> Env {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            outer: Some(outer)
        }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref()?.borrow().get(name),
        }
    }

    /// Defines `name` in this scope, shadowing any outer binding.
    pub fn set(&mut self, name: impl Into<String>, value: Value) -> Value {
        self.store.insert(name.into(), value.clone());

        value
    }
}
