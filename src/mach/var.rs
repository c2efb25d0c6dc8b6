use std::collections::HashMap;

/// ## Variable memory
///
/// Every variable is a signed 64-bit integer.

#[derive(Debug, Default, Clone)]
pub struct Var {
    vars: HashMap<String, i64>,
}

impl Var {
    pub fn new() -> Var {
        Var::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
    }

    pub fn fetch(&self, var_name: &str) -> Option<i64> {
        self.vars.get(var_name).copied()
    }

    pub fn store(&mut self, var_name: &str, value: i64) {
        match self.vars.get_mut(var_name) {
            Some(var) => *var = value,
            None => {
                self.vars.insert(var_name.to_string(), value);
            }
        };
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
