use super::models::{
    Field,
    ParameterSet,
};

/// Current patient inputs. Knows nothing about projections.
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    current: ParameterSet,
}

impl ParameterStore {
    pub fn new(initial: ParameterSet) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> &ParameterSet {
        &self.current
    }

    pub fn set_field(&mut self, field: Field, value: f64) -> ParameterSet {
        self.current.set(field, value);
        self.current.clone()
    }

    pub fn replace(&mut self, parameters: ParameterSet) -> ParameterSet {
        self.current = parameters;
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field_touches_only_that_field() {
        let mut store = ParameterStore::default();
        let before = store.current().clone();

        let after = store.set_field(Field::Cholesterol, 260.0);

        for field in Field::ALL {
            if field == Field::Cholesterol {
                assert_eq!(after.get(field), 260.0);
            } else {
                assert_eq!(after.get(field), before.get(field), "{} changed", field);
            }
        }
        assert_eq!(store.current(), &after);
    }

    #[test]
    fn test_no_bounds_enforced() {
        let mut store = ParameterStore::default();
        let after = store.set_field(Field::Age, 140.0);
        assert_eq!(after.age, 140.0);
    }
}
