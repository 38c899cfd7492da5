use std::hash::Hash;

use serde::{Deserialize, Serialize};

/// A value carrying its own identity.
pub trait Identifiable {
    type Id: Clone + Eq + Hash;

    fn id(&self) -> Self::Id;
}

/// A value stored next to an identity it does not carry itself.
pub trait IdentifiedValue {
    type Id: Clone + Eq + Hash;
    type Value;

    fn id(&self) -> &Self::Id;

    fn value(&self) -> &Self::Value;

    fn into_parts(self) -> (Self::Id, Self::Value);
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identified<Id, Value> {
    pub id: Id,
    pub value: Value,
}

impl<Id, Value> Identified<Id, Value> {
    pub fn new(id: Id, value: Value) -> Self {
        Self { id, value }
    }
}

impl<Value: Identifiable> Identified<Value::Id, Value> {
    pub fn from_identifiable(value: Value) -> Self {
        Self {
            id: value.id(),
            value,
        }
    }
}

impl<Id: Clone + Eq + Hash, Value> Identifiable for Identified<Id, Value> {
    type Id = Id;

    fn id(&self) -> Id {
        self.id.clone()
    }
}

impl<Id: Clone + Eq + Hash, Value> IdentifiedValue for Identified<Id, Value> {
    type Id = Id;
    type Value = Value;

    fn id(&self) -> &Id {
        &self.id
    }

    fn value(&self) -> &Value {
        &self.value
    }

    fn into_parts(self) -> (Id, Value) {
        (self.id, self.value)
    }
}

impl<Id: Clone + Eq + Hash, Value> IdentifiedValue for (Id, Value) {
    type Id = Id;
    type Value = Value;

    fn id(&self) -> &Id {
        &self.0
    }

    fn value(&self) -> &Value {
        &self.1
    }

    fn into_parts(self) -> (Id, Value) {
        self
    }
}

pub trait AsIdentified: Identifiable + Sized {
    fn as_identified(&self) -> Identified<Self::Id, &Self> {
        Identified::new(Identifiable::id(self), self)
    }

    fn into_identified(self) -> Identified<Self::Id, Self> {
        Identified::from_identifiable(self)
    }
}

impl<T: Identifiable> AsIdentified for T {}
