use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;

use crate::selector::Selector;

/// A type that can be discovered in a [`Namespace`].
pub trait Candidate: Send + Sync {
    fn name(&self) -> &str;

    /// Declared selectors. Must be a [`Selector::List`]; any other shape is
    /// reported as a configuration error when the registry index is built.
    /// `None` means the type does not take part in selection.
    fn selectable_for(&self) -> Option<Selector> {
        None
    }
}

impl fmt::Debug for dyn Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Candidate").field(&self.name()).finish()
    }
}

#[derive(Debug, Clone)]
pub enum Member {
    Type(Arc<dyn Candidate>),
    Constant(Value),
}

impl Member {
    pub fn as_candidate(&self) -> Option<&Arc<dyn Candidate>> {
        match self {
            Self::Type(candidate) => Some(candidate),
            Self::Constant(_) => None,
        }
    }
}

/// Named collection of members, enumerated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    name: String,
    members: IndexMap<String, Member>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn with_type<C: Candidate + 'static>(mut self, candidate: C) -> Self {
        self.define_type(Arc::new(candidate));
        self
    }

    pub fn with_constant(mut self, name: impl Into<String>, value: Value) -> Self {
        self.insert(name, Member::Constant(value));
        self
    }

    pub fn define_type(&mut self, candidate: Arc<dyn Candidate>) -> Option<Member> {
        let name = candidate.name().to_string();
        self.insert(name, Member::Type(candidate))
    }

    /// Redefining a name replaces the member but keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, member: Member) -> Option<Member> {
        self.members.insert(name.into(), member)
    }

    pub fn get(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    pub fn members(&self) -> impl Iterator<Item = (&str, &Member)> {
        self.members
            .iter()
            .map(|(name, member)| (name.as_str(), member))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn qualify(&self, member: &str) -> String {
        if self.name.is_empty() {
            return member.to_string();
        }
        format!("{}::{member}", self.name)
    }
}
