use crate::string::IdentName;
use crate::value::{error::RuntimeErrorKind, Value};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeRef(u32);

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeRef>,
    values: HashMap<IdentName, Value>,
    constants: HashSet<IdentName>,
}

/// Chain of lexical scopes stored in an arena. Children point at their parent
/// by index and scopes are released in LIFO order by `exit_scope`.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
    current: ScopeRef,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Creates an environment holding only an empty global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            current: ScopeRef(0),
        }
    }

    pub fn global_scope(&self) -> ScopeRef {
        ScopeRef(0)
    }

    pub fn current_scope(&self) -> ScopeRef {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn enter_scope(&mut self) -> ScopeRef {
        self.scopes.push(Scope {
            parent: Some(self.current),
            ..Default::default()
        });
        self.current = ScopeRef((self.scopes.len() - 1) as u32);
        self.current
    }

    /// Discards the innermost scope. The global scope is never released.
    pub fn exit_scope(&mut self) {
        let Some(parent) = self.get_scope(self.current).parent else {
            return;
        };
        self.scopes.pop();
        self.current = parent;
    }

    fn get_scope(&self, handle: ScopeRef) -> &Scope {
        &self.scopes[handle.0 as usize]
    }

    fn get_scope_mut(&mut self, handle: ScopeRef) -> &mut Scope {
        &mut self.scopes[handle.0 as usize]
    }

    /// Finds the innermost scope that binds `name`.
    pub fn resolve(&self, name: &str) -> Option<ScopeRef> {
        let mut handle = Some(self.current);
        while let Some(current) = handle {
            let scope = self.get_scope(current);
            if scope.values.contains_key(name) {
                return Some(current);
            }
            handle = scope.parent;
        }
        None
    }

    pub fn declare(
        &mut self,
        name: &str,
        value: Value,
        constant: bool,
    ) -> Result<Value, RuntimeErrorKind> {
        let current = self.current;
        let scope = self.get_scope_mut(current);
        if scope.values.contains_key(name) {
            return Err(RuntimeErrorKind::DuplicateBinding(name.into()));
        }

        let name: IdentName = name.into();
        if constant {
            scope.constants.insert(name.clone());
        }
        scope.values.insert(name, value.clone());
        Ok(value)
    }

    pub fn assign(&mut self, name: &str, value: Value) -> Result<Value, RuntimeErrorKind> {
        let handle = self
            .resolve(name)
            .ok_or_else(|| RuntimeErrorKind::UnboundName(name.into()))?;
        let scope = self.get_scope_mut(handle);
        if scope.constants.contains(name) {
            return Err(RuntimeErrorKind::ConstantViolation(name.into()));
        }
        if let Some(slot) = scope.values.get_mut(name) {
            *slot = value.clone();
        }
        Ok(value)
    }

    pub fn lookup(&self, name: &str) -> Result<Value, RuntimeErrorKind> {
        self.resolve(name)
            .and_then(|handle| self.get_scope(handle).values.get(name))
            .cloned()
            .ok_or_else(|| RuntimeErrorKind::UnboundName(name.into()))
    }

    pub fn is_constant(&self, name: &str) -> bool {
        self.resolve(name)
            .is_some_and(|handle| self.get_scope(handle).constants.contains(name))
    }
}
