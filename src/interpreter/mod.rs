pub mod context;
mod tree;

use crate::ast::Program;
use crate::environment::Environment;
use crate::native::create_global_environment;
use crate::value::{error::RuntimeError, Value};
pub use tree::{Evaluate, TreeWalkEvaluator};

/// Sink for everything a running program writes.
pub trait SystemContext {
    fn writeln(&mut self, text: &str);
}

/// Reduces `node` to a value in `environment`.
pub fn evaluate<N: Evaluate + ?Sized>(
    node: &N,
    environment: &mut Environment,
    context: &mut dyn SystemContext,
) -> Result<Value, RuntimeError> {
    node.evaluate(environment, context)
}

/// An interpreter session: one persistent global environment plus an output sink.
pub struct TreeWalkInterpreter<C: SystemContext> {
    environment: Environment,
    context: C,
}

impl<C> TreeWalkInterpreter<C>
where
    C: SystemContext,
{
    /// Starts a session whose global scope holds the builtins.
    pub fn new(context: C) -> Self {
        Self::with_environment(create_global_environment(), context)
    }

    pub fn with_environment(environment: Environment, context: C) -> Self {
        Self {
            environment,
            context,
        }
    }

    pub fn run(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        program.evaluate(&mut self.environment, &mut self.context)
    }

    pub fn get_environment(&self) -> &Environment {
        &self.environment
    }

    pub fn get_context(&self) -> &C {
        &self.context
    }

    pub fn into_context(self) -> C {
        self.context
    }
}
