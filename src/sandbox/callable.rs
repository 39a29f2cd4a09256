use serde_json::{Map, Value};

use super::Sandbox;
use crate::error::Result;

/// An isolated callable, ready to be invoked any number of times.
///
/// `context` is bound as `this` and reflects the state of `this` after the
/// last call. `scope` names the free variables the code expects. With `safe`
/// off, a call fails instead of shadowing a global of the same name.
#[derive(Debug, Clone)]
pub struct Callable {
    pub code: String,
    pub context: Option<Value>,
    pub scope: Map<String, Value>,
    pub safe: bool,
    sandbox: Sandbox,
}

impl Callable {
    pub fn new(code: impl Into<String>, sandbox: Sandbox) -> Self {
        Self {
            code: code.into(),
            context: None,
            scope: Map::new(),
            safe: true,
            sandbox,
        }
    }

    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_scope(mut self, scope: Map<String, Value>) -> Self {
        self.scope = scope;
        self
    }

    pub fn call(&mut self, args: &[Value]) -> Result<Value> {
        self.sandbox
            .call(&self.code, args, &mut self.context, &self.scope, self.safe)
    }

    pub fn sandbox(&self) -> &Sandbox {
        &self.sandbox
    }
}
