//! Embedded QuickJS environment that isolated callables run in.

mod callable;
mod convert;

use std::fmt;

use rquickjs::context::EvalOptions;
use rquickjs::function::{Rest, This};
use rquickjs::{Context, Ctx, Function, Runtime, Value};
use serde_json::Map;
use tracing::{debug, warn};

use crate::error::{ExtractError, Result};
use convert::{caught, from_js, to_js};

pub use callable::Callable;

/// One QuickJS runtime and its global environment.
///
/// Clones share the same engine, so every handle produced by an extractor
/// sees the same globals.
#[derive(Clone)]
pub struct Sandbox {
    // kept alive for as long as the context is
    _runtime: Runtime,
    context: Context,
}

impl fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sandbox").finish_non_exhaustive()
    }
}

impl Sandbox {
    pub fn new() -> Result<Self> {
        let runtime = Runtime::new()?;
        let context = Context::full(&runtime)?;
        Ok(Self {
            _runtime: runtime,
            context,
        })
    }

    /// Evaluate a script in the global scope and return its completion value.
    pub fn evaluate(&self, code: &str) -> Result<serde_json::Value> {
        self.context.with(|ctx| {
            let value: Value = caught(&ctx, ctx.eval_with_options(code, sloppy()))?;
            from_js(&ctx, value)
        })
    }

    /// Current value of a global, `null` when it is not defined.
    pub fn global(&self, name: &str) -> Result<serde_json::Value> {
        self.context.with(|ctx| {
            let value: Value = caught(&ctx, ctx.globals().get(name))?;
            from_js(&ctx, value)
        })
    }

    pub fn set_global(&self, name: &str, value: &serde_json::Value) -> Result<()> {
        self.context.with(|ctx| {
            let value = to_js(&ctx, value)?;
            caught(&ctx, ctx.globals().set(name, value))
        })
    }

    pub fn remove_global(&self, name: &str) -> Result<()> {
        self.context.with(|ctx| caught(&ctx, ctx.globals().remove(name)))
    }

    /// Compile `code` and invoke it with `this` bound to `context`.
    ///
    /// Scope entries are bound through an object environment wrapped around
    /// the code, never as globals, so any string works as a key. With `safe`
    /// off, a scope key that shadows a defined global is refused before
    /// anything runs.
    ///
    /// `context` is updated with the state of `this` after the call, also when
    /// the call throws. If `this` can no longer be read back (a cycle, say),
    /// `context` keeps its previous value and the call's own outcome stands.
    /// A returned promise is settled on the engine's job queue.
    pub fn call(
        &self,
        code: &str,
        args: &[serde_json::Value],
        context: &mut Option<serde_json::Value>,
        scope: &Map<String, serde_json::Value>,
        safe: bool,
    ) -> Result<serde_json::Value> {
        self.context.with(|ctx| {
            if !safe {
                check_collisions(&ctx, scope)?;
            }

            let callable = bind_scope(&ctx, code, scope)?;
            let this = match context.as_ref() {
                Some(value) => to_js(&ctx, value)?,
                None => Value::new_undefined(ctx.clone()),
            };
            let args = args
                .iter()
                .map(|arg| to_js(&ctx, arg))
                .collect::<Result<Vec<_>>>()?;

            debug!(args = args.len(), scope = scope.len(), safe, "invoking callable");
            let result = invoke(&ctx, &callable, this.clone(), args);

            if context.is_some() {
                match from_js(&ctx, this) {
                    Ok(value) => *context = Some(value),
                    Err(error) => warn!(%error, "could not read back call context"),
                }
            }
            from_js(&ctx, result?)
        })
    }
}

fn sloppy() -> EvalOptions {
    let mut options = EvalOptions::default();
    options.strict = false;
    options
}

fn check_collisions(ctx: &Ctx<'_>, scope: &Map<String, serde_json::Value>) -> Result<()> {
    let globals = ctx.globals();
    for name in scope.keys() {
        let existing: Value = caught(ctx, globals.get(name.as_str()))?;
        if !existing.is_undefined() {
            return Err(ExtractError::ScopeCollision { name: name.clone() });
        }
    }
    Ok(())
}

const SCOPE_PARAM: &str = "__callable_scope__";

/// Evaluate `code` inside a `with` block over a prototype-less copy of `scope`.
fn bind_scope<'js>(
    ctx: &Ctx<'js>,
    code: &str,
    scope: &Map<String, serde_json::Value>,
) -> Result<Function<'js>> {
    let factory: Function = caught(
        ctx,
        ctx.eval_with_options(
            format!(
                "(function ({SCOPE_PARAM}) {{ with (Object.setPrototypeOf({SCOPE_PARAM}, null)) {{ return {code}\n}} }})"
            ),
            sloppy(),
        ),
    )?;
    let values = to_js(ctx, &serde_json::Value::Object(scope.clone()))?;
    caught(ctx, factory.call((values,)))
}

fn invoke<'js>(
    ctx: &Ctx<'js>,
    callable: &Function<'js>,
    this: Value<'js>,
    args: Vec<Value<'js>>,
) -> Result<Value<'js>> {
    let result: Value = caught(ctx, callable.call((This(this), Rest(args))))?;
    if let Some(promise) = result.as_promise() {
        return caught(ctx, promise.finish::<Value>());
    }
    Ok(result)
}
