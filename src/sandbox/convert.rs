//! Moving values between `serde_json` and the engine.
//!
//! Everything crosses the boundary as JSON text, so functions and symbols do
//! not survive the trip and `undefined` comes back as `null`.

use rquickjs::{CatchResultExt, CaughtError, Ctx, Value};

use crate::error::{ExtractError, Result};

pub(crate) fn to_js<'js>(ctx: &Ctx<'js>, value: &serde_json::Value) -> Result<Value<'js>> {
    let json = serde_json::to_string(value)?;
    caught(ctx, ctx.json_parse(json))
}

pub(crate) fn from_js<'js>(ctx: &Ctx<'js>, value: Value<'js>) -> Result<serde_json::Value> {
    if value.is_undefined() {
        return Ok(serde_json::Value::Null);
    }
    match caught(ctx, ctx.json_stringify(value))? {
        Some(json) => Ok(serde_json::from_str(&json.to_string()?)?),
        None => Ok(serde_json::Value::Null),
    }
}

/// Convert an engine result, pulling a thrown JavaScript value into [`ExtractError::Runtime`].
pub(crate) fn caught<'js, T>(ctx: &Ctx<'js>, result: rquickjs::Result<T>) -> Result<T> {
    result.catch(ctx).map_err(|error| match error {
        CaughtError::Error(rquickjs::Error::WouldBlock) => ExtractError::PromisePending,
        CaughtError::Error(error) => ExtractError::Engine(error),
        thrown => ExtractError::Runtime(thrown.to_string().trim_end().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rquickjs::{Context, Runtime};
    use serde_json::json;

    fn with_ctx<R>(f: impl FnOnce(Ctx<'_>) -> R) -> R {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        context.with(f)
    }

    #[test]
    fn test_object_survives_the_boundary() {
        with_ctx(|ctx| {
            let value = json!({ "prop": "val", "list": [1, 2.5, null, true] });
            let js = to_js(&ctx, &value).unwrap();
            assert!(js.is_object());
            assert_eq!(from_js(&ctx, js).unwrap(), value);
        });
    }

    #[test]
    fn test_undefined_and_functions_become_null() {
        with_ctx(|ctx| {
            let undefined = Value::new_undefined(ctx.clone());
            assert_eq!(from_js(&ctx, undefined).unwrap(), serde_json::Value::Null);
            let func: Value = ctx.eval("(function () {})").unwrap();
            assert_eq!(from_js(&ctx, func).unwrap(), serde_json::Value::Null);
        });
    }

    #[test]
    fn test_thrown_error_is_runtime() {
        with_ctx(|ctx| {
            let result = caught(&ctx, ctx.eval::<Value, _>("throw new Error('boom')"));
            match result {
                Err(ExtractError::Runtime(message)) => assert!(message.contains("boom"), "{message}"),
                other => panic!("expected runtime error, got {other:?}"),
            }
        });
    }
}
