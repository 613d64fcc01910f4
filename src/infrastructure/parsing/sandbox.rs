//! Sandboxed evaluation of inline page scripts
//!
//! Storefront pages assign their data to bare globals (`var BandData = {...}`)
//! inside scripts that also poke at jQuery and page-framework hooks. We run
//! such a fragment in a fresh Boa context seeded only with the bindings the
//! caller supplies, then read back the globals it created as JSON.
//!
//! Every call builds and drops its own [`Context`]. Nothing leaks between
//! evaluations and the host process is never exposed to the script.

use boa_engine::{
    Context, JsNativeError, JsObject, JsResult, JsString, JsValue, NativeFunction, Source,
    js_string, object::ObjectInitializer, property::Attribute,
};
use serde_json::{Map, Value, json};
use tracing::{debug, trace};

use crate::infrastructure::parsing_error::{ExtractionError, ExtractionResult};

/// Upper bound on loop iterations per evaluation
const LOOP_ITERATION_LIMIT: u64 = 1_000_000;
/// Upper bound on call depth per evaluation
const RECURSION_LIMIT: usize = 256;

/// A stand-in value for a browser global.
#[derive(Debug, Clone, PartialEq)]
pub enum MockBinding {
    /// Plain data, converted to a JS value
    Json(Value),
    /// Callable that ignores its arguments and returns `undefined`
    Noop,
    /// jQuery-style initializer: a callable returning `{ ready: noop }`
    ReadyHook,
    /// Object whose members are themselves mocks
    Object(Vec<(String, MockBinding)>),
}

/// Named bindings injected into the sandbox's global scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SandboxGlobals {
    bindings: Vec<(String, MockBinding)>,
}

impl SandboxGlobals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a binding
    pub fn with(mut self, name: impl Into<String>, binding: MockBinding) -> Self {
        let name = name.into();
        self.bindings.retain(|(existing, _)| *existing != name);
        self.bindings.push((name, binding));
        self
    }

    /// No-op stand-ins for the globals storefront scripts touch while
    /// bootstrapping: jQuery (`$(...).ready`), `document`, and the page
    /// framework's controller registration.
    pub fn framework_mocks() -> Self {
        Self::new()
            .with("$", MockBinding::ReadyHook)
            .with("jQuery", MockBinding::ReadyHook)
            .with("document", MockBinding::Json(Value::Null))
            .with(
                "Control",
                MockBinding::Object(vec![("registerController".to_string(), MockBinding::Noop)]),
            )
    }

    /// Caller bindings layered over the `{ window: {} }` default
    fn merged_over_defaults(&self) -> Vec<(String, MockBinding)> {
        let mut merged = Self::new().with("window", MockBinding::Json(json!({})));
        for (name, binding) in &self.bindings {
            merged = merged.with(name.clone(), binding.clone());
        }
        merged.bindings
    }
}

/// Outcome of one evaluation.
///
/// `globals` holds every injected binding and every global the script
/// created, projected to JSON. Bindings with no JSON form (functions,
/// `undefined`) are left out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SandboxResult {
    pub value: Value,
    pub globals: Map<String, Value>,
}

impl SandboxResult {
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(name)
    }
}

/// Run `script` in a fresh sandbox seeded with `globals`.
pub fn evaluate(script: &str, globals: &SandboxGlobals) -> ExtractionResult<SandboxResult> {
    let mut context = Context::default();
    context
        .runtime_limits_mut()
        .set_loop_iteration_limit(LOOP_ITERATION_LIMIT);
    context.runtime_limits_mut().set_recursion_limit(RECURSION_LIMIT);

    let result = run_in_context(&mut context, script, globals).map_err(|e| {
        debug!("Script evaluation failed: {}", e);
        ExtractionError::script_evaluation(e)
    })?;

    trace!(
        "Script evaluation produced {} global bindings",
        result.globals.len()
    );
    Ok(result)
}

fn run_in_context(
    context: &mut Context,
    script: &str,
    globals: &SandboxGlobals,
) -> JsResult<SandboxResult> {
    // Grab the helpers before user code runs so the script cannot shadow them
    let projector = JsonProjector::capture(context)?;
    let builtin_names = projector.global_names(context)?;

    for (name, binding) in globals.merged_over_defaults() {
        let value = to_js_value(&binding, context)?;
        context.register_global_property(JsString::from(name.as_str()), value, Attribute::all())?;
    }

    let completion = context.eval(Source::from_bytes(script.as_bytes()))?;
    let value = projector.to_json(&completion, context).unwrap_or(Value::Null);

    let global_object = context.global_object();
    let mut bindings = Map::new();
    for name in projector.global_names(context)? {
        if builtin_names.contains(&name) {
            continue;
        }
        let binding = global_object.get(JsString::from(name.as_str()), context)?;
        match projector.to_json(&binding, context) {
            Some(json) => {
                bindings.insert(name, json);
            }
            None => trace!("Global '{}' has no JSON form, skipping", name),
        }
    }

    Ok(SandboxResult {
        value,
        globals: bindings,
    })
}

/// Converts JS values to JSON using the context's own `JSON.stringify`.
struct JsonProjector {
    stringify: JsObject,
    own_names: JsObject,
}

impl JsonProjector {
    fn capture(context: &mut Context) -> JsResult<Self> {
        let stringify = Self::builtin_method(context, js_string!("JSON"), js_string!("stringify"))?;
        let own_names = Self::builtin_method(
            context,
            js_string!("Object"),
            js_string!("getOwnPropertyNames"),
        )?;
        Ok(Self {
            stringify,
            own_names,
        })
    }

    fn builtin_method(context: &mut Context, owner: JsString, method: JsString) -> JsResult<JsObject> {
        let owner_value = context.global_object().get(owner, context)?;
        let owner_object = owner_value
            .as_object()
            .cloned()
            .ok_or_else(|| JsNativeError::typ().with_message("builtin object missing"))?;
        let method_value = owner_object.get(method, context)?;
        method_value
            .as_callable()
            .cloned()
            .ok_or_else(|| JsNativeError::typ().with_message("builtin method missing").into())
    }

    /// `None` when the value has no JSON representation or cannot be
    /// serialized (e.g. it is cyclic).
    fn to_json(&self, value: &JsValue, context: &mut Context) -> Option<Value> {
        let text = self
            .stringify
            .call(&JsValue::undefined(), &[value.clone()], context)
            .ok()?;
        let text = text.as_string()?.to_std_string_escaped();
        serde_json::from_str(&text).ok()
    }

    fn global_names(&self, context: &mut Context) -> JsResult<Vec<String>> {
        let global: JsValue = context.global_object().into();
        let names = self
            .own_names
            .call(&JsValue::undefined(), &[global], context)?;
        let names = self.to_json(&names, context).unwrap_or(Value::Null);

        Ok(names
            .as_array()
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[allow(clippy::unnecessary_wraps)]
fn noop(_this: &JsValue, _args: &[JsValue], _context: &mut Context) -> JsResult<JsValue> {
    Ok(JsValue::undefined())
}

#[allow(clippy::unnecessary_wraps)]
fn ready_hook(_this: &JsValue, _args: &[JsValue], context: &mut Context) -> JsResult<JsValue> {
    let handle = ObjectInitializer::new(context)
        .function(NativeFunction::from_fn_ptr(noop), js_string!("ready"), 1)
        .build();
    Ok(handle.into())
}

fn to_js_value(binding: &MockBinding, context: &mut Context) -> JsResult<JsValue> {
    match binding {
        MockBinding::Json(value) => JsValue::from_json(value, context),
        MockBinding::Noop => Ok(NativeFunction::from_fn_ptr(noop)
            .to_js_function(context.realm())
            .into()),
        MockBinding::ReadyHook => Ok(NativeFunction::from_fn_ptr(ready_hook)
            .to_js_function(context.realm())
            .into()),
        MockBinding::Object(members) => {
            let mut values = Vec::with_capacity(members.len());
            for (name, member) in members {
                values.push((JsString::from(name.as_str()), to_js_value(member, context)?));
            }
            let mut initializer = ObjectInitializer::new(context);
            for (name, value) in values {
                initializer.property(name, value, Attribute::all());
            }
            Ok(initializer.build().into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_global_assignment_is_visible() {
        let result = evaluate(r#"var BandData = {name: "Test"}"#, &SandboxGlobals::new()).unwrap();
        assert_eq!(result.globals["BandData"]["name"], "Test");
    }

    #[test]
    fn test_syntax_error_is_extraction_error() {
        let err = evaluate("var BandData = {name: ", &SandboxGlobals::new()).unwrap_err();
        assert!(matches!(err, ExtractionError::ScriptEvaluation { .. }));
        assert!(err.to_string().starts_with("Could not extract script data"));
    }

    #[test]
    fn test_thrown_error_is_extraction_error() {
        let err = evaluate(r#"throw new Error("boom")"#, &SandboxGlobals::new()).unwrap_err();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_empty_script_has_only_defaults() {
        let result = evaluate("", &SandboxGlobals::new()).unwrap();
        assert_eq!(result.value, Value::Null);
        assert_eq!(result.globals.get("window"), Some(&json!({})));
        assert_eq!(result.globals.len(), 1);
    }

    #[test]
    fn test_completion_value_is_returned() {
        let result = evaluate("1 + 2", &SandboxGlobals::new()).unwrap();
        assert_eq!(result.value, json!(3));
    }

    #[test]
    fn test_framework_mocks_absorb_bootstrap_calls() {
        let script = r#"
            $(document).ready(function () { throw new Error("never runs"); });
            Control.registerController("band", function () {});
            var TralbumData = { current: { title: "Album" }, trackinfo: [] };
        "#;
        let result = evaluate(script, &SandboxGlobals::framework_mocks()).unwrap();
        assert_eq!(result.globals["TralbumData"]["current"]["title"], "Album");
        assert_eq!(result.globals.get("document"), Some(&Value::Null));
        // Callables have no JSON form
        assert!(result.globals.get("$").is_none());
    }

    #[test]
    fn test_bootstrap_calls_fail_without_mocks() {
        let result = evaluate("$(document).ready(function () {});", &SandboxGlobals::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_caller_bindings_override_window_default() {
        let globals = SandboxGlobals::new().with("window", MockBinding::Json(json!({ "x": 1 })));
        let result = evaluate("window.y = 2;", &globals).unwrap();
        assert_eq!(result.globals["window"], json!({ "x": 1, "y": 2 }));
    }

    #[test]
    fn test_let_bindings_are_not_globals() {
        let result = evaluate("let hidden = 1; var shown = 2;", &SandboxGlobals::new()).unwrap();
        assert!(result.globals.get("hidden").is_none());
        assert_eq!(result.globals["shown"], json!(2));
    }

    #[test]
    fn test_contexts_are_not_shared() {
        evaluate("var Leaked = 1;", &SandboxGlobals::new()).unwrap();
        let second = evaluate("", &SandboxGlobals::new()).unwrap();
        assert!(second.globals.get("Leaked").is_none());
    }

    #[test]
    fn test_runaway_loop_is_stopped() {
        let result = evaluate("while (true) {}", &SandboxGlobals::new());
        assert!(result.is_err());
    }
}
