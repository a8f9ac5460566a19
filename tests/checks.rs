use data_binding_engine as dbe;
use dbe::{CheckFunction, CheckRule, Registry, Resolver, Scope};
use serde_json::{json, Map, Value};

fn rules(value: Value) -> Vec<CheckRule> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn required_field_validation() {
    let rule = rules(json!([
        {"call": "required", "args": {"value": {"path": "/name"}}, "message": "Name is required"}
    ]));

    let failing = dbe::evaluate_checks(&rule, &json!({"name": ""}), &Scope::root());
    assert!(!failing.valid);
    assert_eq!(failing.errors, vec!["Name is required".to_string()]);

    let passing = dbe::evaluate_checks(&rule, &json!({"name": "Ann"}), &Scope::root());
    assert!(passing.valid);
    assert!(passing.errors.is_empty());
}

#[test]
fn phone_or_email() {
    let rule = rules(json!([{
        "or": [
            {"call": "required", "args": {"value": {"path": "/phone"}}},
            {"call": "required", "args": {"value": {"path": "/email"}}}
        ],
        "message": "phone or email required"
    }]));
    let model = json!({"phone": "", "email": "a@b.com"});
    let result = dbe::evaluate_checks(&rule, &model, &Scope::root());
    assert!(result.valid);
    assert!(result.errors.is_empty());
}

#[test]
fn email_and_length_builtins() {
    let rule = rules(json!([
        {"call": "email", "args": {"value": {"path": "/email"}}, "message": "bad email"},
        {"call": "length", "args": {"value": {"path": "/pin"}, "min": 4, "max": 4}, "message": "pin must be 4 digits"}
    ]));

    let ok = dbe::evaluate_checks(&rule, &json!({"email": "a@b.com", "pin": "1234"}), &Scope::root());
    assert!(ok.valid);

    let bad = dbe::evaluate_checks(&rule, &json!({"email": "a@b", "pin": "123"}), &Scope::root());
    assert_eq!(
        bad.errors,
        vec!["bad email".to_string(), "pin must be 4 digits".to_string()]
    );
}

#[test]
fn range_and_equals_builtins() {
    let rule = rules(json!([
        {"call": "range", "args": {"value": {"path": "/age"}, "min": 18}, "message": "must be adult"},
        {"call": "equals", "args": {"value": {"path": "/password"}, "other": {"path": "/confirm"}}, "message": "passwords differ"}
    ]));
    let model = json!({"age": 17, "password": "x1", "confirm": "x2"});
    let result = dbe::evaluate_checks(&rule, &model, &Scope::root());
    assert_eq!(
        result.errors,
        vec!["must be adult".to_string(), "passwords differ".to_string()]
    );
}

#[test]
fn nested_combinators() {
    let rule = rules(json!([{
        "and": [
            {"call": "required", "args": {"value": {"path": "/a"}}},
            {"or": [
                {"call": "required", "args": {"value": {"path": "/b"}}},
                {"call": "required", "args": {"value": {"path": "/c"}}}
            ]}
        ],
        "message": "a plus b or c"
    }]));
    let ok = dbe::evaluate_checks(&rule, &json!({"a": 1, "c": 2}), &Scope::root());
    assert!(ok.valid);
    let bad = dbe::evaluate_checks(&rule, &json!({"a": 1}), &Scope::root());
    assert_eq!(bad.errors, vec!["a plus b or c".to_string()]);
}

#[test]
fn unknown_function_fails_closed() {
    let rule = rules(json!([
        {"call": "noSuchCheck", "args": {}, "message": "unvalidatable"}
    ]));
    let result = dbe::evaluate_checks(&rule, &json!({}), &Scope::root());
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["unvalidatable".to_string()]);
}

struct StartsWith;

impl CheckFunction for StartsWith {
    fn name(&self) -> &'static str {
        "startsWith"
    }
    fn call(&self, args: &Map<String, Value>) -> bool {
        let value = args.get("value").and_then(Value::as_str).unwrap_or("");
        let prefix = args.get("prefix").and_then(Value::as_str).unwrap_or("");
        value.starts_with(prefix)
    }
}

#[test]
fn host_registered_function() {
    let mut registry = Registry::with_builtins();
    registry.register(StartsWith);
    let resolver = Resolver::new(registry);

    let rule = rules(json!([
        {"call": "startsWith", "args": {"value": {"path": "/sku"}, "prefix": "AB-"}, "message": "sku prefix"}
    ]));
    let ok = resolver.evaluate_checks(&rule, &json!({"sku": "AB-1"}), &Scope::root());
    assert!(ok.valid);
    let bad = resolver.evaluate_checks(&rule, &json!({"sku": "XY-1"}), &Scope::root());
    assert_eq!(bad.errors, vec!["sku prefix".to_string()]);
}

#[test]
fn defined_scalars_count_as_present() {
    let rule = rules(json!([
        {"call": "required", "args": {"value": {"path": "/accepted"}}, "message": "must answer"}
    ]));
    // `false` is an answer; only absence and emptiness fail.
    assert!(dbe::evaluate_checks(&rule, &json!({"accepted": false}), &Scope::root()).valid);
    assert!(dbe::evaluate_checks(&rule, &json!({"accepted": 0}), &Scope::root()).valid);
    assert!(!dbe::evaluate_checks(&rule, &json!({}), &Scope::root()).valid);
}
