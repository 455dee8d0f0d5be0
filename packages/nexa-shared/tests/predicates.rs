use nexa_shared::is::{ELEMENT_ATTR_KEY, ELEMENT_ATTR_SYMBOL};
use nexa_shared::*;

#[test]
fn test_undefined_covers_null() {
    assert!(is_undefined(&Value::Undefined));
    assert!(is_undefined(&Value::Null));
    assert!(!is_undefined(&Value::from(0)));
    assert!(is_defined(&Value::from("")));
}

#[test]
fn test_true_false_are_strict() {
    assert!(is_true(&Value::Bool(true)));
    assert!(!is_true(&Value::from(1)));
    assert!(is_false(&Value::Bool(false)));
    assert!(!is_false(&Value::Null));
}

#[test]
fn test_type_tags() {
    assert_eq!(to_raw_type(&Value::Object(Object::new())), "Object");
    assert_eq!(to_raw_type(&Value::Array(vec![])), "Array");
    assert_eq!(to_raw_type(&Value::regexp("a+", "g")), "RegExp");
    assert_eq!(to_raw_type(&Value::Null), "Null");

    assert!(is_plain_object(&Value::Object(Object::new())));
    assert!(!is_plain_object(&Value::Array(vec![])));
    assert!(is_regexp(&Value::regexp("x", "")));

    assert!(is_object(&Value::Array(vec![])));
    assert!(!is_object(&Value::Null));
    assert!(!is_object(&Value::function("f", "function f() {}")));

    assert!(is_primitive(&symbol("id")));
    assert!(!is_primitive(&Value::Undefined));
}

#[test]
fn test_valid_array_index() {
    assert!(is_valid_array_index(&Value::from(0)));
    assert!(is_valid_array_index(&Value::from("12")));
    assert!(!is_valid_array_index(&Value::from(-1)));
    assert!(!is_valid_array_index(&Value::from(1.5)));
    assert!(!is_valid_array_index(&Value::from("3abc")));
    assert!(!is_valid_array_index(&Value::from(f64::INFINITY)));
    assert!(!is_valid_array_index(&Value::Undefined));
}

#[test]
fn test_native_detection() {
    let native = Value::function("Promise", "function Promise() { [native code] }");
    let shim = Value::function("Promise", "function Promise(executor) { this.q = []; }");
    assert!(is_native(&native));
    assert!(!is_native(&shim));
    assert!(!is_native(&Value::from("native code")));
}

#[test]
fn test_framework_element_marker() {
    let mut node = Object::new();
    node.insert("nodeName", "div");
    assert!(!is_framework_element(&Value::Object(node.clone())));

    node.insert(ELEMENT_ATTR_KEY, Value::Null);
    assert!(!is_framework_element(&Value::Object(node.clone())));

    node.insert(ELEMENT_ATTR_SYMBOL, Object::new());
    assert!(is_framework_element(&Value::Object(node)));
}

#[test]
fn test_display_string() {
    assert_eq!(to_display_string(&Value::Null), "");
    assert_eq!(to_display_string(&Value::Undefined), "");
    assert_eq!(to_display_string(&Value::from(3)), "3");
    assert_eq!(to_display_string(&Value::Bool(false)), "false");

    let obj: Object = [("b", Value::from(1)), ("a", Value::Undefined)]
        .into_iter()
        .collect();
    let value = Value::Array(vec![Value::Object(obj), Value::Undefined]);
    assert_eq!(
        to_display_string(&value),
        "[\n  {\n    \"b\": 1\n  },\n  null\n]"
    );
}

#[test]
fn test_display_string_numbers_match_template_output() {
    let value = Value::from(vec![
        Value::from(9_007_199_254_740_992.0),
        Value::from(1.7e18),
        Value::from(1e21),
        Value::from(0.5),
        Value::from(f64::NAN),
    ]);
    assert_eq!(
        to_display_string(&value),
        "[\n  9007199254740992,\n  1700000000000000000,\n  1e+21,\n  0.5,\n  null\n]"
    );
}

#[test]
fn test_to_number_falls_back_to_input() {
    assert_eq!(to_number("3.14"), Coerced::Number(3.14));
    assert_eq!(to_number("12px"), Coerced::Number(12.0));
    assert_eq!(to_number("abc"), Coerced::Original("abc"));
}
