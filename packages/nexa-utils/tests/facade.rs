use futures::FutureExt;
use nexa_utils::{
    Environment, LocalHost, NextTick, StyleMap, TokenList, Value, VNode, camelize, logging, next_tick,
    parse_slots, run_until_idle, to_display_string,
};
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn test_logging_installs_once() {
    assert!(logging::init().is_ok());
    assert!(logging::init().is_err());
}

#[test]
fn test_default_next_tick() {
    let ran = Rc::new(Cell::new(false));
    let flag = ran.clone();
    next_tick(move || flag.set(true));

    assert!(!ran.get());
    run_until_idle();
    assert!(ran.get());
}

#[test]
fn test_component_helpers_together() {
    let mut style = StyleMap::from("color:red");
    style.set(&camelize("font-size"), "12px");
    assert_eq!(style.to_string(), "color:red;fontSize:12px;");

    let classes = TokenList::from(&Value::from(vec!["a", "b a"]));
    assert_eq!(classes.to_string(), "a b");

    let children = vec![Some(VNode::element("i").attr("slot", "icon"))];
    assert!(parse_slots(&children).contains("icon"));

    assert_eq!(to_display_string(&Value::Null), "");
}

#[test]
fn test_builder_with_environment() {
    let env = Environment::from_json(r#"{"inBrowser": true, "UA": "x"}"#).unwrap();
    let host = LocalHost::new();
    let scheduler = NextTick::builder()
        .host(&host.primitives())
        .environment(env)
        .build();

    let tick = scheduler.tick();
    host.run_until_idle();
    assert_eq!(tick.now_or_never(), Some(Ok(())));
}
