use nexa_dom::{DomError, StyleMap, install_prefixed, property};

#[test]
fn test_installed_prefixes_resolve_names() {
    install_prefixed(["color", "-webkit-appearance", "-moz-user-select"]).unwrap();

    assert_eq!(property("appearance"), "-webkit-appearance");
    assert_eq!(property("user-select"), "-moz-user-select");
    assert_eq!(property("color"), "color");

    let mut style = StyleMap::new();
    style.set("appearance", "none");
    assert_eq!(style.to_string(), "-webkit-appearance:none;");
    assert!(style.has("-webkit-appearance"));
    assert!(style.remove("appearance"));

    assert_eq!(
        install_prefixed(["-ms-flex"]),
        Err(DomError::PrefixesInstalled)
    );
    assert_eq!(property("flex"), "flex");
}
