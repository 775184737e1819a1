use apidesign::{
    EvalConfig, Expr, ResultTypeExpr, RootExpr, SchemeKind, TransportOrdering, UserType,
};
use pretty_assertions::assert_eq;

use super::calc_design;

#[test]
fn test_calc_design_lookups() {
    let root = calc_design();

    assert!(matches!(
        root.lookup_user_type("Operands"),
        Some(UserType::User(t)) if t.attribute.is_required("a")
    ));
    assert_eq!(
        root.lookup_user_type("Sum")
            .and_then(|t| t.as_result_type())
            .map(|t| t.identifier.as_str()),
        Some("application/vnd.calc.sum")
    );
    assert!(root.lookup_user_type("Product").is_none());

    let calc = root.lookup_service("calc").unwrap();
    assert_eq!(calc.method("add").and_then(|m| m.result.as_deref()), Some("Sum"));
    assert_eq!(calc.meta.last_value("openapi:tag"), Some("math"));

    assert_eq!(
        root.lookup_error("overflow").map(|e| e.type_name.as_str()),
        Some("ErrorResult")
    );
    assert_eq!(
        root.lookup_scheme("api_key").map(|s| s.kind),
        Some(SchemeKind::ApiKey)
    );
    assert_eq!(
        root.conversion("Sum").map(|m| m.external.path.as_str()),
        Some("i64")
    );
}

#[test]
fn test_generated_result_types() {
    let mut root = calc_design();

    assert!(root
        .lookup_generated_result_type("application/vnd.calc.sum")
        .is_none());
    assert_eq!(
        root.lookup_generated_result_type("application/vnd.calc.error")
            .map(|t| t.name.as_str()),
        Some("ErrorResult")
    );

    root.generated_types
        .insert_unique(ResultTypeExpr::new("Other", "application/vnd.calc.error"));
    assert_eq!(root.generated_types.len(), 1);
}

#[test]
fn test_http_schemes() {
    let root = calc_design();
    assert_eq!(root.http_schemes(), vec!["grpc", "http", "https"]);
}

#[test]
fn test_validate_reports_missing_api_once() {
    let mut root = calc_design();
    assert!(root.validate().is_empty());

    root.api = None;
    let errors = root.validate();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.to_string(), "design: Missing API declaration");
    assert!(errors.into_result().is_err());
}

#[test]
fn test_ordered_services_follow_config() {
    let mut root = calc_design();
    let names = |root: &RootExpr| -> Vec<String> {
        root.ordered_http_services()
            .unwrap()
            .iter()
            .map(|s| s.eval_name())
            .collect()
    };

    assert_eq!(
        names(&root),
        vec!["HTTP service \"calc\"", "HTTP service \"admin\""]
    );

    root.set_config(EvalConfig {
        transport_ordering: TransportOrdering::SinglePass,
        ..Default::default()
    });
    assert_eq!(
        names(&root),
        vec!["HTTP service \"calc\"", "HTTP service \"admin\""]
    );
    assert_eq!(root.ordered_grpc_services().unwrap().len(), 1);
}

#[test]
fn test_invalid_json_is_a_config_error() {
    let result = RootExpr::from_json(r#"{"services": 42}"#);
    assert!(matches!(result, Err(apidesign::Error::Config(_))));
}

#[test]
fn test_json_round_trip_keeps_design() {
    let root = calc_design();
    let json = serde_json::to_string(&root).unwrap();
    let back = RootExpr::from_json(&json).unwrap();
    assert_eq!(back, root);
}
