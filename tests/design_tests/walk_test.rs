use apidesign::{
    AttributeExpr, EvalConfig, EvalError, ExprKind, Expression, FileServerExpr, GrpcEndpointExpr,
    GrpcServiceExpr, HttpEndpointExpr, HttpServiceExpr, ResultTypeExpr, RootExpr, ServiceExpr,
    Stage, TransportOrdering, UserTypeExpr,
};
use pretty_assertions::assert_eq;

use super::{batch, calc_design, collect_walk};

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Two services, S1 with methods M1 and M2 and S2 with method M3. The HTTP
/// binding of S1 extends the one of S2 but is declared first.
fn two_service_design() -> RootExpr {
    let mut root = RootExpr::new();
    let mut s1 = ServiceExpr::new("S1");
    s1.add_method("M1");
    s1.add_method("M2");
    let mut s2 = ServiceExpr::new("S2");
    s2.add_method("M3");
    root.services = vec![s1, s2];

    let api = root.ensure_api();
    let mut h1 = HttpServiceExpr::new("S1").with_parent("S2");
    h1.endpoints.push(HttpEndpointExpr::new("M1", "S1"));
    h1.endpoints.push(HttpEndpointExpr::new("M2", "S1"));
    let mut h2 = HttpServiceExpr::new("S2");
    h2.endpoints.push(HttpEndpointExpr::new("M3", "S2"));
    h2.file_servers
        .push(FileServerExpr::new("S2", "public/index.html"));
    api.http.services = vec![h1, h2];
    root
}

#[test]
fn test_empty_design_walks_every_stage() {
    let mut root = RootExpr::new();
    let (seen, result) = collect_walk(&mut root);
    result.unwrap();

    assert_eq!(
        seen.iter().map(|(stage, _)| *stage).collect::<Vec<_>>(),
        Stage::all()
    );
    assert_eq!(seen[0].1, strings(&["API"]));
    assert!(seen[1..].iter().all(|(_, names)| names.is_empty()));
    assert!(root.api().is_some());
}

#[test]
fn test_services_then_methods() {
    let mut root = two_service_design();
    let (seen, result) = collect_walk(&mut root);
    result.unwrap();

    let services_at = seen.iter().position(|(s, _)| *s == Stage::Services);
    let methods_at = seen.iter().position(|(s, _)| *s == Stage::Methods);
    assert!(services_at < methods_at);
    assert_eq!(batch(&seen, Stage::Services), strings(&["S1", "S2"]));
    assert_eq!(batch(&seen, Stage::Methods), strings(&["M1", "M2", "M3"]));
}

#[test]
fn test_http_parent_is_walked_first() {
    let mut root = two_service_design();
    let (seen, result) = collect_walk(&mut root);
    result.unwrap();

    assert_eq!(batch(&seen, Stage::HttpServices), strings(&["S2", "S1"]));
    assert_eq!(batch(&seen, Stage::HttpEndpoints), strings(&["M3", "M1", "M2"]));
    assert_eq!(
        batch(&seen, Stage::HttpFileServers),
        strings(&["public/index.html"])
    );
    // The registry itself keeps the declaration order.
    let declared: Vec<&str> = root
        .api()
        .map(|api| api.http.services.iter().map(|s| s.service.as_str()).collect())
        .unwrap_or_default();
    assert_eq!(declared, vec!["S1", "S2"]);
}

#[test]
fn test_user_types_stage_presents_attributes() {
    let mut root = RootExpr::new();
    root.types
        .push(UserTypeExpr::new("Operands", AttributeExpr::new("Object")));
    root.result_types
        .push(ResultTypeExpr::new("Sum", "application/vnd.sum"));

    let mut kinds = Vec::new();
    root.walk_sets(&mut |set| {
        if matches!(set.stage, Stage::UserTypes | Stage::ResultTypes) {
            kinds.extend(set.iter().map(|e| (e.kind(), e.name().to_string())));
        }
        Ok(())
    })
    .unwrap();

    assert_eq!(
        kinds,
        vec![
            (ExprKind::Attribute, "Operands".to_string()),
            (ExprKind::ResultType, "Sum".to_string()),
        ]
    );
}

#[test]
fn test_grpc_endpoints_have_their_own_batch() {
    let mut root = two_service_design();
    let api = root.ensure_api();
    let mut g1 = GrpcServiceExpr::new("S1");
    g1.endpoints.push(GrpcEndpointExpr::new("M1", "S1"));
    api.grpc.services.push(g1);

    let (seen, result) = collect_walk(&mut root);
    result.unwrap();

    assert_eq!(batch(&seen, Stage::GrpcServices), strings(&["S1"]));
    assert_eq!(batch(&seen, Stage::GrpcEndpoints), strings(&["M1"]));
    assert_eq!(batch(&seen, Stage::HttpEndpoints), strings(&["M3", "M1", "M2"]));
}

#[test]
fn test_callback_failure_stops_the_walk() {
    let mut root = two_service_design();
    let before = root.clone();

    let mut stages = Vec::new();
    let err = root
        .walk_sets(&mut |set| {
            stages.push(set.stage);
            if set.stage == Stage::Services {
                return Err(EvalError::stage(set.stage, "service S1 is invalid"));
            }
            Ok(())
        })
        .unwrap_err();

    assert_eq!(
        stages,
        vec![Stage::Api, Stage::UserTypes, Stage::ResultTypes, Stage::Services]
    );
    assert_eq!(err.to_string(), "Failed to evaluate services: service S1 is invalid");
    assert_eq!(root, before);
}

#[test]
fn test_grpc_parent_cycle_fails_before_grpc_stages() {
    let mut root = RootExpr::new();
    let api = root.ensure_api();
    api.grpc.services = vec![
        GrpcServiceExpr::new("a").with_parent("b"),
        GrpcServiceExpr::new("b").with_parent("a"),
    ];

    let (seen, result) = collect_walk(&mut root);
    assert!(matches!(
        result,
        Err(EvalError::ParentCycle { ref names, .. }) if names == &strings(&["a", "b"])
    ));
    assert_eq!(seen.last().map(|(s, _)| *s), Some(Stage::HttpFileServers));
}

#[test]
fn test_multi_level_http_chain() {
    let build = |ordering| {
        let mut root = RootExpr::with_config(EvalConfig {
            transport_ordering: ordering,
            ..Default::default()
        });
        root.ensure_api().http.services = vec![
            HttpServiceExpr::new("grandchild").with_parent("child"),
            HttpServiceExpr::new("child").with_parent("parent"),
            HttpServiceExpr::new("parent"),
        ];
        root
    };

    let mut topological = build(TransportOrdering::Topological);
    let (seen, result) = collect_walk(&mut topological);
    result.unwrap();
    assert_eq!(
        batch(&seen, Stage::HttpServices),
        strings(&["parent", "child", "grandchild"])
    );

    // A single pass only swaps direct neighbours: "parent" stays last.
    let mut single_pass = build(TransportOrdering::SinglePass);
    let (seen, result) = collect_walk(&mut single_pass);
    result.unwrap();
    assert_eq!(
        batch(&seen, Stage::HttpServices),
        strings(&["child", "grandchild", "parent"])
    );
}

#[test]
fn test_calc_design_walk() {
    let mut root = calc_design();
    let (seen, result) = collect_walk(&mut root);
    result.unwrap();

    assert_eq!(seen.len(), 10);
    assert_eq!(batch(&seen, Stage::Api), strings(&["calc"]));
    assert_eq!(batch(&seen, Stage::UserTypes), strings(&["Operands"]));
    assert_eq!(batch(&seen, Stage::ResultTypes), strings(&["Sum"]));
    assert_eq!(batch(&seen, Stage::Methods), strings(&["add", "multiply", "reset"]));
    assert_eq!(batch(&seen, Stage::HttpServices), strings(&["calc", "admin"]));
    assert_eq!(
        batch(&seen, Stage::HttpEndpoints),
        strings(&["add", "multiply", "reset"])
    );
    assert_eq!(
        batch(&seen, Stage::HttpFileServers),
        strings(&["public/openapi.json"])
    );
    assert_eq!(batch(&seen, Stage::GrpcEndpoints), strings(&["add"]));
}

#[test]
fn test_expressions_borrow_registry_nodes() {
    let mut root = calc_design();
    let mut payloads = Vec::new();
    root.walk_sets(&mut |set| {
        for expr in set {
            if let Expression::Method(method) = expr {
                payloads.push(method.payload.clone());
            }
        }
        Ok(())
    })
    .unwrap();

    assert_eq!(
        payloads,
        vec![Some("Operands".to_string()), Some("Operands".to_string()), None]
    );
}
