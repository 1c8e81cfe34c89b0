use ctrlroute::router::{RouteMatch, RouteOrder, RouteTable};
use ctrlroute::ParamValue;
use http::Method;

fn zoo_table(order: RouteOrder) -> RouteTable {
    let mut table = RouteTable::new(order);
    let routes = [
        (Method::GET, "/", "root_handler"),
        (Method::GET, "zoo/animals", "get_animals"),
        (Method::POST, "zoo/animals", "create_animal"),
        (Method::GET, "zoo/animals/{id:int}", "get_animal"),
        (Method::PUT, "zoo/animals/{id:int}", "update_animal"),
        (Method::DELETE, "zoo/animals/{id:int}", "delete_animal"),
        (Method::GET, "zoo/animals/{name}", "get_animal_by_name"),
        (Method::GET, "zoo/animals/{id:int}/toys/{toy_id:int}", "animal_toy"),
        (Method::GET, "zoo/{category}/animals", "category_animals"),
        (Method::HEAD, "zoo/health", "health_check"),
    ];
    for (method, template, handler) in routes {
        table.register(method, template, handler).unwrap();
    }
    table
}

fn assert_route_match(table: &RouteTable, method: Method, path: &str, expected_handler: &str) {
    match table.route(&method, path) {
        Some(RouteMatch { route, .. }) => {
            assert_eq!(
                route.handler_name.as_ref(),
                expected_handler,
                "Handler mismatch for {} {}",
                method,
                path
            );
        }
        None => {
            assert_eq!(
                expected_handler, "<none>",
                "Expected route to match for {} {}",
                method, path
            );
        }
    }
}

#[test]
fn test_router_root() {
    let table = zoo_table(RouteOrder::Specificity);
    assert_route_match(&table, Method::GET, "/", "root_handler");
}

#[test]
fn test_router_verbs() {
    let table = zoo_table(RouteOrder::Specificity);
    assert_route_match(&table, Method::GET, "/zoo/animals", "get_animals");
    assert_route_match(&table, Method::POST, "/zoo/animals", "create_animal");
    assert_route_match(&table, Method::PUT, "/zoo/animals/3", "update_animal");
    assert_route_match(&table, Method::DELETE, "/zoo/animals/3", "delete_animal");
    assert_route_match(&table, Method::HEAD, "/zoo/health", "health_check");
    assert_route_match(&table, Method::PATCH, "/zoo/animals/3", "<none>");
}

#[test]
fn test_router_typed_parameter_and_fallback() {
    let table = zoo_table(RouteOrder::Specificity);
    assert_route_match(&table, Method::GET, "/zoo/animals/123", "get_animal");
    assert_route_match(&table, Method::GET, "/zoo/animals/leo", "get_animal_by_name");
}

#[test]
fn test_router_parameter_between_literals() {
    let table = zoo_table(RouteOrder::Specificity);
    assert_route_match(&table, Method::GET, "/zoo/animals/animals", "get_animal_by_name");
    assert_route_match(&table, Method::GET, "/zoo/birds/animals", "category_animals");
}

#[test]
fn test_router_extracts_typed_params() {
    let table = zoo_table(RouteOrder::Specificity);
    let m = table
        .route(&Method::GET, "/zoo/animals/12/toys/99")
        .expect("route should match");
    assert_eq!(m.handler_name(), "animal_toy");
    assert_eq!(m.params.get("id"), Some(&ParamValue::Int(12)));
    assert_eq!(m.params.get_int("toy_id"), Some(99));
    assert_eq!(m.route.template(), "zoo/animals/{id:int}/toys/{toy_id:int}");
}

#[test]
fn test_router_no_match() {
    let table = zoo_table(RouteOrder::Specificity);
    assert_route_match(&table, Method::GET, "/does/not/exist", "<none>");
    assert_route_match(&table, Method::GET, "/zoo/animals/1/toys/x", "<none>");
    assert_route_match(&table, Method::GET, "/ZOO/animals", "<none>");
}

#[test]
fn test_declaration_order_changes_winner() {
    let mut table = RouteTable::new(RouteOrder::Declaration);
    table.register(Method::GET, "zoo/{area}", "area").unwrap();
    table.register(Method::GET, "zoo/health", "health").unwrap();
    assert_route_match(&table, Method::GET, "/zoo/health", "area");

    let mut table = RouteTable::new(RouteOrder::Specificity);
    table.register(Method::GET, "zoo/{area}", "area").unwrap();
    table.register(Method::GET, "zoo/health", "health").unwrap();
    assert_route_match(&table, Method::GET, "/zoo/health", "health");
}

#[test]
fn test_routing_is_deterministic() {
    let a = zoo_table(RouteOrder::Specificity);
    let b = zoo_table(RouteOrder::Specificity);
    for path in ["/zoo/animals/5", "/zoo/animals/rex", "/zoo/x/animals", "/"] {
        let ha = a.route(&Method::GET, path).map(|m| m.handler_name().to_string());
        let hb = b.route(&Method::GET, path).map(|m| m.handler_name().to_string());
        assert_eq!(ha, hb, "{path}");
    }
}

#[test]
fn test_failed_registration_does_not_poison_table() {
    let mut table = zoo_table(RouteOrder::Specificity);
    let before = table.len();
    assert!(table
        .register(Method::GET, "zoo/{id:float}", "bad")
        .is_err());
    assert!(table.register(Method::GET, "zoo/{{id}}", "bad").is_err());
    assert_eq!(table.len(), before);
    assert_route_match(&table, Method::GET, "/zoo/animals", "get_animals");
}
