use waymark::{
    error::{DispatchError, RouteError},
    router::{MatchResult, RouteTable},
    App, Method, RequestHead,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn root_route_is_found() {
    init_logger();

    let mut table = RouteTable::new();
    table.register("GET", "/", "home", None).unwrap();

    let found = table.dispatch("GET", "/").found().unwrap();
    assert_eq!(*found.handler(), "home");
    assert!(found.values().is_empty());
}

#[test]
fn wrong_method_lists_allowed_methods() {
    init_logger();

    let mut table = RouteTable::new();
    table.register("GET", "/", (), None).unwrap();

    match table.dispatch("POST", "/") {
        MatchResult::MethodNotAllowed(allowed) => assert_eq!(allowed, [Method::Get]),
        res => panic!("unexpected result: {:?}", res),
    }

    let mut app = App::new();
    app.get("/", ()).unwrap();
    assert_eq!(
        app.dispatch(&RequestHead::post("/")).unwrap_err(),
        DispatchError::MethodNotAllowed {
            method: "POST".to_owned(),
            path: "/".to_owned(),
            allowed: vec![Method::Get],
        }
    );
}

#[test]
fn placeholder_value_is_captured() {
    init_logger();

    let mut table = RouteTable::new();
    table.register("GET", "/post/{id}", (), None).unwrap();

    let found = table.dispatch("GET", "/post/42").found().unwrap();
    assert_eq!(found.values(), ["42"]);
    assert_eq!(found.path().get("id"), Some("42"));
}

#[test]
fn unmatched_path_is_not_found() {
    init_logger();

    let mut table = RouteTable::new();
    table.register("GET", "/post/{id}", (), None).unwrap();
    table.register("POST", "/post", (), None).unwrap();

    assert_eq!(
        table.dispatch("GET", "/post").allowed_methods(),
        Some(&[Method::Post][..])
    );
    assert!(table.dispatch("GET", "/post/42/edit").is_not_found());
    assert!(table.dispatch("GET", "/about").is_not_found());
    assert!(table.dispatch("GET", "").is_not_found());

    let app = App::<()>::new();
    assert_eq!(
        app.dispatch(&RequestHead::get("/anything")).unwrap_err(),
        DispatchError::UrlNotFound {
            path: "/anything".to_owned()
        }
    );
}

#[test]
fn values_come_back_in_pattern_order() {
    init_logger();

    let mut table = RouteTable::new();
    table
        .register(
            "GET",
            r"/archive/{year:\d{4}}/{month:\d{2}}/{slug}",
            (),
            None,
        )
        .unwrap();

    let found = table.dispatch("GET", "/archive/2024/05/hello-world").found().unwrap();
    assert_eq!(found.values(), ["2024", "05", "hello-world"]);
    assert_eq!(
        found.path().iter().collect::<Vec<_>>(),
        [("year", "2024"), ("month", "05"), ("slug", "hello-world")]
    );

    assert!(table.dispatch("GET", "/archive/24/05/x").is_not_found());
}

#[test]
fn request_path_is_decoded_before_matching() {
    init_logger();

    let mut app = App::new();
    app.get("/tag/{tag}", "tag").unwrap();

    let found = app
        .dispatch(&RequestHead::get("/tag/caf%C3%A9?sort=new"))
        .unwrap();
    assert_eq!(&found.path()["tag"], "café");

    // encoded separator decodes into a real one, which the default rule rejects
    assert!(app.dispatch(&RequestHead::get("/tag/a%2Fb")).is_err());
}

#[test]
fn http_request_dispatch() {
    init_logger();

    let mut app = App::new();
    app.route("PUT", "/item/{id:\\d+}", "update").unwrap();

    let req = http::Request::builder()
        .method(http::Method::PUT)
        .uri("/item/7?notify=false")
        .body(())
        .unwrap();

    let out = app
        .call(&req, |handler, path| format!("{} {}", handler, &path["id"]))
        .unwrap();
    assert_eq!(out, "update 7");
}

#[test]
fn registration_errors() {
    let mut table = RouteTable::<()>::new();

    assert!(matches!(
        table.register("FOO", "/", (), None),
        Err(RouteError::InvalidMethod { .. })
    ));
    assert!(matches!(
        table.register("GET", "", (), None),
        Err(RouteError::EmptyRoute)
    ));
    assert!(matches!(
        table.register("GET", "/", (), Some("")),
        Err(RouteError::EmptyRouteName)
    ));
    assert!(matches!(
        table.register("GET", "/{id", (), None),
        Err(RouteError::InvalidPattern(_))
    ));

    assert!(table.is_empty());
}

#[test]
fn duplicate_name_keeps_old_route_dispatchable() {
    init_logger();

    let mut table = RouteTable::new();
    table.register("GET", "/page/{id}", "first", Some("page")).unwrap();
    table.register("GET", "/{section}/{id}", "second", Some("page")).unwrap();

    // reverse generation follows the newest registration
    assert_eq!(
        table.url_for("page", [("section", "page"), ("id", "1")]).unwrap(),
        "/page/1"
    );
    assert_eq!(*table.find_by_name("page").unwrap().handler(), "second");

    // dispatch still prefers the older route
    let found = table.dispatch("GET", "/page/1").found().unwrap();
    assert_eq!(*found.handler(), "first");
}

#[test]
fn clear_resets_an_instance() {
    let mut app = App::new();
    app.get_named("/", (), "home").unwrap();

    let mut other = App::new();
    other.get_named("/", (), "home").unwrap();

    app.clear();
    assert!(app.routes().is_empty());
    assert!(app.url_for("home", ()).is_err());

    // instances are independent
    assert_eq!(other.url_for("home", ()).unwrap(), "/");
}

#[test]
fn long_unmatched_request_is_not_found() {
    init_logger();

    let mut app = App::new();
    app.get("/{a}{b}{c}{d}.txt", "file").unwrap();
    app.get("/{a:.+}/{b:.+}/{c:.+}/{d:.+}/end", "deep").unwrap();

    let path = format!("/{}", "a".repeat(500));
    assert_eq!(
        app.dispatch(&RequestHead::get(path.clone())).unwrap_err(),
        DispatchError::UrlNotFound { path }
    );

    let path = format!("{}/x", "/a".repeat(250));
    assert!(app.dispatch(&RequestHead::get(path)).is_err());

    let path = format!("/{}.txt", "a".repeat(500));
    let found = app.dispatch(&RequestHead::get(path)).unwrap();
    assert_eq!(*found.handler(), "file");
}
