use waymark::{
    error::UrlGenerationError,
    router::{append_segments, RouteTable, UrlGenerator},
    App, Params, RequestHead,
};

fn table() -> RouteTable<()> {
    let mut table = RouteTable::new();
    table.register("GET", "/", (), Some("home.index")).unwrap();
    table
        .register("GET", "/user/{user}/post/{post}", (), Some("user.post.show"))
        .unwrap();
    table.register("GET", "/user/{user}", (), Some("user.show")).unwrap();
    table
        .register("POST", r"/file/{name}.{ext:[a-z0-9]{1,5}}", (), Some("file.upload"))
        .unwrap();
    table
        .register("GET", r"/v{version:\d+}/docs/{page}", (), Some("docs"))
        .unwrap();
    table
}

#[test]
fn named_placeholders() {
    assert_eq!(
        table()
            .url_for("user.post.show", [("user", 1), ("post", 42)])
            .unwrap(),
        "/user/1/post/42"
    );
}

#[test]
fn missing_parameter() {
    let err = table()
        .url_for("user.post.show", [("user", 42)])
        .unwrap_err();

    assert!(matches!(
        err,
        UrlGenerationError::MissingParameter { ref name, .. } if name == "post"
    ));
}

#[test]
fn value_with_separator_fails_default_rule() {
    let err = table().url_for("user.show", ["/42"]).unwrap_err();
    assert!(matches!(err, UrlGenerationError::ParameterFormat { .. }));
}

#[test]
fn unknown_name() {
    assert_eq!(
        table().url_for("user.edit", ()).unwrap_err(),
        UrlGenerationError::RouteNotFound {
            name: "user.edit".to_owned()
        }
    );
}

#[test]
fn generated_paths_dispatch_back_to_their_route() {
    let table = table();
    let generator = UrlGenerator::new(&table);

    let cases: Vec<(&str, &str, Params)> = vec![
        ("GET", "home.index", Params::new()),
        ("GET", "user.show", Params::new().with("user", "ana")),
        (
            "GET",
            "user.post.show",
            Params::new().with("user", 7).with("post", "hello-world"),
        ),
        (
            "POST",
            "file.upload",
            Params::new().with("name", "report.final").with("ext", "pdf"),
        ),
        (
            "GET",
            "docs",
            Params::new().with("version", 12).with("page", "intro"),
        ),
    ];

    for (method, name, params) in cases {
        let route = table.find_by_name(name).unwrap();
        let expected = route
            .placeholders()
            .map(|placeholder| {
                params
                    .clone()
                    .take(placeholder.name())
                    .expect("every placeholder has a value")
            })
            .collect::<Vec<_>>();

        let path = generator.generate(name, params).unwrap();

        let found = table
            .dispatch(method, &path)
            .found()
            .unwrap_or_else(|| panic!("{} did not dispatch", path));

        assert_eq!(found.route().name(), Some(name));
        assert_eq!(found.values(), expected);
    }
}

#[test]
fn ambiguous_pattern_does_not_round_trip() {
    let mut table = RouteTable::new();
    table.register("GET", "/{a}-{b}", (), Some("pair")).unwrap();

    let path = table.url_for("pair", [("a", "x-y"), ("b", "z")]).unwrap();
    assert_eq!(path, "/x-y-z");

    // dispatch takes the shortest value for `a`
    let found = table.dispatch("GET", &path).found().unwrap();
    assert_eq!(found.route().name(), Some("pair"));
    assert_eq!(found.values(), ["x", "y-z"]);
    assert_eq!(found.path().get("a"), Some("x"));
    assert_eq!(found.path().get("b"), Some("y-z"));
}

#[test]
fn positional_and_keyed_values_mix() {
    let table = table();

    let params = Params::new().push(3).with("post", 9);
    assert_eq!(table.url_for("user.post.show", params).unwrap(), "/user/3/post/9");

    let params = vec![("post", "b"), ("user", "a")];
    assert_eq!(table.url_for("user.post.show", params).unwrap(), "/user/a/post/b");

    let params = ["a", "b"];
    assert_eq!(table.url_for("user.post.show", params).unwrap(), "/user/a/post/b");
}

#[test]
fn extra_segments() {
    let table = table();
    let path = table.url_for("user.show", [("user", 5)]).unwrap();

    assert_eq!(
        append_segments(&path, [("page", "2"), ("sort", "asc")]),
        "/user/5/page/2/sort/asc"
    );
    assert_eq!(append_segments("/", [("a", "b")]), "/a/b");
}

#[test]
fn app_helpers() {
    let mut app = App::new();
    app.get_named("/user/{user}", (), "user.show").unwrap();

    let req = RequestHead::get("/user/42");
    assert!(app.current_route_is(&req, "user.show", [("user", 42)]).unwrap());
    assert!(app.current_url_is(&req, "/user/42"));

    let redirect = app
        .redirect_to_route("user.show", [("user", 42)], [("tab", "likes")])
        .unwrap();
    assert_eq!(redirect.location(), "/user/42/tab/likes");

    let url = app.absolute_url_for("user.show", ["42"]).unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/user/42");
}
