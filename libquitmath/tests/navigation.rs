use libquitmath::error::NavigationError;
use libquitmath::{NavParams, Navigator, Route, RouteTable, ScreenId, TaskKind};

type Render = fn() -> &'static str;

fn onboarding() -> &'static str {
    "onboarding"
}

fn other() -> &'static str {
    "other"
}

fn full_table() -> RouteTable<Render> {
    RouteTable::standard(|id| if id == ScreenId::Onboarding { onboarding as Render } else { other as Render })
        .unwrap()
}

#[test]
fn test_initial_route_is_onboarding() {
    let routes = full_table();
    assert_eq!(routes.initial(), ScreenId::Onboarding);

    let nav = Navigator::new(&routes);
    assert_eq!(nav.screens(), vec![ScreenId::Onboarding]);
    assert_eq!((routes.get(nav.current().screen).render)(), "onboarding");
}

#[test]
fn test_onboarding_home_back_scenario() {
    let routes = full_table();
    let mut nav = Navigator::new(&routes);

    nav.navigate(ScreenId::Home);
    assert_eq!(nav.screens(), vec![ScreenId::Onboarding, ScreenId::Home]);

    assert!(nav.go_back());
    assert_eq!(nav.screens(), vec![ScreenId::Onboarding]);

    assert!(!nav.go_back());
    assert_eq!(nav.screens(), vec![ScreenId::Onboarding]);
}

#[test]
fn test_reset_after_login_drops_auth_screens() {
    let mut nav = Navigator::new(&full_table());
    nav.navigate(ScreenId::Login);
    nav.reset(ScreenId::Home);

    assert_eq!(nav.screens(), vec![ScreenId::Home]);
    assert!(!nav.can_go_back());
}

#[test]
fn test_task_params_travel_with_entry() {
    let mut nav = Navigator::new(&full_table());
    nav.navigate_with(ScreenId::TaskPlayer, NavParams::Task { kind: TaskKind::Motor });

    assert_eq!(nav.current().params, NavParams::Task { kind: TaskKind::Motor });
    nav.go_back();
    assert_eq!(nav.current().params, NavParams::None);
}

#[test]
fn test_table_missing_a_screen_is_rejected() {
    let routes: Vec<Route<Render>> = ScreenId::ALL
        .iter()
        .filter(|&&id| id != ScreenId::EcoImpact)
        .map(|&id| Route::new(id, other as Render))
        .collect();

    let err = RouteTable::new(ScreenId::Onboarding, routes).unwrap_err();
    assert_eq!(err, NavigationError::MissingRoute(ScreenId::EcoImpact));
}

#[test]
fn test_table_with_duplicate_is_rejected() {
    let mut routes: Vec<Route<Render>> =
        ScreenId::ALL.iter().map(|&id| Route::new(id, other as Render)).collect();
    routes.push(Route::new(ScreenId::Home, other as Render));

    let err = RouteTable::new(ScreenId::Onboarding, routes).unwrap_err();
    assert_eq!(err, NavigationError::DuplicateRoute(ScreenId::Home));
}

#[test]
fn test_titles_and_headers() {
    let routes = full_table();
    assert!(!routes.options(ScreenId::Onboarding).header_shown);
    assert_eq!(routes.options(ScreenId::Login).title, "Sign in");
    assert_eq!(routes.options(ScreenId::TaskPlayer).title, "Task session");
    assert!(routes.options(ScreenId::Settings).header_shown);

    let order: Vec<ScreenId> = routes.iter().map(|r| r.id).collect();
    assert_eq!(order, ScreenId::ALL.to_vec());
}
