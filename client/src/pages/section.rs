//! Placeholder views for the section routes and the about page.
//!
//! Titles come from the route table so the header always matches navigation.

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;

use labkit::routes;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::components::guard::Guarded;

fn route_title(pathname: &str) -> &'static str {
    routes::find_route(pathname).map_or("Not found", |route| route.entry.title)
}

/// Section view for whichever child route is active.
#[component]
pub fn SectionPage() -> impl IntoView {
    let location = use_location();
    let title = move || route_title(&location.pathname.get());

    view! {
        <section class="section">
            <h2 class="section__title">{title}</h2>
        </section>
    }
}

/// Index child of home: forwards to the landing section.
#[component]
pub fn HomeIndex() -> impl IntoView {
    let target = routes::landing_path(routes::HOME_PATH).unwrap_or(routes::HOME_PATH);
    view! { <Redirect path=target/> }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <Guarded>
            <section class="section">
                <h2 class="section__title">{route_title("/about")}</h2>
                <p>"LabDesk client for laboratory, equipment, borrowing, reservation, repair and scrap management."</p>
            </section>
        </Guarded>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <section class="section">
            <h2 class="section__title">{route_title("/missing")}</h2>
        </section>
    }
}
