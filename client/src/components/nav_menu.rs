//! Side navigation generated from the route table.

use labkit::routes;
use leptos::prelude::*;
use leptos_router::components::A;

/// Human label for a route section key.
fn section_label(section: &str) -> &'static str {
    match section {
        "laboratory" => "Laboratories",
        "equipment" => "Equipment",
        "borrow" => "Borrowing",
        "reservation" => "Reservations",
        "repair" => "Repairs",
        "scrap" => "Scrapping",
        _ => "Other",
    }
}

#[component]
pub fn NavMenu() -> impl IntoView {
    let sections = routes::sections()
        .into_iter()
        .map(|(section, entries)| {
            let links = entries
                .into_iter()
                .map(|entry| view! { <li><A href=entry.path>{entry.title}</A></li> })
                .collect_view();
            view! {
                <li class="nav-menu__section">
                    <span class="nav-menu__label">{section_label(section)}</span>
                    <ul>{links}</ul>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="nav-menu">
            <ul>
                {sections}
                <li class="nav-menu__section">
                    <A href="/about">"About"</A>
                </li>
            </ul>
        </nav>
    }
}
