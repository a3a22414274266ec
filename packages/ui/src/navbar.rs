use dioxus::prelude::*;

const VIEWS_CSS: Asset = asset!("/src/views/views.css");

/// Top bar: brand on the left, `children` (links, account actions) on the right.
#[component]
pub fn Navbar(#[props(default = "Creatorbase".to_string())] brand: String, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: VIEWS_CSS }
        header {
            class: "navbar",
            span { class: "navbar-brand", "{brand}" }
            nav { class: "navbar-links", {children} }
        }
    }
}
