use api::{Creator, SearchParams};
use dioxus::prelude::*;

use crate::auth::use_config;
use crate::hooks::{use_record_visit, use_regions, use_search_creators};
use crate::icons::FaMagnifyingGlass;
use crate::query::{MutationState, QueryState};
use crate::Icon;

use super::{CreatorCard, CreatorDetail};

/// Creator search with region filter, pagination and a detail modal.
#[component]
pub fn DatabaseView() -> Element {
    let page_size = use_config().search.page_size;
    let regions = use_regions();
    let search = use_search_creators();
    let record_visit = use_record_visit();

    let mut keyword = use_signal(String::new);
    let mut country = use_signal(String::new);
    let mut submitted = use_signal(|| Option::<SearchParams>::None);
    let mut selected = use_signal(|| Option::<Creator>::None);

    let mut submit = move || {
        let params = SearchParams::new(&keyword.read(), &country.read()).with_limit(page_size);
        submitted.set(Some(params.clone()));
        search.mutate(params.with_page(1));
    };

    let turn_page = move |page: u32| {
        if let Some(params) = page_request(submitted.peek().as_ref(), page) {
            search.mutate(params);
        }
    };

    let open_creator = move |creator: Creator| {
        record_visit.call(creator.id.clone());
        selected.set(Some(creator));
    };

    let region_options = match &regions {
        QueryState::Ready(regions) => regions.as_ref().clone(),
        _ => Vec::new(),
    };

    let results = match search.state() {
        MutationState::Idle => rsx! {
            p { class: "muted", "Search by keyword and country to find creators." }
        },
        MutationState::Pending => rsx! {
            p { class: "muted", "Searching..." }
        },
        MutationState::Failed(err) => rsx! {
            p { class: "form-error", "Search failed: {err}" }
        },
        MutationState::Success(response) => {
            let meta = response.meta;
            let summary = match meta.item_range() {
                Some((first, last)) => format!("{first}-{last} of {} creators", meta.total),
                None => "No creators match these filters.".to_string(),
            };
            rsx! {
                p { class: "muted", "{summary}" }
                div {
                    class: "creator-grid",
                    for creator in response.data {
                        CreatorCard {
                            key: "{creator.id}",
                            creator: creator.clone(),
                            on_open: open_creator,
                        }
                    }
                }
                if meta.total_pages > 1 {
                    div {
                        class: "pagination",
                        button {
                            disabled: !meta.has_previous(),
                            onclick: move |_| turn_page(meta.page - 1),
                            "Previous"
                        }
                        span { "Page {meta.page} of {meta.total_pages}" }
                        button {
                            disabled: !meta.has_next(),
                            onclick: move |_| turn_page(meta.page + 1),
                            "Next"
                        }
                    }
                }
            }
        }
    };

    rsx! {
        section {
            class: "dashboard-section",
            h2 { "Creator database" }
            form {
                class: "search-bar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit();
                },
                input {
                    r#type: "text",
                    placeholder: "Keyword, e.g. beauty",
                    value: "{keyword}",
                    oninput: move |evt: FormEvent| keyword.set(evt.value()),
                }
                select {
                    value: "{country}",
                    onchange: move |evt: FormEvent| country.set(evt.value()),
                    option { value: "", "All countries" }
                    for region in region_options {
                        option { key: "{region.id}", value: "{region.name}", "{region.label()}" }
                    }
                }
                button {
                    r#type: "submit",
                    class: "primary",
                    disabled: search.is_pending(),
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    " Search"
                }
            }
            if let QueryState::Failed(err) = &regions {
                p { class: "form-error", "Could not load countries: {err}" }
            }
            {results}
            if let Some(creator) = selected() {
                CreatorDetail {
                    creator: creator,
                    on_close: move |_| selected.set(None),
                }
            }
        }
    }
}

/// `page` of the last submitted search. Edits not yet submitted are ignored.
fn page_request(submitted: Option<&SearchParams>, page: u32) -> Option<SearchParams> {
    submitted.map(|params| params.clone().with_page(page))
}
