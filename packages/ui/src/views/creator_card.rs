use api::Creator;
use dioxus::prelude::*;

use crate::icons::{FaInstagram, FaUsers, FaYoutube};
use crate::Icon;

use super::ModalOverlay;

#[component]
pub fn CreatorCard(creator: Creator, on_open: EventHandler<Creator>) -> Element {
    let name = creator.display_name().to_string();
    let avatar = creator.avatar_url();
    let category = creator.category();
    let followers = creator.followers_label();

    rsx! {
        button {
            class: "creator-card",
            onclick: move |_| on_open.call(creator.clone()),
            img { class: "creator-avatar", src: "{avatar}", alt: "{name}" }
            div {
                class: "creator-summary",
                strong { "{name}" }
                if !category.is_empty() {
                    span { class: "creator-category", "{category}" }
                }
                if let Some(followers) = followers {
                    span {
                        class: "creator-followers",
                        Icon { icon: FaUsers, width: 12, height: 12 }
                        " {followers}"
                    }
                }
            }
        }
    }
}

/// Full record of a creator, shown in a modal.
#[component]
pub fn CreatorDetail(creator: Creator, on_close: EventHandler<()>) -> Element {
    let name = creator.display_name().to_string();
    let avatar = creator.avatar_url();
    let category = creator.category();

    rsx! {
        ModalOverlay {
            title: name.clone(),
            on_close: on_close,
            div {
                class: "creator-detail",
                img { class: "creator-avatar large", src: "{avatar}", alt: "{name}" }
                if let Some(username) = creator.username.clone() {
                    p { class: "muted", "@{username}" }
                }
                if !category.is_empty() {
                    p { "{category}" }
                }
                if let Some(followers) = creator.followers_label() {
                    p { "{followers} followers" }
                }
                if let Some(bio) = creator.bio.clone() {
                    p { class: "creator-bio", "{bio}" }
                }
                div {
                    class: "creator-links",
                    if let Some(link) = creator.profile_link.clone() {
                        a { href: "{link}", target: "_blank", rel: "noopener", "Profile" }
                    }
                    if let Some(instagram) = creator.instagram.clone() {
                        a {
                            href: "{instagram}",
                            target: "_blank",
                            rel: "noopener",
                            Icon { icon: FaInstagram, width: 14, height: 14 }
                            " Instagram"
                        }
                    }
                    if let Some(youtube) = creator.youtube.clone() {
                        a {
                            href: "{youtube}",
                            target: "_blank",
                            rel: "noopener",
                            Icon { icon: FaYoutube, width: 14, height: 14 }
                            " YouTube"
                        }
                    }
                    if let Some(email) = creator.email.clone() {
                        a { href: "mailto:{email}", "{email}" }
                    }
                }
            }
        }
    }
}
