//! Server-rendered pages. Plain markup, no client framework.

pub mod index;
pub mod quiz;
pub mod scoreboard;

use maud::{html, Markup, DOCTYPE};

pub fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Study Quiz" }
            }
            body {
                nav { a href="/home" { "Home" } }
                main { (body) }
            }
        }
    }
}
