//! Page shell and toast notifications

use maud::{html, Markup, Render, DOCTYPE};

use crate::session::{display_name, AuthSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

/// A transient notification shown at the top of the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

impl Render for Toast {
    fn render(&self) -> Markup {
        html! {
            div id="toast" class={ "toast toast-" (self.kind.as_str()) " show" } role="status" {
                span id="toastMessage" { (self.message) }
            }
        }
    }
}

const NAV_LINKS: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/dashboard", "Dashboard"),
    ("/tracker", "Tracker"),
    ("/doctors", "Find Doctors"),
    ("/predict", "Risk Assessment"),
];

/// Wrap a page body in the document shell
pub fn page(title: &str, auth: Option<&AuthSession>, body: &Markup, toast: Option<&Toast>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | GynAI" }
                link rel="stylesheet" href="/static/style.css";
            }
            body {
                (nav(auth))
                @if let Some(toast) = toast {
                    (toast)
                }
                main class="container" { (body) }
            }
        }
    }
}

fn nav(auth: Option<&AuthSession>) -> Markup {
    html! {
        nav class="navbar" {
            a class="logo" href="/" { "GynAI" }
            ul class="nav-links" {
                @for (href, label) in NAV_LINKS {
                    li { a href=(href) { (label) } }
                }
            }
            @if auth.is_some() {
                div class="nav-user" {
                    span class="user-name" { (display_name(auth)) }
                    form method="post" action="/logout" {
                        button type="submit" class="logout-btn" { "Logout" }
                    }
                }
            } @else {
                div class="nav-auth" {
                    a href="/login" { "Login" }
                    " "
                    a href="/register" class="btn" { "Sign Up" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_escapes_title_and_user() {
        let auth = AuthSession::new("<b>eve</b>", "eve@example.com");
        let body = html! { p { "hello" } };

        let html = page("A & B", Some(&auth), &body, Some(&Toast::error("Oops <x>")));
        let html = html.into_string();

        assert!(html.contains("<title>A &amp; B | GynAI</title>"));
        assert!(html.contains("&lt;b&gt;eve&lt;/b&gt;"));
        assert!(html.contains(r#"class="toast toast-error show""#));
        assert!(html.contains("Oops &lt;x&gt;"));
        assert!(html.contains("<p>hello</p>"));
        assert!(html.contains(r#"action="/logout""#));
    }

    #[test]
    fn test_guest_nav_offers_login() {
        let html = page("Home", None, &html! {}, None).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"href="/login""#));
        assert!(!html.contains("toast"));
    }
}
