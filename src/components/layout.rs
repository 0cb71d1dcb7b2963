use leptos::*;
use crate::models::flash::FlashMessage;

/// Page chrome shared by every page: navigation, flash banner and content.
#[component]
pub fn Layout(flash: Option<FlashMessage>, children: Children) -> impl IntoView {
    view! {
        <header class="site-header">
            <nav>
                <a href="/">"Reviews"</a>
                <a href="/submit">"Write a review"</a>
            </nav>
        </header>
        <main class="container">
            {
                flash.map(|flash| {
                    let class = flash.css_class();
                    view! { <div class=class role="status">{ flash.message }</div> }
                })
            }
            { children() }
        </main>
    }
}

#[component]
pub fn ErrorPage() -> impl IntoView {
    view! {
        <section class="error">
            <h1>"Something went wrong"</h1>
            <p>"We could not load this page. Please try again in a moment."</p>
        </section>
    }
}
