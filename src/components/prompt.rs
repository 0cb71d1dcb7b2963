use leptos::*;

/// External platforms the prompt page links to.
pub const EXTERNAL_PLATFORMS: [(&str, &str); 3] = [
    ("Google", "https://www.google.com/maps"),
    ("Yelp", "https://www.yelp.com"),
    ("Trustpilot", "https://www.trustpilot.com"),
];

#[component]
pub fn ExternalPrompt() -> impl IntoView {
    view! {
        <section class="prompt">
            <h1>"Thank you for your feedback"</h1>
            <p>
                "Reviews help other people find us. If you have a minute, "
                "please share your experience on one of these sites as well:"
            </p>
            <ul class="platforms">
                {
                    EXTERNAL_PLATFORMS.iter().map(|&(name, url)| {
                        view! {
                            <li><a href=url target="_blank" rel="noopener">{ name }</a></li>
                        }
                    }).collect::<Vec<_>>()
                }
            </ul>
            <p><a href="/">"Back to all reviews"</a></p>
        </section>
    }
}
