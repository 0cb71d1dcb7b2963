//! Server-side rendering of the review pages.
//! Each page is a leptos view rendered to a string and wrapped in the HTML document shell.
use leptos::*;
use crate::components::layout::{ErrorPage, Layout};
use crate::components::prompt::ExternalPrompt;
use crate::components::review_form::ReviewForm;
use crate::components::reviews_list::ReviewsList;
use crate::models::flash::FlashMessage;
use crate::models::review::{Review, ReviewInput};
use crate::validation::ValidationErrors;

const SITE_NAME: &str = "Customer Reviews";

fn document<F, N>(title: &str, page: F) -> String
where
    F: FnOnce() -> N + 'static,
    N: IntoView,
{
    let body = leptos::ssr::render_to_string(page).to_string();
    format!(
        "<!DOCTYPE html>\
         <html lang=\"en\">\
         <head>\
         <meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title} | {SITE_NAME}</title>\
         <link rel=\"stylesheet\" href=\"/assets/style.css\">\
         </head>\
         <body>{body}</body>\
         </html>"
    )
}

pub fn render_index(reviews: Vec<Review>, flash: Option<FlashMessage>) -> String {
    document("All reviews", move || {
        view! {
            <Layout flash=flash>
                <h1>{ SITE_NAME }</h1>
                <p class="lead">
                    <a class="button" href="/submit">"Write a review"</a>
                </p>
                <ReviewsList reviews=reviews/>
            </Layout>
        }
    })
}

pub fn render_submit(
    input: ReviewInput,
    errors: ValidationErrors,
    flash: Option<FlashMessage>,
) -> String {
    document("Write a review", move || {
        view! {
            <Layout flash=flash>
                <h1>"Write a review"</h1>
                <ReviewForm input=input errors=errors/>
            </Layout>
        }
    })
}

pub fn render_prompt(flash: Option<FlashMessage>) -> String {
    document("Thank you", move || {
        view! {
            <Layout flash=flash>
                <ExternalPrompt/>
            </Layout>
        }
    })
}

pub fn render_error() -> String {
    document("Error", move || {
        view! {
            <Layout flash=None>
                <ErrorPage/>
            </Layout>
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::review::Rating;
    use crate::validation::{validate, Field};
    use chrono::Utc;

    fn review(id: i64, name: &str, rating: i64) -> Review {
        Review {
            id,
            name: name.into(),
            rating: Rating::new(rating).unwrap(),
            comment: "Great service overall".into(),
            date: Utc::now(),
        }
    }

    #[test]
    fn index_lists_reviews_in_given_order() {
        let html = render_index(vec![review(2, "Bea", 4), review(1, "Al", 5)], None);
        assert!(html.starts_with("<!DOCTYPE html>"));
        let bea = html.find("Bea").unwrap();
        let al = html.find("Al<").unwrap();
        assert!(bea < al);
        assert!(html.contains("★★★★☆"));
        assert!(!html.contains("No reviews yet."));
    }

    #[test]
    fn empty_index_says_so() {
        let html = render_index(Vec::new(), None);
        assert!(html.contains("No reviews yet."));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut hostile = review(1, "<script>x</script>", 3);
        hostile.comment = "<b>bold</b> claims here".into();
        let html = render_index(vec![hostile], None);
        assert!(!html.contains("<script>x"));
        assert!(!html.contains("<b>bold"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn submit_form_keeps_input_and_shows_errors() {
        let input = ReviewInput {
            name: "A".into(),
            rating: "4".into(),
            comment: "Great service overall".into(),
        };
        let errors = validate(&input).unwrap_err();
        let message = errors.messages(Field::Name)[0].clone();
        let html = render_submit(input, errors, None);

        assert!(html.contains(&message));
        assert!(html.contains("Great service overall"));
        assert!(html.contains("4 Stars"));
        assert!(html.contains("selected"));
    }

    #[test]
    fn flash_banner_is_rendered() {
        let html = render_prompt(Some(FlashMessage::success("Thanks a lot")));
        assert!(html.contains("flash-success"));
        assert!(html.contains("Thanks a lot"));
        assert!(html.contains("Trustpilot"));
    }

    #[test]
    fn error_page_renders() {
        let html = render_error();
        assert!(html.contains("Something went wrong"));
    }
}
