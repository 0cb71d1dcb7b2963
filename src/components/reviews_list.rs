//! Components listing stored reviews, newest first.
use leptos::*;
use crate::models::review::Review;

#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    if reviews.is_empty() {
        return view! {
            <p class="empty">"No reviews yet."</p>
        }
        .into_view();
    }

    view! {
        <ul class="reviews">
            {
                reviews.into_iter().map(|review| {
                    view! { <ReviewCard review=review/> }
                }).collect::<Vec<_>>()
            }
        </ul>
    }
    .into_view()
}

#[component]
pub fn ReviewCard(review: Review) -> impl IntoView {
    let posted = review.date.format("%Y-%m-%d %H:%M UTC").to_string();
    let label = format!("{} out of 5 stars", review.rating);
    let anchor = format!("review-{}", review.id);

    view! {
        <li class="review" id=anchor>
            <div class="review-header">
                <span class="review-name">{ review.name }</span>
                <span class="review-rating" title=label>{ review.rating.stars() }</span>
                <time class="review-date">{ posted }</time>
            </div>
            <p class="review-comment">{ review.comment }</p>
        </li>
    }
}
