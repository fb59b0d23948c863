//! Card rendering for article lists.
//!
//! The [`Renderer`] turns a list of [`Article`]s into Materialize-style card
//! fragments and replaces whatever the [`NewsContainer`] held before. An
//! empty list clears the container and raises a "No news" notice instead.

use crate::models::Article;
use crate::ui::{NoticeKind, Notify, escape};
use itertools::Itertools;
use tracing::{debug, instrument};

/// Image shown when an article has no `urlToImage`.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "images/no_image.png";
/// Text shown when an article has no description.
pub const NO_DESCRIPTION: &str = "No description";
/// Notice raised for an empty article list.
pub const NO_NEWS: &str = "No news";

/// The `.news-container .row` element: one child per card.
#[derive(Debug, Default)]
pub struct NewsContainer {
    children: Vec<String>,
}

impl NewsContainer {
    pub fn children(&self) -> &[String] {
        &self.children
    }

    /// Remove every child.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Append card fragments after the existing children.
    pub fn append(&mut self, cards: impl IntoIterator<Item = String>) {
        self.children.extend(cards);
    }

    pub fn inner_html(&self) -> String {
        self.children.iter().join("")
    }
}

/// Result of a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// No articles; the "No news" notice was shown.
    Empty,
    /// This many cards were appended.
    Rendered(usize),
}

/// Builds article cards.
#[derive(Debug, Clone)]
pub struct Renderer {
    placeholder_image: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_IMAGE)
    }
}

impl Renderer {
    pub fn new(placeholder_image: &str) -> Self {
        Self {
            placeholder_image: placeholder_image.to_string(),
        }
    }

    /// Replace the container's content with one card per article, in order.
    #[instrument(level = "info", skip_all, fields(articles = articles.len()))]
    pub fn render<N: Notify>(
        &self,
        container: &mut NewsContainer,
        notify: &mut N,
        articles: &[Article],
    ) -> RenderOutcome {
        container.clear();

        if articles.is_empty() {
            notify.notify(NO_NEWS, NoticeKind::Warning);
            return RenderOutcome::Empty;
        }

        container.append(articles.iter().map(|a| self.card(a)));
        debug!(cards = articles.len(), "Rendered news cards");
        RenderOutcome::Rendered(articles.len())
    }

    /// Markup for a single article card.
    pub fn card(&self, article: &Article) -> String {
        let image = non_blank(article.url_to_image.as_deref())
            .unwrap_or(self.placeholder_image.as_str());
        let description = non_blank(article.description.as_deref()).unwrap_or(NO_DESCRIPTION);
        let title = article.title.as_deref().unwrap_or("");

        format!(
            r#"
      <div class="col s12 m4">
        <div class="card large">
          <div class="card-image">
            <img src="{image}"/>
            <span class="card-title">{title}</span>
          </div>
          <div class="card-content">
            <p>{description}</p>
          </div>
          <div class="card-action">
            <a href="{url}">Read more</a>
          </div>
        </div>
      </div>
    "#,
            image = escape(image),
            title = escape(title),
            description = escape(description),
            url = escape(&article.url),
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
