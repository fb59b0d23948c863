//! Form controller: the dashboard's trigger state machine.
//!
//! Two triggers drive the dashboard:
//! 1. **Initial load** ([`FormController::on_load`]): news plus both lookup
//!    lists, fetched concurrently
//! 2. **Form submission** ([`FormController::on_submit`]): news only
//!
//! Each trigger brackets its news request with the loader overlay, reads the
//! form values at request time, and dispatches the outcome to the renderer
//! or to an error toast.

use crate::http::{HttpClient, HttpError};
use crate::lookups::{self, LookupError};
use crate::models::{Country, NewsRequest, NewsResponse};
use crate::news::NewsApi;
use crate::render::{RenderOutcome, Renderer};
use crate::ui::{NoticeKind, Notify, Page, SelectId, SelectOption, SelectPopulate};
use crate::utils::upcase;
use tracing::{info, instrument, warn};

/// Where the lookup lists are loaded from.
#[derive(Debug, Clone)]
pub struct LookupSources {
    pub countries: String,
    pub categories: String,
}

/// Values carried by a form submission. `None` keeps the current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Submission {
    pub country: Option<String>,
    pub category: Option<String>,
    pub search: String,
}

/// Drives the [`Page`] from user triggers.
#[derive(Debug)]
pub struct FormController<N> {
    news: N,
    http: HttpClient,
    renderer: Renderer,
    sources: LookupSources,
    page: Page,
}

impl<N: NewsApi> FormController<N> {
    pub fn new(
        news: N,
        http: HttpClient,
        renderer: Renderer,
        sources: LookupSources,
        page: Page,
    ) -> Self {
        Self {
            news,
            http,
            renderer,
            sources,
            page,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Initial page load: news, countries and categories at once.
    #[instrument(level = "info", skip_all)]
    pub async fn on_load(&mut self) -> Result<RenderOutcome, HttpError> {
        self.page.toasts.clear();
        self.page.loader.show();
        let request = NewsRequest::select(&self.page.form.query());
        info!(endpoint = request.endpoint(), "Initial load");

        let (news, countries, categories) = futures::join!(
            self.news.fetch(&request),
            lookups::load_countries(&self.http, &self.sources.countries),
            lookups::load_categories(&self.http, &self.sources.categories),
        );

        self.on_countries(countries);
        self.on_categories(categories);
        self.on_response(news)
    }

    /// Form submission: apply the submitted values, then reload news.
    #[instrument(level = "info", skip_all, fields(search = %submission.search))]
    pub async fn on_submit(&mut self, submission: Submission) -> Result<RenderOutcome, HttpError> {
        let form = &mut self.page.form;
        if let Some(country) = submission.country {
            form.country = country;
        }
        if let Some(category) = submission.category {
            form.category = category;
        }
        form.search = submission.search;
        self.load_news().await
    }

    /// Show the loader, read the form, fetch through the selected endpoint.
    pub async fn load_news(&mut self) -> Result<RenderOutcome, HttpError> {
        self.page.toasts.clear();
        self.page.loader.show();
        let query = self.page.form.query();
        let request = NewsRequest::select(&query);
        info!(endpoint = request.endpoint(), ?query, "Loading news");

        let outcome = self.news.fetch(&request).await;
        self.on_response(outcome)
    }

    fn on_response(
        &mut self,
        outcome: Result<NewsResponse, HttpError>,
    ) -> Result<RenderOutcome, HttpError> {
        self.page.loader.remove();
        match outcome {
            Ok(response) => {
                let Page {
                    container, toasts, ..
                } = &mut self.page;
                Ok(self.renderer.render(container, toasts, &response.articles))
            }
            Err(e) => {
                warn!(error = %e, "News request failed");
                self.page.notify(&e.to_string(), NoticeKind::Error);
                Err(e)
            }
        }
    }

    fn on_countries(&mut self, result: Result<Vec<Country>, LookupError>) {
        match result {
            Ok(countries) => {
                let options = countries
                    .into_iter()
                    .map(|c| SelectOption {
                        value: c.code,
                        label: c.name,
                    })
                    .collect();
                self.page.populate(SelectId::Country, options);
            }
            Err(e) => self.page.notify(&e.to_string(), NoticeKind::Error),
        }
    }

    fn on_categories(&mut self, result: Result<Vec<String>, LookupError>) {
        match result {
            Ok(categories) => {
                let options = categories
                    .into_iter()
                    .map(|c| SelectOption {
                        label: upcase(&c),
                        value: c,
                    })
                    .collect();
                self.page.populate(SelectId::Category, options);
            }
            Err(e) => self.page.notify(&e.to_string(), NoticeKind::Error),
        }
    }
}
