use crate::domain::ports::DrugApi;
use crate::utils::error::{DrugNetError, Result};
use crate::views::{
    AlternativesView, DrugDetailsView, FilterDrugsView, HomeView, PathFinderView, Rendered, View,
    ViewInput,
};
use std::fmt;

/// Client-side routes. Each literal path maps to exactly one view; there
/// are no guards, redirects or path parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Path,
    Alternatives,
    Filter,
    Details,
}

impl Route {
    const ALL: [Route; 5] = [
        Route::Home,
        Route::Path,
        Route::Alternatives,
        Route::Filter,
        Route::Details,
    ];

    pub fn all() -> &'static [Route] {
        &Self::ALL
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Path => "/path",
            Route::Alternatives => "/alternatives",
            Route::Filter => "/filter",
            Route::Details => "/details",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Path => "path",
            Route::Alternatives => "alternatives",
            Route::Filter => "filter",
            Route::Details => "details",
        }
    }

    pub fn view_name(self) -> &'static str {
        match self {
            Route::Home => "HomeView",
            Route::Path => "PathFinder",
            Route::Alternatives => "Alternatives",
            Route::Filter => "FilterDrugs",
            Route::Details => "DrugDetails",
        }
    }

    /// Exact literal match; `/path/` and `/PATH` are unknown.
    pub fn from_path(path: &str) -> Result<Route> {
        Self::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .ok_or_else(|| DrugNetError::UnknownRoute {
                path: path.to_string(),
            })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

pub struct Router {
    views: Vec<Box<dyn View>>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            views: vec![
                Box::new(HomeView),
                Box::new(PathFinderView),
                Box::new(AlternativesView),
                Box::new(FilterDrugsView),
                Box::new(DrugDetailsView),
            ],
        }
    }

    pub fn view(&self, route: Route) -> Result<&dyn View> {
        self.views
            .iter()
            .find(|view| view.route() == route)
            .map(|view| view.as_ref())
            .ok_or_else(|| DrugNetError::UnknownRoute {
                path: route.path().to_string(),
            })
    }

    pub fn resolve(&self, path: &str) -> Result<&dyn View> {
        self.view(Route::from_path(path)?)
    }

    pub async fn render(&self, api: &dyn DrugApi, input: &ViewInput) -> Result<Rendered> {
        let route = input.route();
        tracing::debug!("Rendering {} ({})", route, route.view_name());
        self.view(route)?.render(api, input).await
    }

    /// `location` is a route path with optional query, e.g.
    /// `/alternatives?name=Aspirin&top_n=5`.
    pub async fn navigate(&self, api: &dyn DrugApi, location: &str) -> Result<Rendered> {
        let (path, query) = location.split_once('?').unwrap_or((location, ""));
        let route = Route::from_path(path)?;
        let params: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        tracing::debug!("Navigating to {} with {} params", route, params.len());

        let input = ViewInput::from_params(route, &params)?;
        self.render(api, &input).await
    }
}
