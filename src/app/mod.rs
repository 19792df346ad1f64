use crate::pages::{CommentsPage, GalleryPage, HomePage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::StaticSegment;
use strum::{EnumIter, IntoEnumIterator};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter)]
pub(crate) enum SitePage {
    Home,
    Comments,
    Gallery,
}

impl SitePage {
    pub fn segment(self) -> &'static str {
        match self {
            SitePage::Home => "",
            SitePage::Comments => "comments",
            SitePage::Gallery => "gallery",
        }
    }

    /// Old static page name. The backend redirects here after a form post.
    pub fn legacy_segment(self) -> &'static str {
        match self {
            SitePage::Home => "index.html",
            SitePage::Comments => "comments.html",
            SitePage::Gallery => "gallery.html",
        }
    }

    pub fn href(self) -> String {
        format!("/{}", self.segment())
    }

    pub fn label(self) -> &'static str {
        match self {
            SitePage::Home => "Home",
            SitePage::Comments => "Comments",
            SitePage::Gallery => "Gallery",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        let segment = segment.trim_matches('/');
        SitePage::iter().find(|p| p.segment() == segment || p.legacy_segment() == segment)
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - pages read `AppContext`, so it must be provided above <Router>.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=StaticSegment(SitePage::Comments.segment()) view=CommentsPage />
                <Route path=StaticSegment(SitePage::Gallery.segment()) view=GalleryPage />
                <Route path=StaticSegment(SitePage::Home.segment()) view=HomePage />
                <Route path=StaticSegment(SitePage::Comments.legacy_segment()) view=CommentsPage />
                <Route path=StaticSegment(SitePage::Gallery.legacy_segment()) view=GalleryPage />
                <Route path=StaticSegment(SitePage::Home.legacy_segment()) view=HomePage />
            </Routes>
        </Router>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_post_redirect_targets_resolve_to_pages() {
        // Comment and nickname posts land on comments.html.
        assert_eq!(SitePage::from_segment("/comments.html"), Some(SitePage::Comments));
        assert_eq!(SitePage::from_segment("index.html"), Some(SitePage::Home));
        assert_eq!(SitePage::from_segment("gallery.html"), Some(SitePage::Gallery));
    }

    #[test]
    fn current_paths_resolve_to_pages() {
        assert_eq!(SitePage::from_segment("/"), Some(SitePage::Home));
        assert_eq!(SitePage::from_segment("/comments"), Some(SitePage::Comments));
        assert_eq!(SitePage::from_segment("/gallery/"), Some(SitePage::Gallery));
        assert_eq!(SitePage::from_segment("/nope"), None);
    }

    #[test]
    fn every_page_has_distinct_paths() {
        let mut seen = Vec::new();
        for page in SitePage::iter() {
            assert!(page.legacy_segment().ends_with(".html"));
            assert_eq!(page.href(), format!("/{}", page.segment()));
            seen.push(page.segment());
            seen.push(page.legacy_segment());
        }
        let count = seen.len();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), count);
    }
}
