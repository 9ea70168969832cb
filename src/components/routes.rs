use yew_router::Routable;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/episodes/:slug")]
    Episode { slug: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}
