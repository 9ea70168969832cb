// In components/mod.rs
pub(crate) mod context;
pub(crate) mod episode;
pub mod gen_funcs;
pub(crate) mod home;
pub(crate) mod player;
pub(crate) mod routes;
pub(crate) mod safehtml;
