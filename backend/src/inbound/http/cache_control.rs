//! Shared cache-control policies for HTTP handlers.

/// Session-bound explorer responses must always be revalidated before reuse.
pub const PRIVATE_NO_CACHE_MUST_REVALIDATE: &str = "private, no-cache, must-revalidate";

/// The catalogue and reference data never change while the process runs.
pub const PUBLIC_CATALOGUE: &str = "public, max-age=300";

/// Header tuple for responses derived from the session cookie.
pub const fn private_no_cache_header() -> (&'static str, &'static str) {
    ("Cache-Control", PRIVATE_NO_CACHE_MUST_REVALIDATE)
}

/// Header tuple for catalogue-only responses.
pub const fn public_catalogue_header() -> (&'static str, &'static str) {
    ("Cache-Control", PUBLIC_CATALOGUE)
}
