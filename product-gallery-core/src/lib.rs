pub mod config;
pub mod error;
pub mod form;
pub mod pagination;
pub mod source;
pub mod wizard;

pub use config::{DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE, GalleryConfig, get_config_file_path};
pub use error::GalleryError;
pub use form::{Preferences, ProfileData, ProfileField, ProfileForm};
pub use pagination::{
    LoadPhase, PageControls, PageMarker, PaginatedView, RenderState, page_count_for, page_window,
};
pub use source::{
    DataSource, FileDataSource, HttpDataSource, Product, ProductClient, ProductsResponse,
    StaticDataSource,
};
pub use wizard::{
    StepDescriptor, TabWizard, TextRender, Theme, WizardData, WizardError, default_steps,
    validate_interests, validate_profile, validate_settings,
};

/// The gallery's view type: a paginated list of products.
pub type ProductView = PaginatedView<Product>;

/// Build an empty product view sized by `config`.
pub fn new_product_view(config: &GalleryConfig) -> ProductView {
    PaginatedView::new(config.page_size)
}

/// HTTP data source for the configured endpoint.
pub fn http_source(config: &GalleryConfig) -> Result<HttpDataSource, GalleryError> {
    HttpDataSource::new(config.endpoint.clone())
}
