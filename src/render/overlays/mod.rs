//! Modal overlays - settings and the API key dialog.

mod api_key;
mod modal_base;
mod settings;

pub use api_key::render_key_modal;
pub use settings::render_settings_modal;
